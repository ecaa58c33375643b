use crate::{
    data::ticket::TicketRepository,
    error::AppError,
    service::platform::ChannelAccess,
};

use super::{message, TicketService};

impl<'a> TicketService<'a> {
    /// Drops the record of a deleted ticket channel.
    ///
    /// Missing records are not an error; most channels are not tickets.
    pub async fn delete_ticket_record(&self, channel_id: u64) -> Result<(), AppError> {
        if TicketRepository::new(self.db).delete(channel_id).await? {
            tracing::info!("Removed ticket record for deleted channel {}", channel_id);
        }

        Ok(())
    }

    /// Gives the traders their read/write access back and reopens the record.
    ///
    /// # Returns
    /// - `Ok(Vec<u64>)` - Traders whose access was restored
    /// - `Err(AppError::Ticket(TicketNotFound))` - No record for the channel
    pub async fn reopen(&self, channel_id: u64) -> Result<Vec<u64>, AppError> {
        let ticket = self.get(channel_id).await?;

        let restored = ticket.participants();
        for user_id in &restored {
            self.platform
                .set_member_access(channel_id, *user_id, ChannelAccess::ReadWrite)
                .await?;
        }

        TicketRepository::new(self.db).reopen(channel_id).await?;

        Ok(restored)
    }

    pub async fn add_user(&self, channel_id: u64, user_id: u64) -> Result<(), AppError> {
        self.platform
            .set_member_access(channel_id, user_id, ChannelAccess::ReadWrite)
            .await
    }

    pub async fn remove_user(&self, channel_id: u64, user_id: u64) -> Result<(), AppError> {
        self.platform
            .set_member_access(channel_id, user_id, ChannelAccess::Cleared)
            .await
    }

    pub async fn rename(&self, channel_id: u64, name: &str) -> Result<(), AppError> {
        self.platform.rename_channel(channel_id, name).await
    }

    /// Deletes the ticket channel; the record goes with the channel-delete event.
    pub async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        self.platform.delete_channel(channel_id).await
    }

    /// Posts the trade-details questionnaire addressed to both traders.
    ///
    /// # Returns
    /// - `Ok(())` - Questionnaire posted
    /// - `Err(AppError::Ticket(TicketNotFound))` - No record for the channel
    /// - `Err(AppError::BadRequest)` - Ticket has no counterparty recorded
    pub async fn post_trade_format(&self, channel_id: u64) -> Result<(), AppError> {
        let ticket = self.get(channel_id).await?;

        let Some(counterparty_id) = ticket.user2 else {
            return Err(AppError::BadRequest(
                "Could not find both traders in the database. Please ping them manually."
                    .to_string(),
            ));
        };

        self.platform
            .send_message(
                channel_id,
                message::trade_format(ticket.user1, counterparty_id),
            )
            .await?;

        Ok(())
    }
}
