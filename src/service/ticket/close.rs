use sea_orm::TransactionTrait;

use crate::{
    data::{middleman::MiddlemanRepository, ticket::TicketRepository},
    error::AppError,
    model::ticket::Ticket,
    service::{platform::ChannelAccess, quota},
    util::week::current_week,
};

use super::{message, TicketService};

impl<'a> TicketService<'a> {
    /// Closes a ticket and posts the close panel.
    ///
    /// Traders lose sight of the channel. The first close of a claimed ticket
    /// credits the assignee with a completed ticket and a quota completion;
    /// closing an already closed ticket only re-posts the panel.
    ///
    /// # Arguments
    /// - `channel_id` - Ticket channel
    /// - `closed_by` - Display name of whoever closed it, for the panel footer
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The closed ticket
    /// - `Err(AppError::Ticket(TicketNotFound))` - No record for the channel
    pub async fn close(&self, channel_id: u64, closed_by: &str) -> Result<Ticket, AppError> {
        let ticket = self.get(channel_id).await?;

        for participant in ticket.participants() {
            self.platform
                .set_member_access(channel_id, participant, ChannelAccess::Hidden)
                .await?;
        }

        self.record_closure(&ticket).await?;

        let channel_name = self.platform.channel_name(channel_id).await?;
        self.platform
            .send_message(
                channel_id,
                message::close_panel(&channel_name, ticket.user1, closed_by),
            )
            .await?;

        Ok(ticket)
    }

    /// Marks the ticket closed and credits its assignee once.
    ///
    /// The closed marker and both counters are written in one transaction, so
    /// a failed credit leaves the ticket open for the next close to retry.
    ///
    /// # Returns
    /// - `Ok(true)` - Ticket transitioned to closed by this call
    /// - `Ok(false)` - Ticket was already closed; nothing credited
    pub async fn record_closure(&self, ticket: &Ticket) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        let transitioned = TicketRepository::new(&txn)
            .mark_closed(ticket.channel_id)
            .await?;

        if !transitioned {
            tracing::debug!("Ticket {} was already closed", ticket.channel_id);
            return Ok(false);
        }

        if let Some(assignee_id) = ticket.claimed_by {
            MiddlemanRepository::new(&txn)
                .increment(assignee_id, current_week())
                .await?;
            quota::record_completion(&txn, assignee_id).await?;
        }

        txn.commit().await?;

        if let Some(assignee_id) = ticket.claimed_by {
            tracing::info!(
                "Credited {} with completing ticket {}",
                assignee_id,
                ticket.channel_id
            );
        }

        Ok(true)
    }
}
