use crate::{
    data::ticket::TicketRepository,
    error::{ticket::TicketError, AppError},
    model::ticket::Ticket,
    service::platform::ChannelAccess,
};

use super::{message, TicketService};

impl<'a> TicketService<'a> {
    /// Assigns `assignee_id` as the ticket's middleman.
    ///
    /// The assignment is a conditional update, so of two concurrent claims
    /// exactly one wins and the other sees `AlreadyClaimed`. After claiming,
    /// traders keep read access while posting is limited to the assignee and
    /// the staff role.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Ticket with the new assignee
    /// - `Err(AppError::Ticket(TicketNotFound))` - No record for the channel
    /// - `Err(AppError::Ticket(AlreadyClaimed))` - Another middleman holds it; unchanged
    pub async fn claim(&self, channel_id: u64, assignee_id: u64) -> Result<Ticket, AppError> {
        let ticket_repo = TicketRepository::new(self.db);
        let ticket = self.get(channel_id).await?;

        if let Some(current) = ticket.claimed_by {
            return Err(TicketError::AlreadyClaimed {
                assignee_id: current,
            }
            .into());
        }

        if !ticket_repo.claim(channel_id, assignee_id).await? {
            let current = ticket_repo
                .find_by_channel_id(channel_id)
                .await?
                .and_then(|ticket| ticket.claimed_by);

            return Err(match current {
                Some(assignee_id) => TicketError::AlreadyClaimed { assignee_id },
                None => TicketError::TicketNotFound,
            }
            .into());
        }

        for participant in ticket.participants() {
            self.platform
                .set_member_access(channel_id, participant, ChannelAccess::ReadOnly)
                .await?;
        }
        self.platform
            .set_member_access(channel_id, assignee_id, ChannelAccess::ReadWrite)
            .await?;

        if self.config.staff_role_id != self.config.middleman_role_id {
            self.platform
                .set_role_access(
                    channel_id,
                    self.config.middleman_role_id,
                    ChannelAccess::ReadOnly,
                )
                .await?;
            self.platform
                .set_role_access(
                    channel_id,
                    self.config.staff_role_id,
                    ChannelAccess::ReadWrite,
                )
                .await?;
        }

        self.platform
            .send_message(channel_id, message::claim_announcement(assignee_id))
            .await?;

        tracing::info!("Ticket {} claimed by {}", channel_id, assignee_id);

        Ok(Ticket {
            claimed_by: Some(assignee_id),
            ..ticket
        })
    }
}
