use crate::{
    data::{client_points::ClientPointsRepository, ticket::TicketRepository},
    error::{ticket::TicketError, AppError},
    model::ticket::{CreateTicketParam, TradeDetails},
    service::platform::TicketChannelSpec,
};

use super::{message, TicketService};

/// A submitted middleman request.
#[derive(Debug, Clone)]
pub struct TicketRequest {
    pub requester_id: u64,
    pub requester_name: String,
    pub counterparty_id: Option<u64>,
    pub details: TradeDetails,
}

/// Channel name for a requester's ticket.
///
/// Discord channel names are lowercase without spaces; anything else is
/// dropped. Falls back to the requester id when nothing usable is left.
pub fn ticket_channel_name(requester_name: &str, requester_id: u64) -> String {
    let slug: String = requester_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if slug.is_empty() {
        format!("ticket-{}", requester_id)
    } else {
        format!("ticket-{}", slug)
    }
}

impl<'a> TicketService<'a> {
    /// Opens a ticket channel for a middleman request.
    ///
    /// Refuses when the requester can already see a channel in the ticket
    /// category; in that case nothing is created. If the record cannot be
    /// stored after the channel was created, the channel is deleted again.
    ///
    /// # Arguments
    /// - `request` - Requester, optional counterparty and trade details
    ///
    /// # Returns
    /// - `Ok(u64)` - Id of the new ticket channel
    /// - `Err(AppError::Ticket(DuplicateOpenTicket))` - Requester already has a ticket
    /// - `Err(AppError::DbErr)` - Record could not be stored; channel removed
    /// - `Err(AppError::DiscordErr)` - Channel creation or intro failed
    pub async fn create_ticket(&self, request: TicketRequest) -> Result<u64, AppError> {
        let category_id = self.config.ticket_category_id;

        if let Some(channel_id) = self
            .platform
            .find_member_ticket_channel(category_id, request.requester_id)
            .await?
        {
            return Err(TicketError::DuplicateOpenTicket { channel_id }.into());
        }

        let counterparty_id = request
            .counterparty_id
            .filter(|id| *id != request.requester_id);

        let spec = TicketChannelSpec {
            category_id,
            name: ticket_channel_name(&request.requester_name, request.requester_id),
            requester_id: request.requester_id,
            counterparty_id,
            staff_role_id: self.config.middleman_role_id,
        };
        let channel_id = self.platform.create_ticket_channel(&spec).await?;

        let ticket = match TicketRepository::new(self.db)
            .create(CreateTicketParam {
                channel_id,
                user1: request.requester_id,
                user2: counterparty_id,
                details: request.details,
            })
            .await
        {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::error!(
                    "Failed to store ticket for channel {}, removing channel: {}",
                    channel_id,
                    e
                );
                if let Err(cleanup) = self.platform.delete_channel(channel_id).await {
                    tracing::error!(
                        "Failed to remove orphaned ticket channel {}: {}",
                        channel_id,
                        cleanup
                    );
                }
                return Err(e.into());
            }
        };

        let points_repo = ClientPointsRepository::new(self.db);
        let requester_count = points_repo.get_points(ticket.user1).await?;
        let counterparty_count = match ticket.user2 {
            Some(user_id) => Some(points_repo.get_points(user_id).await?),
            None => None,
        };

        self.platform
            .send_message(
                channel_id,
                message::trade_intro(&ticket, self.config, requester_count, counterparty_count),
            )
            .await?;

        tracing::info!(
            "Opened ticket {} for {} (counterparty: {:?})",
            channel_id,
            ticket.user1,
            ticket.user2
        );

        Ok(channel_id)
    }
}
