//! Ticket lifecycle.
//!
//! A ticket is a channel in the ticket category plus its `ticket` record. The
//! service moves it through request, claim, close and deletion, keeping the
//! channel's permission overwrites and the stored record in step.
//!
//! - `create` - Provisioning a channel for a middleman request
//! - `claim` - Assigning a middleman
//! - `close` - Closing, with middleman and quota bookkeeping
//! - `points` - Client points for a finished ticket
//! - `manage` - Staff commands run inside a ticket
//! - `message` - Panels, intros and other ticket messages

pub mod claim;
pub mod close;
pub mod create;
pub mod manage;
pub mod message;
pub mod points;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    data::ticket::TicketRepository,
    error::{ticket::TicketError, AppError},
    model::ticket::Ticket,
    service::platform::ChatPlatform,
};

pub use create::TicketRequest;

pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn ChatPlatform,
    config: &'a Config,
}

impl<'a> TicketService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        platform: &'a dyn ChatPlatform,
        config: &'a Config,
    ) -> Self {
        Self {
            db,
            platform,
            config,
        }
    }

    /// Fails with `NotTicketChannel` unless `parent_id` is the ticket category.
    pub fn require_ticket_channel(&self, parent_id: Option<u64>) -> Result<(), AppError> {
        if parent_id == Some(self.config.ticket_category_id) {
            Ok(())
        } else {
            Err(TicketError::NotTicketChannel.into())
        }
    }

    /// Loads the ticket hosted in `channel_id`.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Ticket record found
    /// - `Err(AppError::Ticket(TicketNotFound))` - No record for the channel
    pub async fn get(&self, channel_id: u64) -> Result<Ticket, AppError> {
        TicketRepository::new(self.db)
            .find_by_channel_id(channel_id)
            .await?
            .ok_or_else(|| TicketError::TicketNotFound.into())
    }
}
