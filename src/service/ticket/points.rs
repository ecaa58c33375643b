use crate::{
    data::client_points::ClientPointsRepository,
    error::{ticket::TicketError, AppError},
};

use super::TicketService;

impl<'a> TicketService<'a> {
    /// Gives each trader on the ticket one client point.
    ///
    /// Not idempotent: every call awards another point.
    ///
    /// # Returns
    /// - `Ok(Vec<u64>)` - Traders who received a point
    /// - `Err(AppError::Ticket(TicketNotFound))` - No record for the channel
    /// - `Err(AppError::Ticket(NoParticipants))` - Record names no traders
    pub async fn log_points(&self, channel_id: u64) -> Result<Vec<u64>, AppError> {
        let ticket = self.get(channel_id).await?;

        let user_ids = ticket.participants();
        if user_ids.is_empty() {
            return Err(TicketError::NoParticipants.into());
        }

        let points_repo = ClientPointsRepository::new(self.db);
        for user_id in &user_ids {
            points_repo.increment(*user_id).await?;
        }

        tracing::info!("Logged points for {:?} in ticket {}", user_ids, channel_id);

        Ok(user_ids)
    }
}

/// Confirmation shown after logging points.
pub fn logged_points_message(user_ids: &[u64]) -> String {
    let mentions = user_ids
        .iter()
        .map(|id| format!("<@{}>", id))
        .collect::<Vec<_>>()
        .join(", ");

    format!("✅ Logged 1 point for {}.", mentions)
}
