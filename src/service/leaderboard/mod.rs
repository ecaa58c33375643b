//! Client and middleman leaderboards.
//!
//! Each board lives in exactly one message that the bot keeps editing. The
//! message is located by the id remembered in `leaderboard_message` (or the
//! configured `LB_MESSAGE_ID`), then by scanning recent channel history for
//! the board's title; only when both fail is a new message sent.
//!
//! - `render` - Ranked text and embeds
//! - `upsert` - Locating, editing or creating the board message

pub mod render;
pub mod upsert;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    data::{client_points::ClientPointsRepository, middleman::MiddlemanRepository},
    error::AppError,
    model::leaderboard::BoardKind,
    service::platform::ChatPlatform,
};

pub use upsert::UpsertOutcome;

/// Rows shown on a board.
pub const BOARD_SIZE: u64 = 10;

pub struct LeaderboardService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn ChatPlatform,
    config: &'a Config,
}

impl<'a> LeaderboardService<'a> {
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

    /// Re-renders the client board from current points.
    ///
    /// # Returns
    /// - `Ok(UpsertOutcome)` - Board edited in place or newly sent
    /// - `Err(AppError::DbErr)` - Failed to read points
    /// - `Err(AppError::DiscordErr)` - Failed to edit or send the board
    pub async fn refresh_clients(&self) -> Result<UpsertOutcome, AppError> {
        let entries = ClientPointsRepository::new(self.db)
            .top(BOARD_SIZE)
            .await?;
        let embed = render::client_board_embed(&entries);

        self.upsert_board(
            BoardKind::Clients,
            self.config.lb_channel_id,
            self.config.lb_message_id,
            embed,
        )
        .await
    }

    /// Re-renders the middleman board from completed ticket counts.
    pub async fn refresh_middlemen(&self) -> Result<UpsertOutcome, AppError> {
        let entries = MiddlemanRepository::new(self.db).top(BOARD_SIZE).await?;
        let embed = render::middleman_board_embed(&entries);

        self.upsert_board(
            BoardKind::Middlemen,
            self.config.mm_lb_channel_id,
            None,
            embed,
        )
        .await
    }

    /// Zeroes every client's points and refreshes the board.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of records reset
    pub async fn reset_clients(&self) -> Result<u64, AppError> {
        let reset = ClientPointsRepository::new(self.db).reset_all().await?;
        tracing::info!("Reset points for {} clients", reset);

        self.refresh_clients().await?;

        Ok(reset)
    }

    /// Zeroes every middleman's completed count and refreshes the board.
    pub async fn reset_middlemen(&self) -> Result<u64, AppError> {
        let reset = MiddlemanRepository::new(self.db).reset_all().await?;
        tracing::info!("Reset completed counts for {} middlemen", reset);

        self.refresh_middlemen().await?;

        Ok(reset)
    }
}
