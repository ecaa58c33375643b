use serenity::all::{CreateEmbed, CreateMessage, EditMessage};
use tokio::sync::Mutex;

use crate::{
    data::leaderboard_message::LeaderboardMessageRepository, error::AppError,
    model::leaderboard::BoardKind,
};

use super::{render::title_marker, LeaderboardService};

/// Recent messages scanned for a board whose id is unknown.
const SCAN_LIMIT: u8 = 20;

static CLIENT_BOARD: Mutex<()> = Mutex::const_new(());
static MIDDLEMAN_BOARD: Mutex<()> = Mutex::const_new(());
static QUOTA_BOARD: Mutex<()> = Mutex::const_new(());

/// Held while a board is located and written, one board kind at a time.
fn board_lock(kind: BoardKind) -> &'static Mutex<()> {
    match kind {
        BoardKind::Clients => &CLIENT_BOARD,
        BoardKind::Middlemen => &MIDDLEMAN_BOARD,
        BoardKind::Quota => &QUOTA_BOARD,
    }
}

/// What happened to a board message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Edited { channel_id: u64, message_id: u64 },
    Created { channel_id: u64, message_id: u64 },
}

impl UpsertOutcome {
    pub fn channel_id(&self) -> u64 {
        match self {
            Self::Edited { channel_id, .. } | Self::Created { channel_id, .. } => *channel_id,
        }
    }

    pub fn message_id(&self) -> u64 {
        match self {
            Self::Edited { message_id, .. } | Self::Created { message_id, .. } => *message_id,
        }
    }
}

impl<'a> LeaderboardService<'a> {
    /// Edits the message a board lives in, or sends it when none exists.
    ///
    /// Candidates are tried in order: the remembered message for `kind` if it
    /// is in `channel_id`, then `configured_id`, then the newest bot message in
    /// the last 20 whose embed title contains the board's title. Whatever
    /// message ends up holding the board is remembered for next time.
    ///
    /// Refreshes of the same kind run one after another, so overlapping
    /// refreshes edit a single message instead of each sending one.
    ///
    /// # Arguments
    /// - `kind` - Board being rendered
    /// - `channel_id` - Channel the board belongs in
    /// - `configured_id` - Message id from configuration, if any
    /// - `embed` - Rendered board
    ///
    /// # Returns
    /// - `Ok(UpsertOutcome::Edited)` - An existing message was edited
    /// - `Ok(UpsertOutcome::Created)` - No existing message found, a new one was sent
    /// - `Err(AppError)` - Database or Discord failure
    pub async fn upsert_board(
        &self,
        kind: BoardKind,
        channel_id: u64,
        configured_id: Option<u64>,
        embed: CreateEmbed,
    ) -> Result<UpsertOutcome, AppError> {
        let _guard = board_lock(kind).lock().await;
        let board_repo = LeaderboardMessageRepository::new(self.db);

        let remembered = board_repo
            .get(kind)
            .await?
            .filter(|board| board.channel_id == channel_id)
            .map(|board| board.message_id);

        let mut candidates: Vec<u64> = remembered.into_iter().collect();
        if let Some(id) = configured_id {
            if !candidates.contains(&id) {
                candidates.push(id);
            }
        }

        let mut existing = None;
        for message_id in candidates {
            if self
                .platform
                .find_message(channel_id, message_id)
                .await?
                .is_some()
            {
                existing = Some(message_id);
                break;
            }
            tracing::debug!(
                "{} board message {} no longer exists in channel {}",
                kind.as_str(),
                message_id,
                channel_id
            );
        }

        if existing.is_none() {
            let marker = title_marker(kind);
            existing = self
                .platform
                .recent_messages(channel_id, SCAN_LIMIT)
                .await?
                .into_iter()
                .find(|message| {
                    message.from_bot
                        && message
                            .embed_titles
                            .iter()
                            .any(|title| title.contains(marker))
                })
                .map(|message| message.id);
        }

        let outcome = match existing {
            Some(message_id) => {
                self.platform
                    .edit_message(channel_id, message_id, EditMessage::new().embed(embed))
                    .await?;

                UpsertOutcome::Edited {
                    channel_id,
                    message_id,
                }
            }
            None => {
                let message_id = self
                    .platform
                    .send_message(channel_id, CreateMessage::new().embed(embed))
                    .await?;
                tracing::info!(
                    "Sent new {} board message {} in channel {}",
                    kind.as_str(),
                    message_id,
                    channel_id
                );

                UpsertOutcome::Created {
                    channel_id,
                    message_id,
                }
            }
        };

        board_repo
            .upsert(kind, channel_id, outcome.message_id())
            .await?;

        Ok(outcome)
    }
}
