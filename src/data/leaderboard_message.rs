//! Remembers which message each board lives in.
//!
//! A restart reads the stored id back so it edits the old board instead of
//! posting a second one.

use chrono::Utc;
use sea_orm::{sea_query::OnConflict, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::model::leaderboard::{BoardKind, LeaderboardMessage};

pub struct LeaderboardMessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeaderboardMessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the remembered message for `kind`.
    pub async fn get(&self, kind: BoardKind) -> Result<Option<LeaderboardMessage>, DbErr> {
        entity::prelude::LeaderboardMessage::find_by_id(kind.as_str().to_string())
            .one(self.db)
            .await?
            .map(LeaderboardMessage::from_entity)
            .transpose()
    }

    /// Creates or updates the remembered message for `kind`.
    ///
    /// # Arguments
    /// - `kind` - Board the message shows
    /// - `channel_id` - Channel the message was posted in
    /// - `message_id` - Message to edit on the next refresh
    pub async fn upsert(
        &self,
        kind: BoardKind,
        channel_id: u64,
        message_id: u64,
    ) -> Result<LeaderboardMessage, DbErr> {
        let entity = entity::prelude::LeaderboardMessage::insert(
            entity::leaderboard_message::ActiveModel {
                kind: ActiveValue::Set(kind.as_str().to_string()),
                channel_id: ActiveValue::Set(channel_id.to_string()),
                message_id: ActiveValue::Set(message_id.to_string()),
                updated_at: ActiveValue::Set(Utc::now()),
            },
        )
        .on_conflict(
            OnConflict::column(entity::leaderboard_message::Column::Kind)
                .update_columns([
                    entity::leaderboard_message::Column::ChannelId,
                    entity::leaderboard_message::Column::MessageId,
                    entity::leaderboard_message::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        LeaderboardMessage::from_entity(entity)
    }
}
