//! Leaderboard domain models.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::util::parse::parse_stored_id;

/// One ranked row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: u64,
    pub count: i32,
}

impl LeaderboardEntry {
    pub fn from_client_points(entity: entity::client_points::Model) -> Result<Self, DbErr> {
        Ok(Self {
            user_id: parse_stored_id(&entity.user_id, "user_id")?,
            count: entity.points,
        })
    }

    pub fn from_middleman(entity: entity::middleman::Model) -> Result<Self, DbErr> {
        Ok(Self {
            user_id: parse_stored_id(&entity.user_id, "user_id")?,
            count: entity.completed,
        })
    }
}

/// Board the bot keeps a single message for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardKind {
    Clients,
    Middlemen,
    Quota,
}

impl BoardKind {
    /// Key stored in the `leaderboard_message` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Middlemen => "middlemen",
            Self::Quota => "quota",
        }
    }
}

/// Message a board currently lives in.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardMessage {
    pub channel_id: u64,
    pub message_id: u64,
    pub updated_at: DateTime<Utc>,
}

impl LeaderboardMessage {
    pub fn from_entity(entity: entity::leaderboard_message::Model) -> Result<Self, DbErr> {
        Ok(Self {
            channel_id: parse_stored_id(&entity.channel_id, "channel_id")?,
            message_id: parse_stored_id(&entity.message_id, "message_id")?,
            updated_at: entity.updated_at,
        })
    }
}
