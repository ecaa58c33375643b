//! Transcript domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of messages a user posted in a ticket.
///
/// Serialized as `{"userId": "...", "count": n}` in the transcript record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantCount {
    #[serde(with = "snowflake")]
    pub user_id: u64,
    pub count: usize,
}

/// One message of a ticket's history, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    pub author_id: u64,
    pub author_name: String,
    pub author_is_bot: bool,
    pub content: String,
    pub has_embeds: bool,
    pub has_attachments: bool,
    pub timestamp: DateTime<Utc>,
}

/// Parameters for recording a generated transcript.
#[derive(Debug, Clone)]
pub struct CreateTranscriptParam {
    pub channel_id: u64,
    pub channel_name: String,
    pub participants: Vec<ParticipantCount>,
}

/// Snowflakes travel as strings in JSON so they survive JavaScript readers.
mod snowflake {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
