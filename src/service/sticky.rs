//! Sticky messages: a message kept at the bottom of a channel.

use std::{collections::HashMap, sync::Arc};

use serenity::all::CreateMessage;
use tokio::sync::RwLock;

use crate::{error::AppError, service::platform::ChatPlatform};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Sticky {
    content: String,
    message_id: u64,
}

/// In-memory sticky messages keyed by channel. Cleared on restart.
#[derive(Clone, Default)]
pub struct StickyStore {
    stickies: Arc<RwLock<HashMap<u64, Sticky>>>,
}

impl StickyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts `content` in `channel_id` and keeps it there.
    ///
    /// Replaces any sticky already set for the channel; the old message is
    /// left in place.
    pub async fn set(
        &self,
        platform: &dyn ChatPlatform,
        channel_id: u64,
        content: &str,
    ) -> Result<(), AppError> {
        let message_id = platform
            .send_message(channel_id, CreateMessage::new().content(content))
            .await?;

        self.stickies.write().await.insert(
            channel_id,
            Sticky {
                content: content.to_string(),
                message_id,
            },
        );

        Ok(())
    }

    /// Re-sends the channel's sticky below the newest message.
    ///
    /// # Returns
    /// - `Ok(true)` - The sticky was moved
    /// - `Ok(false)` - No sticky set for the channel
    pub async fn repost(&self, platform: &dyn ChatPlatform, channel_id: u64) -> Result<bool, AppError> {
        let Some(sticky) = self.stickies.read().await.get(&channel_id).cloned() else {
            return Ok(false);
        };

        // The previous copy may already be gone.
        if let Err(e) = platform.delete_message(channel_id, sticky.message_id).await {
            tracing::debug!("Old sticky {} in {} not deleted: {}", sticky.message_id, channel_id, e);
        }

        let message_id = platform
            .send_message(channel_id, CreateMessage::new().content(&sticky.content))
            .await?;

        if let Some(entry) = self.stickies.write().await.get_mut(&channel_id) {
            entry.message_id = message_id;
        }

        Ok(true)
    }

    pub async fn message_id(&self, channel_id: u64) -> Option<u64> {
        self.stickies
            .read()
            .await
            .get(&channel_id)
            .map(|sticky| sticky.message_id)
    }
}
