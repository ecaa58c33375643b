//! Service tests against an in-memory chat platform.

use std::{collections::HashMap, sync::Mutex};

use serde_json::Value;
use serenity::all::{CreateMessage, EditMessage};

use crate::{
    error::AppError,
    model::transcript::TranscriptLine,
    service::platform::{ChannelAccess, ChatPlatform, PostedMessage, TicketChannelSpec},
};

mod leaderboard;
mod quota;
mod sticky;
mod ticket;

/// Everything the services did to the platform, plus what it pretends exists.
#[derive(Default)]
pub struct MockState {
    next_id: u64,
    pub created_channels: Vec<TicketChannelSpec>,
    pub deleted_channels: Vec<u64>,
    /// `(channel, message payload)` in send order.
    pub sent: Vec<(u64, Value)>,
    /// `(channel, message, payload)` in edit order.
    pub edited: Vec<(u64, u64, Value)>,
    pub deleted_messages: Vec<(u64, u64)>,
    pub member_access: Vec<(u64, u64, ChannelAccess)>,
    pub role_access: Vec<(u64, u64, ChannelAccess)>,
    /// Requester id to the ticket channel they can already see.
    pub open_ticket_channels: HashMap<u64, u64>,
    /// Messages per channel, newest first.
    pub messages: HashMap<u64, Vec<PostedMessage>>,
    pub history: HashMap<u64, Vec<TranscriptLine>>,
    pub role_members: Vec<u64>,
    /// Makes every message send fail.
    pub fail_sends: bool,
}

pub struct MockPlatform {
    pub state: Mutex<MockState>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                next_id: 1000,
                ..Default::default()
            }),
        }
    }

    pub fn with_state(f: impl FnOnce(&mut MockState)) -> Self {
        let platform = Self::new();
        f(&mut platform.state.lock().unwrap());
        platform
    }

    /// Payloads sent to `channel_id`, oldest first.
    pub fn sent_to(&self, channel_id: u64) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .sent
            .iter()
            .filter(|(channel, _)| *channel == channel_id)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    pub fn sent_count(&self) -> usize {
        self.state.lock().unwrap().sent.len()
    }

    pub fn edited_count(&self) -> usize {
        self.state.lock().unwrap().edited.len()
    }

    /// Pretends a bot message with one embed titled `title` exists.
    pub fn seed_bot_message(&self, channel_id: u64, message_id: u64, title: &str) {
        self.state
            .lock()
            .unwrap()
            .messages
            .entry(channel_id)
            .or_default()
            .insert(
                0,
                PostedMessage {
                    id: message_id,
                    author_id: 999,
                    from_bot: true,
                    embed_titles: vec![title.to_string()],
                },
            );
    }
}

/// Titles of the embeds in a serialized message payload.
pub fn embed_titles(payload: &Value) -> Vec<String> {
    payload["embeds"]
        .as_array()
        .map(|embeds| {
            embeds
                .iter()
                .filter_map(|embed| embed["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn mock_failure() -> AppError {
    AppError::ExternalService("mock platform failure".to_string())
}

#[serenity::async_trait]
impl ChatPlatform for MockPlatform {
    async fn find_member_ticket_channel(
        &self,
        _category_id: u64,
        user_id: u64,
    ) -> Result<Option<u64>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .open_ticket_channels
            .get(&user_id)
            .copied())
    }

    async fn create_ticket_channel(&self, spec: &TicketChannelSpec) -> Result<u64, AppError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.created_channels.push(spec.clone());
        Ok(state.next_id)
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        self.state.lock().unwrap().deleted_channels.push(channel_id);
        Ok(())
    }

    async fn rename_channel(&self, _channel_id: u64, _name: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn channel_name(&self, channel_id: u64) -> Result<String, AppError> {
        Ok(format!("ticket-{}", channel_id))
    }

    async fn set_member_access(
        &self,
        channel_id: u64,
        user_id: u64,
        access: ChannelAccess,
    ) -> Result<(), AppError> {
        self.state
            .lock()
            .unwrap()
            .member_access
            .push((channel_id, user_id, access));
        Ok(())
    }

    async fn set_role_access(
        &self,
        channel_id: u64,
        role_id: u64,
        access: ChannelAccess,
    ) -> Result<(), AppError> {
        self.state
            .lock()
            .unwrap()
            .role_access
            .push((channel_id, role_id, access));
        Ok(())
    }

    async fn send_message(&self, channel_id: u64, message: CreateMessage) -> Result<u64, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_sends {
            return Err(mock_failure());
        }

        let payload = serde_json::to_value(&message).unwrap();
        state.next_id += 1;
        let message_id = state.next_id;

        let posted = PostedMessage {
            id: message_id,
            author_id: 999,
            from_bot: true,
            embed_titles: embed_titles(&payload),
        };
        state.messages.entry(channel_id).or_default().insert(0, posted);
        state.sent.push((channel_id, payload));

        Ok(message_id)
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: EditMessage,
    ) -> Result<(), AppError> {
        let payload = serde_json::to_value(&message).unwrap();
        self.state
            .lock()
            .unwrap()
            .edited
            .push((channel_id, message_id, payload));
        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if let Some(messages) = state.messages.get_mut(&channel_id) {
            messages.retain(|message| message.id != message_id);
        }
        state.deleted_messages.push((channel_id, message_id));
        Ok(())
    }

    async fn find_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<PostedMessage>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .messages
            .get(&channel_id)
            .and_then(|messages| messages.iter().find(|m| m.id == message_id).cloned()))
    }

    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<PostedMessage>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .messages
            .get(&channel_id)
            .map(|messages| messages.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn channel_history(&self, channel_id: u64) -> Result<Vec<TranscriptLine>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .history
            .get(&channel_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn role_members(&self, _role_id: u64) -> Result<Vec<u64>, AppError> {
        Ok(self.state.lock().unwrap().role_members.clone())
    }
}
