//! Seam between the services and the chat platform.
//!
//! Services never talk to serenity's HTTP client directly; they go through
//! `ChatPlatform` so the ticket, leaderboard and vouch flows can run against an
//! in-memory platform in tests. Message payloads are serenity builders since
//! those are what the bot layer hands to Discord anyway.

use serenity::all::{CreateMessage, EditMessage};

use crate::{error::AppError, model::transcript::TranscriptLine};

/// Permission overwrite applied to a member or role on a ticket channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelAccess {
    /// View and post.
    ReadWrite,
    /// View but not post.
    ReadOnly,
    /// Neither view nor post.
    Hidden,
    /// Overwrite removed; falls back to the category's permissions.
    Cleared,
}

/// Channel to provision for a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketChannelSpec {
    pub category_id: u64,
    pub name: String,
    pub requester_id: u64,
    pub counterparty_id: Option<u64>,
    /// Role given access alongside the traders.
    pub staff_role_id: u64,
}

/// Message already present in a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub id: u64,
    pub author_id: u64,
    pub from_bot: bool,
    pub embed_titles: Vec<String>,
}

#[serenity::async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Channel in `category_id` the member already has a view overwrite on.
    async fn find_member_ticket_channel(
        &self,
        category_id: u64,
        user_id: u64,
    ) -> Result<Option<u64>, AppError>;

    /// Creates a text channel hidden from everyone but the traders and staff.
    async fn create_ticket_channel(&self, spec: &TicketChannelSpec) -> Result<u64, AppError>;

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError>;

    async fn rename_channel(&self, channel_id: u64, name: &str) -> Result<(), AppError>;

    async fn channel_name(&self, channel_id: u64) -> Result<String, AppError>;

    async fn set_member_access(
        &self,
        channel_id: u64,
        user_id: u64,
        access: ChannelAccess,
    ) -> Result<(), AppError>;

    async fn set_role_access(
        &self,
        channel_id: u64,
        role_id: u64,
        access: ChannelAccess,
    ) -> Result<(), AppError>;

    /// Sends a message and returns its id.
    async fn send_message(&self, channel_id: u64, message: CreateMessage) -> Result<u64, AppError>;

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: EditMessage,
    ) -> Result<(), AppError>;

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError>;

    /// Fetches one message; `None` when it no longer exists.
    async fn find_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<PostedMessage>, AppError>;

    /// Latest messages of a channel, newest first.
    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<PostedMessage>, AppError>;

    /// Entire history of a channel, oldest first.
    async fn channel_history(&self, channel_id: u64) -> Result<Vec<TranscriptLine>, AppError>;

    /// Non-bot members holding `role_id`.
    async fn role_members(&self, role_id: u64) -> Result<Vec<u64>, AppError>;
}
