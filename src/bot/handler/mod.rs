use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, GuildChannel, Interaction, Member, Message, Ready};
use serenity::async_trait;

use crate::{
    config::Config,
    service::{roblox::RobloxClient, sticky::StickyStore, vouch::VouchTracker},
};

pub mod channel;
pub mod interaction;
pub mod member;
pub mod message;
pub mod ready;

/// Discord bot event handler
///
/// Owns the in-memory stores; they live as long as the gateway connection and
/// are empty again after a restart.
pub struct Handler {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub vouches: VouchTracker,
    pub stickies: StickyStore,
    pub roblox: RobloxClient,
}

impl Handler {
    pub fn new(db: DatabaseConnection, config: Arc<Config>, roblox: RobloxClient) -> Self {
        Self {
            db,
            config,
            vouches: VouchTracker::new(),
            stickies: StickyStore::new(),
            roblox,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(self, ctx, message).await;
    }

    /// Called when a button is pressed or a modal is submitted
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self, ctx, interaction).await;
    }

    /// Called when a channel is deleted from a guild
    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        messages: Option<Vec<Message>>,
    ) {
        channel::handle_channel_delete(self, ctx, channel, messages).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(self, ctx, new_member).await;
    }
}
