//! Ready event handler.
//!
//! Fired once the gateway handshake completes. Besides logging the connection,
//! it makes sure the weekly quota board exists in the quota channel; the board
//! is edited in place when it is already there.

use serenity::all::{ActivityData, ChannelId, Context, Ready};

use crate::{
    bot::{handler::Handler, platform::DiscordPlatform},
    service::quota::QuotaService,
};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `handler` - Shared bot state
/// - `ctx` - Discord context for setting activity status and REST calls
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("middleman tickets")));

    let Some(quota_channel_id) = handler.config.quota_channel_id else {
        tracing::debug!("No quota channel configured; skipping quota board");
        return;
    };

    let guild_id = match ChannelId::new(quota_channel_id).to_channel(&ctx).await {
        Ok(channel) => match channel.guild() {
            Some(channel) => channel.guild_id,
            None => {
                tracing::warn!("Quota channel {} is not a guild channel", quota_channel_id);
                return;
            }
        },
        Err(e) => {
            tracing::error!("Failed to fetch quota channel {}: {}", quota_channel_id, e);
            return;
        }
    };

    let platform = DiscordPlatform::new(ctx.http.clone(), guild_id);
    match QuotaService::new(&handler.db, &platform, &handler.config)
        .post_board()
        .await
    {
        Ok(Some(outcome)) => tracing::info!("Quota board ready: {:?}", outcome),
        Ok(None) => {}
        Err(e) => tracing::error!("Failed to post quota board: {}", e),
    }
}
