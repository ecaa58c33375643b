//! Channel event handlers.
//!
//! A ticket's record lives exactly as long as its channel: whoever deletes the
//! channel, through the bot or by hand, the record and any vouches collected
//! for it are dropped here. Every deleted guild channel is checked, since a
//! ticket may have been moved out of the ticket category first.

use serenity::all::{Context, GuildChannel, Message};

use crate::{
    bot::{handler::Handler, platform::DiscordPlatform},
    service::ticket::TicketService,
};

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// # Arguments
/// - `handler` - Shared bot state
/// - `ctx` - Discord context
/// - `channel` - The deleted guild channel
/// - `_messages` - Messages that were in the channel if available (unused)
pub async fn handle_channel_delete(
    handler: &Handler,
    ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let channel_id = channel.id.get();

    let platform = DiscordPlatform::new(ctx.http.clone(), channel.guild_id);
    if let Err(e) = TicketService::new(&handler.db, &platform, &handler.config)
        .delete_ticket_record(channel_id)
        .await
    {
        tracing::error!("Failed to delete ticket record for {}: {}", channel_id, e);
    }

    handler.vouches.clear(channel_id).await;
}
