//! Message event handler.
//!
//! Every guild message from a human passes through four stages in order:
//! auto-reacting in the vouches channel, moving the channel's sticky message
//! back to the bottom, running a prefix command, and, for anything that is not
//! a command, vouch detection.

use chrono::Utc;
use serenity::all::{Context, EmojiId, GuildId, Message, ReactionType};

use crate::{
    bot::{
        command::{dispatch, parse_command, CommandContext},
        handler::Handler,
        permission::Caller,
        platform::DiscordPlatform,
        responder::{CommandResponder, Responder, Reply},
    },
    config::ReactionEmoji,
    error::AppError,
    service::vouch::{IncomingMessage, VouchService},
};

/// Handles the message event for a new message.
///
/// # Arguments
/// - `handler` - Shared bot state
/// - `ctx` - Discord context
/// - `message` - The newly posted message
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }
    let Some(guild_id) = message.guild_id else {
        return;
    };
    let channel_id = message.channel_id.get();
    let platform = DiscordPlatform::new(ctx.http.clone(), guild_id);

    if Some(channel_id) == handler.config.vouches_channel_id {
        if let Some(emoji) = &handler.config.auto_react_emoji {
            if let Err(e) = message.react(&ctx.http, reaction(emoji)).await {
                tracing::warn!("Failed to react to {} in {}: {}", message.id, channel_id, e);
            }
        }
    }

    if let Err(e) = handler.stickies.repost(&platform, channel_id).await {
        tracing::error!("Failed to repost sticky in {}: {}", channel_id, e);
    }

    if let Some((name, args)) = parse_command(&message.content, &handler.config.command_prefix) {
        run_command(handler, &ctx, &message, guild_id, platform, &name, args).await;
        return;
    }

    let incoming = IncomingMessage {
        channel_id,
        author_id: message.author.id.get(),
        author_name: message.author.display_name().to_string(),
        author_avatar: message.author.avatar_url(),
        content: message.content.clone(),
        jump_url: message.link(),
    };

    if let Err(e) = VouchService::new(&handler.db, &platform, &handler.config, &handler.vouches)
        .handle_message(&incoming, Utc::now())
        .await
    {
        tracing::debug!("Vouch detection for {} failed: {}", message.id, e);
    }
}

fn reaction(emoji: &ReactionEmoji) -> ReactionType {
    ReactionType::Custom {
        animated: false,
        id: EmojiId::new(emoji.id),
        name: Some(emoji.name.clone()),
    }
}

/// Runs a prefix command, answering failures in the channel.
async fn run_command(
    handler: &Handler,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
    platform: DiscordPlatform,
    name: &str,
    args: &str,
) {
    let responder = CommandResponder::new(ctx.http.clone(), message.channel_id, message.id);

    let caller = match resolve_caller(ctx, guild_id, message).await {
        Ok(caller) => caller,
        Err(e) => {
            tracing::error!("Failed to resolve caller {}: {}", message.author.id, e);
            if let Err(e) = responder.reply(Reply::text(e.user_message())).await {
                tracing::error!("Failed to answer command {}: {}", name, e);
            }
            return;
        }
    };

    let cmd = CommandContext {
        ctx,
        handler,
        message,
        guild_id,
        caller,
        platform,
        responder,
        args,
    };

    tracing::debug!("{} ran {} in {}", cmd.caller.user_id, name, message.channel_id);

    if let Err(e) = dispatch(&cmd, name).await {
        tracing::error!("Command {} failed for {}: {}", name, cmd.caller.user_id, e);
        if let Err(e) = cmd.reply_text(e.user_message()).await {
            tracing::error!("Failed to answer command {}: {}", name, e);
        }
    }
}

async fn resolve_caller(
    ctx: &Context,
    guild_id: GuildId,
    message: &Message,
) -> Result<Caller, AppError> {
    let member = guild_id.member(ctx, message.author.id).await?;

    Caller::resolve(ctx, guild_id, &member).await
}
