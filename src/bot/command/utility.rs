//! Sticky messages, crypto addresses, server panels, vouch requests, `say`
//! and `help`.

use serenity::all::{CreateEmbed, CreateEmbedFooter, CreateMessage, Permissions, Timestamp};

use crate::{
    bot::responder::Reply,
    error::AppError,
    model::{component::Game, crypto::Currency},
    service::{
        crypto::CryptoService, moderation, platform::ChatPlatform, servers as game_servers,
        ticket::TicketService,
        EMBED_COLOR,
    },
};

use super::{next_token, CommandContext, COMMANDS};

const HELP_COLOR: u32 = 0x00FF00;

/// `setsticky #channel <message>`.
pub async fn set_sticky(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller
        .require(Permissions::MANAGE_MESSAGES, "Manage Messages")?;

    let (channel, content) = next_token(cmd.args)
        .filter(|(_, content)| !content.is_empty())
        .ok_or_else(|| cmd.usage("setsticky #channel <message>"))?;
    let channel = cmd.channel_or_current(Some(channel))?;

    cmd.handler
        .stickies
        .set(&cmd.platform, channel.get(), content)
        .await?;

    cmd.reply_text(format!("✅ Sticky message set in <#{}>", channel))
        .await
}

async fn save_address(cmd: &CommandContext<'_>, currency: Currency) -> Result<(), AppError> {
    cmd.caller.require_staff(cmd.config())?;

    let address = next_token(cmd.args).map(|(address, _)| address).unwrap_or("");
    CryptoService::new(cmd.db(), cmd.config())
        .save(cmd.caller.user_id, currency, address)
        .await?;

    cmd.say(format!(
        "✅ Saved your **{}** address: `{}`",
        currency, address
    ))
    .await
}

pub async fn save_ltc(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    save_address(cmd, Currency::Ltc).await
}

pub async fn save_eth(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    save_address(cmd, Currency::Eth).await
}

/// `servers <gag|mm2|sab>` inside a ticket.
pub async fn servers(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let game = next_token(cmd.args)
        .and_then(|(key, _)| Game::from_key(key))
        .ok_or_else(|| AppError::BadRequest("Choose one: gag | mm2 | sab".to_string()))?;

    TicketService::new(cmd.db(), &cmd.platform, cmd.config())
        .require_ticket_channel(cmd.parent_id().await?)?;

    let (embed, components) = game_servers::options_panel(game);
    cmd.reply(Reply::embed(embed).with_components(components))
        .await
}

/// `vouch @member` asks a member by DM to vouch for the caller.
pub async fn vouch_request(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require_staff(cmd.config())?;

    let (token, _) = next_token(cmd.args).ok_or_else(|| cmd.usage("vouch @user"))?;
    let member = cmd.member(token).await?;

    let embed = vouch_request_embed(
        member.user.id.get(),
        cmd.caller.user_id,
        &cmd.caller.display,
        &cmd.message.author.face(),
    );

    if let Err(e) = member
        .user
        .direct_message(cmd.ctx, CreateMessage::new().embed(embed))
        .await
    {
        tracing::warn!("Failed to DM vouch request to {}: {}", member.user.id, e);
        return cmd
            .say(format!(
                "❌ I couldn't DM <@{}>. They may have DMs disabled.",
                member.user.id
            ))
            .await;
    }

    cmd.say_embed(
        CreateEmbed::new()
            .description(format!(
                "A vouch request has been sent to <@{}>.",
                member.user.id
            ))
            .color(EMBED_COLOR),
    )
    .await
}

fn vouch_request_embed(
    member_id: u64,
    requester_id: u64,
    requester_name: &str,
    requester_avatar: &str,
) -> CreateEmbed {
    CreateEmbed::new()
        .title("Vouch Request")
        .description(format!(
            "Hello <@{}>,\n\n\
             <@{}> has requested a vouch from you.\n\n\
             If you have traded or interacted with them, please consider leaving a vouch \
             to help build their credibility.",
            member_id, requester_id
        ))
        .color(EMBED_COLOR)
        .footer(
            CreateEmbedFooter::new(format!("Requested by {}", requester_name))
                .icon_url(requester_avatar),
        )
        .timestamp(Timestamp::now())
}

/// Deletes the invoking message so only the bot's post remains.
async fn delete_invocation(cmd: &CommandContext<'_>) {
    if let Err(e) = cmd
        .platform
        .delete_message(cmd.channel_id(), cmd.message.id.get())
        .await
    {
        tracing::debug!("Could not delete command message {}: {}", cmd.message.id, e);
    }
}

/// `say <message>`.
pub async fn say(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require_admin()?;

    let content = cmd.args.trim();
    if content.is_empty() {
        return Err(cmd.usage("say <message>"));
    }

    delete_invocation(cmd).await;
    cmd.say(content).await
}

/// `sayembed title: .. description: .. [footer: ..] [thumbnail: ..] [image: ..]`.
pub async fn say_embed(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require_admin()?;

    let embed = moderation::say_embed(cmd.args)?;

    delete_invocation(cmd).await;
    cmd.say_embed(embed).await
}

pub async fn help(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.say_embed(
        CreateEmbed::new()
            .title("Bot Commands")
            .description(help_text(&cmd.config().command_prefix))
            .color(HELP_COLOR),
    )
    .await
}

fn help_text(prefix: &str) -> String {
    let mut lines = vec!["Here are all available commands for this bot:\n".to_string()];
    lines.extend(
        COMMANDS
            .iter()
            .map(|(usage, description)| format!("`{}{}` — {}", prefix, usage, description)),
    );
    lines.join("\n")
}
