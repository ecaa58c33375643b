use chrono::Utc;
use serenity::all::{
    ChannelId, EditMember, PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId,
    Timestamp, UserId,
};

use crate::{
    bot::responder::Reply,
    error::AppError,
    service::moderation::{
        member_action_embed, mod_embed, parse_duration, reason_or_default,
    },
    util::parse::parse_mention,
};

use super::{next_token, CommandContext};

/// Messages of the banned member deleted along with the ban, in days.
const BAN_DELETE_MESSAGE_DAYS: u8 = 0;

/// Splits `@member [reason]`.
fn target_and_reason<'a>(cmd: &CommandContext<'a>, usage: &str) -> Result<(&'a str, &'a str), AppError> {
    next_token(cmd.args).ok_or_else(|| cmd.usage(usage))
}

pub async fn ban(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require(Permissions::BAN_MEMBERS, "Ban Members")?;
    let (token, reason) = target_and_reason(cmd, "ban @user [reason]")?;
    let member = cmd.member(token).await?;
    let reason = reason_or_default(reason);

    cmd.guild_id
        .ban_with_reason(&cmd.ctx.http, member.user.id, BAN_DELETE_MESSAGE_DAYS, reason)
        .await?;

    tracing::info!("{} banned {}: {}", cmd.caller.user_id, member.user.id, reason);

    cmd.reply(Reply::embed(member_action_embed(
        "User Banned",
        member.user.id.get(),
        &member.user.name,
        reason,
        &cmd.caller.display,
    )))
    .await
}

pub async fn unban(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require(Permissions::BAN_MEMBERS, "Ban Members")?;
    let (token, reason) = target_and_reason(cmd, "unban <id> [reason]")?;
    let user_id = parse_mention(token)
        .map(UserId::new)
        .ok_or_else(|| AppError::BadRequest("Please give a user ID.".to_string()))?;
    let user = user_id.to_user(cmd.ctx).await?;
    let reason = reason_or_default(reason);

    cmd.guild_id.unban(&cmd.ctx.http, user_id).await?;

    tracing::info!("{} unbanned {}: {}", cmd.caller.user_id, user_id, reason);

    cmd.reply(Reply::embed(member_action_embed(
        "User Unbanned",
        user_id.get(),
        &user.name,
        reason,
        &cmd.caller.display,
    )))
    .await
}

pub async fn kick(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require(Permissions::KICK_MEMBERS, "Kick Members")?;
    let (token, reason) = target_and_reason(cmd, "kick @user [reason]")?;
    let member = cmd.member(token).await?;
    let reason = reason_or_default(reason);

    cmd.guild_id
        .kick_with_reason(&cmd.ctx.http, member.user.id, reason)
        .await?;

    tracing::info!("{} kicked {}: {}", cmd.caller.user_id, member.user.id, reason);

    cmd.reply(Reply::embed(member_action_embed(
        "User Kicked",
        member.user.id.get(),
        &member.user.name,
        reason,
        &cmd.caller.display,
    )))
    .await
}

/// `timeout @member <duration> [reason]`.
pub async fn timeout(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller
        .require(Permissions::MODERATE_MEMBERS, "Moderate Members")?;
    let usage = "timeout @user <10m|1h|..> [reason]";
    let (token, rest) = target_and_reason(cmd, usage)?;
    let (duration_text, reason) = next_token(rest).ok_or_else(|| cmd.usage(usage))?;

    let duration = parse_duration(duration_text)?;
    let member = cmd.member(token).await?;
    let reason = reason_or_default(reason);

    let until = Timestamp::from_unix_timestamp((Utc::now() + duration).timestamp())
        .map_err(|_| AppError::BadRequest("Invalid duration. Use like `10m`, `1h`.".to_string()))?;

    cmd.guild_id
        .edit_member(
            &cmd.ctx.http,
            member.user.id,
            EditMember::new()
                .disable_communication_until_datetime(until)
                .audit_log_reason(reason),
        )
        .await?;

    cmd.reply(Reply::embed(mod_embed(
        "User Timed Out",
        format!(
            "**User:** <@{}> ({})\n**Duration:** {}\n**Reason:** {}\n**Moderator:** {}",
            member.user.id, member.user.name, duration_text, reason, cmd.caller.display
        ),
    )))
    .await
}

pub async fn untimeout(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller
        .require(Permissions::MODERATE_MEMBERS, "Moderate Members")?;
    let (token, reason) = target_and_reason(cmd, "untimeout @user [reason]")?;
    let member = cmd.member(token).await?;
    let reason = reason_or_default(reason);

    cmd.guild_id
        .edit_member(
            &cmd.ctx.http,
            member.user.id,
            EditMember::new()
                .enable_communication()
                .audit_log_reason(reason),
        )
        .await?;

    cmd.reply(Reply::embed(member_action_embed(
        "Timeout Removed",
        member.user.id.get(),
        &member.user.name,
        reason,
        &cmd.caller.display,
    )))
    .await
}

/// `warn @member [reason]` only posts the warning.
pub async fn warn(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require(Permissions::KICK_MEMBERS, "Kick Members")?;
    let (token, reason) = target_and_reason(cmd, "warn @user [reason]")?;
    let member = cmd.member(token).await?;

    cmd.reply(Reply::embed(member_action_embed(
        "User Warned",
        member.user.id.get(),
        &member.user.name,
        reason_or_default(reason),
        &cmd.caller.display,
    )))
    .await
}

/// Sets whether `@everyone` may post in the current channel.
async fn set_everyone_send(cmd: &CommandContext<'_>, allowed: bool) -> Result<String, AppError> {
    cmd.caller
        .require(Permissions::MANAGE_CHANNELS, "Manage Channels")?;

    let (allow, deny) = if allowed {
        (Permissions::SEND_MESSAGES, Permissions::empty())
    } else {
        (Permissions::empty(), Permissions::SEND_MESSAGES)
    };
    let channel = ChannelId::new(cmd.channel_id());

    channel
        .create_permission(
            &cmd.ctx.http,
            PermissionOverwrite {
                allow,
                deny,
                kind: PermissionOverwriteType::Role(RoleId::new(cmd.guild_id.get())),
            },
        )
        .await?;

    let name = channel
        .to_channel(cmd.ctx)
        .await?
        .guild()
        .map(|channel| channel.name)
        .unwrap_or_else(|| channel.to_string());

    Ok(name)
}

pub async fn lock(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let name = set_everyone_send(cmd, false).await?;

    cmd.reply(Reply::embed(mod_embed(
        "Channel Locked",
        format!("**Channel:** {}\n**Locked by:** {}", name, cmd.caller.display),
    )))
    .await
}

pub async fn unlock(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let name = set_everyone_send(cmd, true).await?;

    cmd.reply(Reply::embed(mod_embed(
        "Channel Unlocked",
        format!("**Channel:** {}\n**Unlocked by:** {}", name, cmd.caller.display),
    )))
    .await
}

/// `mmban @member [reason]` gives the member the MM Banned role.
pub async fn mm_ban(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require(Permissions::MANAGE_ROLES, "Manage Roles")?;
    let role_id = cmd
        .config()
        .mm_banned_role_id
        .ok_or_else(|| AppError::NotFound("MM Banned role not found.".to_string()))?;
    let (token, reason) = target_and_reason(cmd, "mmban @user [reason]")?;
    let member = cmd.member(token).await?;
    let reason = reason_or_default(reason);

    cmd.ctx
        .http
        .add_member_role(cmd.guild_id, member.user.id, RoleId::new(role_id), Some(reason))
        .await?;

    cmd.reply(Reply::embed(mod_embed(
        "Middleman Banned",
        format!(
            "**User:** <@{}> ({})\n**Reason:** {}\n**Moderator:** {}\n**Action:** Added MM Banned role",
            member.user.id, member.user.name, reason, cmd.caller.display
        ),
    )))
    .await
}

/// `role @member @role [reason]`.
pub async fn role(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require(Permissions::MANAGE_ROLES, "Manage Roles")?;
    let usage = "role @user @role [reason]";
    let (token, rest) = target_and_reason(cmd, usage)?;
    let (role_token, reason) = next_token(rest).ok_or_else(|| cmd.usage(usage))?;
    let role_id = parse_mention(role_token)
        .ok_or_else(|| AppError::BadRequest("Please mention a role.".to_string()))?;
    let member = cmd.member(token).await?;
    let reason = reason_or_default(reason);

    cmd.ctx
        .http
        .add_member_role(cmd.guild_id, member.user.id, RoleId::new(role_id), Some(reason))
        .await?;

    cmd.reply(Reply::embed(mod_embed(
        "Role Assigned",
        format!(
            "**User:** <@{}> ({})\n**Role:** <@&{}>\n**Reason:** {}\n**Moderator:** {}",
            member.user.id, member.user.name, role_id, reason, cmd.caller.display
        ),
    )))
    .await
}
