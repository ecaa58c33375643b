//! Roblox lookups: `i`, `s` and `a`.

use chrono::Utc;

use crate::{
    bot::responder::Responder,
    error::AppError,
    service::roblox::{info_message, saved_message, RobloxService},
};

use super::{next_token, CommandContext};

/// `i <username>` shows a Roblox profile.
pub async fn info(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let (username, _) = next_token(cmd.args).ok_or_else(|| cmd.usage("i <username>"))?;

    cmd.responder.acknowledge(false).await?;
    let profile = cmd.handler.roblox.profile_by_username(username).await?;

    cmd.send(info_message(&profile, Utc::now())).await
}

/// `s <username|id>` saves the caller's Roblox account.
pub async fn save(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require_staff(cmd.config())?;
    let query = cmd.args.trim();
    if query.is_empty() {
        return Err(cmd.usage("s <username|id>"));
    }

    cmd.responder.acknowledge(false).await?;
    let details = RobloxService::new(cmd.db(), &cmd.handler.roblox)
        .save(cmd.caller.user_id, query)
        .await?;

    cmd.reply_text(format!(
        "✅ Saved Roblox user `{}` (ID: {}) for <@{}>",
        details.name, details.id, cmd.caller.user_id
    ))
    .await
}

/// `a [@member]` shows the account a member saved; defaults to the caller.
pub async fn saved(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require_staff(cmd.config())?;

    let (target_id, target_name) = match next_token(cmd.args) {
        Some((token, _)) => {
            let member = cmd.member(token).await?;
            (member.user.id.get(), member.display_name().to_string())
        }
        None => (cmd.caller.user_id, cmd.caller.display.clone()),
    };

    cmd.responder.acknowledge(false).await?;
    let profile = RobloxService::new(cmd.db(), &cmd.handler.roblox)
        .saved_profile(target_id)
        .await?;

    match profile {
        Some(profile) => cmd.send(saved_message(&profile, &target_name, Utc::now())).await,
        None => {
            cmd.reply_text(format!(
                "<@{}> has not saved a Roblox user yet. Use `{}s <robloxUser>`",
                target_id,
                cmd.config().command_prefix
            ))
            .await
        }
    }
}
