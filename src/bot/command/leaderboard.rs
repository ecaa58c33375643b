use crate::{
    bot::responder::Reply,
    error::AppError,
    service::{
        leaderboard::{LeaderboardService, UpsertOutcome},
        quota::QuotaService,
    },
};

use super::CommandContext;

/// `resetlb` zeroes client points; owner or administrator only.
pub async fn reset_clients(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    if !cmd.caller.is_owner(cmd.config()) && !cmd.caller.is_admin() {
        return Err(AppError::PermissionDenied(
            "You do not have permission to reset the leaderboard.".to_string(),
        ));
    }

    LeaderboardService::new(cmd.db(), &cmd.platform, cmd.config())
        .reset_clients()
        .await?;

    cmd.reply_text("✅ Leaderboard has been reset.").await
}

/// `mmlb` refreshes the middleman board.
pub async fn middlemen(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let outcome = LeaderboardService::new(cmd.db(), &cmd.platform, cmd.config())
        .refresh_middlemen()
        .await?;

    let verb = match outcome {
        UpsertOutcome::Edited { .. } => "updated",
        UpsertOutcome::Created { .. } => "created",
    };

    cmd.reply_text(format!(
        "✅ Middleman leaderboard {} in <#{}>.",
        verb,
        outcome.channel_id()
    ))
    .await
}

pub async fn reset_middlemen(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require_admin()?;

    let reset = LeaderboardService::new(cmd.db(), &cmd.platform, cmd.config())
        .reset_middlemen()
        .await?;

    cmd.reply_text(format!("✅ Reset {} middlemen stats to 0.", reset))
        .await
}

/// `quota` shows this week's board.
pub async fn quota(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let embed = QuotaService::new(cmd.db(), &cmd.platform, cmd.config())
        .board()
        .await?;

    cmd.reply(Reply::embed(embed)).await
}
