use serenity::all::Permissions;

use crate::{data::tag::TagRepository, error::AppError};

use super::{next_token, CommandContext};

/// Longest message Discord accepts.
const MESSAGE_LIMIT: usize = 2000;

pub async fn create(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller
        .require(Permissions::MANAGE_MESSAGES, "Manage Messages")?;

    let (name, message) = next_token(cmd.args)
        .filter(|(_, message)| !message.is_empty())
        .ok_or_else(|| cmd.usage("tagcreate <name> <message>"))?;

    TagRepository::new(cmd.db()).upsert(name, message).await?;

    cmd.reply_text(format!("✅ Tag `{}` saved.", name)).await
}

pub async fn show(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let (name, _) = next_token(cmd.args).ok_or_else(|| cmd.usage("tag <name>"))?;

    let tag = TagRepository::new(cmd.db())
        .find_by_name(name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag `{}` not found.", name)))?;

    cmd.say(truncate(&tag.message, MESSAGE_LIMIT)).await
}

pub async fn delete(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller
        .require(Permissions::MANAGE_MESSAGES, "Manage Messages")?;

    let (name, _) = next_token(cmd.args).ok_or_else(|| cmd.usage("tagdelete <name>"))?;

    if !TagRepository::new(cmd.db()).delete(name).await? {
        return Err(AppError::NotFound(format!("Tag `{}` not found.", name)));
    }

    cmd.reply_text("🗑️ Tag deleted.").await
}

pub async fn list(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let names = TagRepository::new(cmd.db()).list_names().await?;

    cmd.reply_text(tag_list(&names)).await
}

fn tag_list(names: &[String]) -> String {
    if names.is_empty() {
        return "No tags found.".to_string();
    }

    names
        .iter()
        .map(|name| format!("• `{}`", name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
