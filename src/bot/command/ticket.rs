use sea_orm::DatabaseConnection;

use crate::{
    bot::responder::{Reply, Responder},
    config::Config,
    error::AppError,
    service::{
        platform::ChatPlatform,
        ticket::{message::ticket_panel, TicketService},
        transcript::TranscriptService,
    },
};

use super::{next_token, CommandContext};

/// Staff check plus ticket-category check shared by the in-ticket commands.
async fn ticket_service<'a>(cmd: &'a CommandContext<'_>) -> Result<TicketService<'a>, AppError> {
    cmd.caller.require_staff(cmd.config())?;

    let service = TicketService::new(cmd.db(), &cmd.platform, cmd.config());
    service.require_ticket_channel(cmd.parent_id().await?)?;

    Ok(service)
}

/// `setup [#channel]` posts the ticket panel.
pub async fn setup(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    cmd.caller.require_admin()?;

    let target = cmd.channel_or_current(next_token(cmd.args).map(|(token, _)| token))?;
    cmd.platform
        .send_message(target.get(), ticket_panel(cmd.config()))
        .await?;

    tracing::info!("Ticket panel posted in {} by {}", target, cmd.caller.user_id);

    cmd.reply_text("✅ Setup complete.").await
}

pub async fn close(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let service = ticket_service(cmd).await?;

    service.close(cmd.channel_id(), &cmd.caller.display).await?;

    Ok(())
}

/// `open` reopens a closed ticket.
pub async fn open(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let service = ticket_service(cmd).await?;

    let restored = service.reopen(cmd.channel_id()).await?;
    let mentions = restored
        .iter()
        .map(|id| format!("<@{}>", id))
        .collect::<Vec<_>>()
        .join(", ");

    cmd.reply_text(format!(
        "✅ Ticket reopened. Restored access for: {}",
        mentions
    ))
    .await
}

pub async fn add(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let service = ticket_service(cmd).await?;
    let (token, _) = next_token(cmd.args).ok_or_else(|| cmd.usage("add @user"))?;
    let member = cmd.member(token).await?;

    service
        .add_user(cmd.channel_id(), member.user.id.get())
        .await?;

    cmd.reply_text(format!("✅ <@{}> added.", member.user.id)).await
}

pub async fn remove(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let service = ticket_service(cmd).await?;
    let (token, _) = next_token(cmd.args).ok_or_else(|| cmd.usage("remove @user"))?;
    let member = cmd.member(token).await?;

    service
        .remove_user(cmd.channel_id(), member.user.id.get())
        .await?;

    cmd.reply_text(format!("✅ <@{}> removed.", member.user.id)).await
}

pub async fn rename(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let service = ticket_service(cmd).await?;
    let name = cmd.args.trim();
    if name.is_empty() {
        return Err(cmd.usage("rename <name>"));
    }

    service.rename(cmd.channel_id(), name).await?;

    cmd.reply_text(format!("✅ Renamed to `{}`.", name)).await
}

pub async fn delete(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let service = ticket_service(cmd).await?;

    tracing::info!(
        "Ticket {} deleted by {}",
        cmd.channel_id(),
        cmd.caller.user_id
    );

    service.delete_channel(cmd.channel_id()).await
}

/// `format` posts the trade details questionnaire.
pub async fn format(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    let service = ticket_service(cmd).await?;

    cmd.reply_text("⏳ Preparing trade format...").await?;
    service.post_trade_format(cmd.channel_id()).await
}

pub async fn transcript(cmd: &CommandContext<'_>) -> Result<(), AppError> {
    ticket_service(cmd).await?;

    send_transcript(
        cmd.db(),
        &cmd.platform,
        cmd.config(),
        &cmd.responder,
        cmd.channel_id(),
    )
    .await
}

/// Generates a ticket transcript and answers with the transcript message.
///
/// Used by the `transcript` command and the close panel's *Transcript* button.
pub async fn send_transcript(
    db: &DatabaseConnection,
    platform: &dyn ChatPlatform,
    config: &Config,
    responder: &dyn Responder,
    channel_id: u64,
) -> Result<(), AppError> {
    responder.acknowledge(true).await?;

    let artifact = TranscriptService::new(db, platform, config)
        .generate(channel_id)
        .await?;

    responder
        .reply(
            Reply::embed(artifact.embed())
                .with_components(artifact.components())
                .with_attachment(artifact.attachment())
                .ephemeral(),
        )
        .await
}
