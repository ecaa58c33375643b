//! Interaction event handler.
//!
//! Buttons and modals are routed by their custom id (see
//! [`ComponentAction`]). Every action runs behind an [`InteractionResponder`];
//! a failing action is logged and answered with an ephemeral message built from
//! `AppError::user_message()`.

use chrono::Utc;
use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    GuildId, Interaction, Member, ModalInteraction,
};

use crate::{
    bot::{
        command::ticket::send_transcript,
        handler::Handler,
        payload::{modal_values, ticket_request},
        permission::Caller,
        platform::DiscordPlatform,
        responder::{InteractionKind, InteractionResponder, Reply, Responder},
    },
    error::AppError,
    model::component::ComponentAction,
    service::{
        crypto::CryptoService,
        leaderboard::LeaderboardService,
        servers::chosen_embed,
        ticket::{message::request_modal, points::logged_points_message, TicketService},
        vouch::VouchService,
    },
};

/// Handles the interaction_create event.
///
/// # Arguments
/// - `handler` - Shared bot state
/// - `ctx` - Discord context
/// - `interaction` - Button press, modal submission or other interaction
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Component(component) => handle_component(handler, &ctx, component).await,
        Interaction::Modal(modal) => handle_modal(handler, &ctx, modal).await,
        _ => {}
    }
}

/// Everything an action needs about the interaction it came from.
struct ActionContext<'a> {
    handler: &'a Handler,
    ctx: &'a Context,
    caller: Caller,
    channel_id: u64,
    platform: DiscordPlatform,
    responder: InteractionResponder,
}

impl ActionContext<'_> {
    fn tickets(&self) -> TicketService<'_> {
        TicketService::new(&self.handler.db, &self.platform, &self.handler.config)
    }

    fn require_staff(&self) -> Result<(), AppError> {
        self.caller.require_staff(&self.handler.config)
    }
}

async fn handle_component(handler: &Handler, ctx: &Context, component: ComponentInteraction) {
    let Some(action) = ComponentAction::parse(&component.data.custom_id) else {
        tracing::debug!("Ignoring unknown component {}", component.data.custom_id);
        return;
    };

    let responder = InteractionResponder::new(
        ctx.http.clone(),
        InteractionKind::Component(component.clone()),
    );

    let (caller, platform) =
        match build_context(ctx, component.guild_id, component.member.as_ref()).await {
            Ok(parts) => parts,
            Err(e) => {
                finish(&responder, action, Err(e)).await;
                return;
            }
        };

    let action_ctx = ActionContext {
        handler,
        ctx,
        caller,
        channel_id: component.channel_id.get(),
        platform,
        responder,
    };

    let result = run_component(&action_ctx, &component, action).await;
    finish(&action_ctx.responder, action, result).await;
}

async fn handle_modal(handler: &Handler, ctx: &Context, modal: ModalInteraction) {
    let Some(action) = ComponentAction::parse(&modal.data.custom_id) else {
        tracing::debug!("Ignoring unknown modal {}", modal.data.custom_id);
        return;
    };

    let responder =
        InteractionResponder::new(ctx.http.clone(), InteractionKind::Modal(modal.clone()));

    let (caller, platform) =
        match build_context(ctx, modal.guild_id, modal.member.as_ref()).await {
            Ok(parts) => parts,
            Err(e) => {
                finish(&responder, action, Err(e)).await;
                return;
            }
        };

    let action_ctx = ActionContext {
        handler,
        ctx,
        caller,
        channel_id: modal.channel_id.get(),
        platform,
        responder,
    };

    let result = match action {
        ComponentAction::SubmitRequest => submit_request(&action_ctx, &modal).await,
        other => {
            tracing::debug!("Modal submitted for non-modal action {:?}", other);
            Ok(())
        }
    };

    finish(&action_ctx.responder, action, result).await;
}

async fn build_context(
    ctx: &Context,
    guild_id: Option<GuildId>,
    member: Option<&Member>,
) -> Result<(Caller, DiscordPlatform), AppError> {
    let (Some(guild_id), Some(member)) = (guild_id, member) else {
        return Err(AppError::BadRequest(
            "This only works inside the server.".to_string(),
        ));
    };

    let caller = Caller::resolve(ctx, guild_id, member).await?;
    let platform = DiscordPlatform::new(ctx.http.clone(), guild_id);
    Ok((caller, platform))
}

/// Logs a failed action and tells the user what went wrong.
async fn finish(responder: &InteractionResponder, action: ComponentAction, result: Result<(), AppError>) {
    let Err(e) = result else {
        return;
    };

    tracing::error!("Interaction {:?} failed: {}", action, e);

    if let Err(e) = responder.reply(Reply::text(e.user_message()).ephemeral()).await {
        tracing::error!("Failed to report interaction error: {}", e);
    }
}

async fn run_component(
    action_ctx: &ActionContext<'_>,
    component: &ComponentInteraction,
    action: ComponentAction,
) -> Result<(), AppError> {
    let handler = action_ctx.handler;
    let http = &action_ctx.ctx.http;

    match action {
        ComponentAction::RequestMiddleman => {
            component
                .create_response(http, CreateInteractionResponse::Modal(request_modal()))
                .await?;
            Ok(())
        }
        ComponentAction::SubmitRequest => Ok(()),
        ComponentAction::Claim => claim(action_ctx).await,
        ComponentAction::DeleteTicket => delete_ticket(action_ctx).await,
        ComponentAction::Transcript => {
            action_ctx.require_staff()?;
            send_transcript(
                &handler.db,
                &action_ctx.platform,
                &handler.config,
                &action_ctx.responder,
                action_ctx.channel_id,
            )
            .await
        }
        ComponentAction::CloseDelete => {
            action_ctx.require_staff()?;
            action_ctx
                .responder
                .reply(Reply::text("🗑️ Deleting ticket..."))
                .await?;
            action_ctx.tickets().delete_channel(action_ctx.channel_id).await
        }
        ComponentAction::LogPoints => log_points(action_ctx).await,
        ComponentAction::VouchConfirm => {
            confirm_vouch(action_ctx, component.message.id.get()).await
        }
        ComponentAction::VouchCancel => {
            action_ctx.responder.acknowledge(true).await?;
            VouchService::new(
                &handler.db,
                &action_ctx.platform,
                &handler.config,
                &handler.vouches,
            )
            .cancel(action_ctx.channel_id, component.message.id.get(), Utc::now())
            .await?;
            action_ctx
                .responder
                .follow_up(Reply::text("❌ Vouch confirmation cancelled.").ephemeral())
                .await
        }
        ComponentAction::ShowAddress {
            currency,
            middleman_id,
        } => {
            let embed = CryptoService::new(&handler.db, &handler.config)
                .reveal(
                    currency,
                    middleman_id,
                    action_ctx.caller.user_id,
                    action_ctx.caller.is_staff(&handler.config),
                )
                .await?;
            action_ctx
                .responder
                .reply(Reply::embed(embed).ephemeral())
                .await
        }
        ComponentAction::ChooseServer { game, private } => {
            component
                .create_response(
                    http,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .embed(chosen_embed(game, private, action_ctx.caller.user_id))
                            .components(Vec::new()),
                    ),
                )
                .await?;
            Ok(())
        }
    }
}

/// Opens a ticket from the submitted request form.
async fn submit_request(action_ctx: &ActionContext<'_>, modal: &ModalInteraction) -> Result<(), AppError> {
    let values = modal_values(&modal.data.components);
    let request = ticket_request(&values, action_ctx.caller.user_id, &action_ctx.caller.display)?;

    action_ctx.responder.acknowledge(true).await?;

    let channel_id = action_ctx.tickets().create_ticket(request).await?;

    action_ctx
        .responder
        .reply(Reply::text(format!("✅ Ticket created: <#{}>", channel_id)).ephemeral())
        .await
}

async fn claim(action_ctx: &ActionContext<'_>) -> Result<(), AppError> {
    if !action_ctx.caller.is_staff(&action_ctx.handler.config) {
        return Err(AppError::PermissionDenied(
            "Only middlemen can claim tickets.".to_string(),
        ));
    }

    action_ctx.responder.acknowledge(true).await?;
    action_ctx
        .tickets()
        .claim(action_ctx.channel_id, action_ctx.caller.user_id)
        .await?;

    action_ctx
        .responder
        .reply(Reply::text("✅ You claimed this ticket.").ephemeral())
        .await
}

/// Delete button on the trade intro; the requester or a middleman may press it.
async fn delete_ticket(action_ctx: &ActionContext<'_>) -> Result<(), AppError> {
    let config = &action_ctx.handler.config;
    let tickets = action_ctx.tickets();
    let ticket = tickets.get(action_ctx.channel_id).await?;

    if action_ctx.caller.user_id != ticket.user1 && !action_ctx.caller.has_role(config.middleman_role_id) {
        return Err(AppError::PermissionDenied(
            "You don’t have permission to delete this ticket.".to_string(),
        ));
    }

    action_ctx
        .responder
        .reply(Reply::text("🗑️ Deleting ticket..."))
        .await?;
    tickets.delete_channel(action_ctx.channel_id).await
}

async fn log_points(action_ctx: &ActionContext<'_>) -> Result<(), AppError> {
    action_ctx.require_staff()?;

    let handler = action_ctx.handler;
    let user_ids = action_ctx.tickets().log_points(action_ctx.channel_id).await?;

    action_ctx
        .responder
        .reply(Reply::text(logged_points_message(&user_ids)))
        .await?;

    if let Err(e) = LeaderboardService::new(&handler.db, &action_ctx.platform, &handler.config)
        .refresh_clients()
        .await
    {
        tracing::error!("Failed to refresh client leaderboard: {}", e);
    }

    Ok(())
}

/// Finishes the ticket from its vouch prompt.
///
/// The channel is gone once this returns, so the closing notice may not arrive.
async fn confirm_vouch(action_ctx: &ActionContext<'_>, prompt_id: u64) -> Result<(), AppError> {
    let handler = action_ctx.handler;

    action_ctx.responder.acknowledge(true).await?;

    let outcome = VouchService::new(
        &handler.db,
        &action_ctx.platform,
        &handler.config,
        &handler.vouches,
    )
    .accept(
        action_ctx.channel_id,
        prompt_id,
        action_ctx.caller.user_id,
        action_ctx.caller.is_admin(),
        Utc::now(),
    )
    .await?;

    tracing::info!(
        "Vouch confirmed for ticket {} by {}; points for {:?}",
        outcome.ticket.channel_id,
        action_ctx.caller.user_id,
        outcome.points_for
    );

    if let Err(e) = action_ctx
        .responder
        .follow_up(
            Reply::text("✅ Points logged, leaderboard updated, and ticket closed!").ephemeral(),
        )
        .await
    {
        tracing::debug!("Closing notice for {} not delivered: {}", action_ctx.channel_id, e);
    }

    Ok(())
}
