//! Vouch detection.
//!
//! Traders vouch by posting a message containing one of the keywords in the
//! ticket itself, in the public vouches channel, or in their middleman's
//! personal vouch channel. Once every trader on a claimed ticket has vouched,
//! the assignee is asked to confirm; confirming finishes the ticket.

pub mod tracker;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor,
    CreateEmbedFooter, CreateMessage,
};

use crate::{
    config::Config,
    data::ticket::TicketRepository,
    error::AppError,
    model::{component::ComponentAction, ticket::Ticket},
    service::{
        leaderboard::LeaderboardService,
        platform::ChatPlatform,
        ticket::TicketService,
        transcript::{TranscriptArtifact, TranscriptService},
    },
};

pub use tracker::{VouchProgress, VouchTracker};

/// Phrases that count as a vouch, checked in order.
pub const VOUCH_KEYWORDS: [&str; 10] = [
    "vouch",
    "+rep",
    "rep+",
    "trusted",
    "legit",
    "smooth trade",
    "recommend",
    "thanks mm",
    "thank you mm",
    "great mm",
];

/// First keyword contained in `content`, ignoring case.
pub fn matching_keyword(content: &str) -> Option<&'static str> {
    let lowered = content.to_lowercase();

    VOUCH_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| lowered.contains(keyword))
}

/// A chat message that might be a vouch.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub channel_id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub content: String,
    pub jump_url: String,
}

/// What confirming a vouch prompt did.
#[derive(Debug, Clone)]
pub struct AcceptOutcome {
    pub ticket: Ticket,
    pub transcript: Option<TranscriptArtifact>,
    pub points_for: Vec<u64>,
}

pub struct VouchService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn ChatPlatform,
    config: &'a Config,
    tracker: &'a VouchTracker,
}

impl<'a> VouchService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        platform: &'a dyn ChatPlatform,
        config: &'a Config,
        tracker: &'a VouchTracker,
    ) -> Self {
        Self {
            db,
            platform,
            config,
            tracker,
        }
    }

    /// Finds the open, claimed ticket a message could be vouching for.
    ///
    /// Claiming leaves traders read-only, so a vouch inside the ticket channel
    /// only arrives once staff restore posting with `$reopen` or `$add`.
    async fn resolve_ticket(&self, message: &IncomingMessage) -> Result<Option<Ticket>, AppError> {
        let ticket_repo = TicketRepository::new(self.db);

        if let Some(ticket) = ticket_repo.find_by_channel_id(message.channel_id).await? {
            let eligible = ticket.claimed_by.is_some()
                && !ticket.is_closed()
                && ticket.is_participant(message.author_id);
            return Ok(eligible.then_some(ticket));
        }

        if let Some(middleman_id) = self.config.middleman_for_vouch_channel(message.channel_id) {
            return Ok(ticket_repo
                .find_open_for_assignee_and_participant(middleman_id, message.author_id)
                .await?);
        }

        if Some(message.channel_id) == self.config.vouches_channel_id {
            return Ok(ticket_repo
                .find_open_claimed_by_participant(message.author_id)
                .await?);
        }

        Ok(None)
    }

    /// Records a vouch if `message` is one, prompting the assignee when complete.
    ///
    /// Messages that are not vouches, or that cannot be tied to a ticket, are
    /// ignored without error.
    ///
    /// # Returns
    /// - `Ok(Some(progress))` - The message counted towards a ticket
    /// - `Ok(None)` - Not a vouch for any open, claimed ticket
    pub async fn handle_message(
        &self,
        message: &IncomingMessage,
        now: DateTime<Utc>,
    ) -> Result<Option<VouchProgress>, AppError> {
        let Some(keyword) = matching_keyword(&message.content) else {
            return Ok(None);
        };

        let Some(ticket) = self.resolve_ticket(message).await? else {
            tracing::debug!(
                "Vouch keyword '{}' from {} in {} matched no open ticket",
                keyword,
                message.author_id,
                message.channel_id
            );
            return Ok(None);
        };
        let Some(assignee_id) = ticket.claimed_by else {
            return Ok(None);
        };

        let progress = self
            .tracker
            .record(ticket.channel_id, message.author_id, &ticket.participants())
            .await;

        if progress == VouchProgress::AlreadyVouched {
            return Ok(Some(progress));
        }

        self.platform
            .send_message(
                ticket.channel_id,
                CreateMessage::new().content(format!("✅ <@{}> has vouched!", message.author_id)),
            )
            .await?;

        if progress == VouchProgress::AllVouched {
            let prompt_id = self
                .platform
                .send_message(ticket.channel_id, confirmation_prompt(assignee_id, message))
                .await?;
            self.tracker
                .register_prompt(ticket.channel_id, prompt_id, now)
                .await;

            tracing::info!(
                "All traders vouched in ticket {}, prompted {}",
                ticket.channel_id,
                assignee_id
            );
        }

        Ok(Some(progress))
    }

    /// Finishes a ticket from its confirmation prompt.
    ///
    /// Generates the transcript, logs client points, credits the assignee,
    /// refreshes both leaderboards, then deletes the record and the channel.
    /// Transcript and leaderboard failures are logged and do not stop the rest.
    ///
    /// # Arguments
    /// - `channel_id` - Ticket channel the prompt was posted in
    /// - `message_id` - The prompt message
    /// - `actor_id` - Who pressed the button
    /// - `actor_is_admin` - Whether they hold the administrator permission
    /// - `now` - Press time, checked against the prompt's expiry
    ///
    /// # Returns
    /// - `Ok(AcceptOutcome)` - Ticket finished and removed
    /// - `Err(AppError::PermissionDenied)` - Not the assignee or an admin
    /// - `Err(AppError::BadRequest)` - Prompt expired or already confirmed
    pub async fn accept(
        &self,
        channel_id: u64,
        message_id: u64,
        actor_id: u64,
        actor_is_admin: bool,
        now: DateTime<Utc>,
    ) -> Result<AcceptOutcome, AppError> {
        let tickets = TicketService::new(self.db, self.platform, self.config);
        let ticket = tickets.get(channel_id).await?;

        if ticket.claimed_by != Some(actor_id) && !actor_is_admin {
            return Err(AppError::PermissionDenied(
                "Only the assigned middleman or an admin can confirm this vouch.".to_string(),
            ));
        }

        if !self.tracker.confirm_prompt(channel_id, message_id, now).await {
            return Err(AppError::BadRequest(
                "This confirmation has expired or was already used.".to_string(),
            ));
        }

        let transcript = match TranscriptService::new(self.db, self.platform, self.config)
            .generate(channel_id)
            .await
        {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                tracing::error!("Transcript for ticket {} failed: {}", channel_id, e);
                None
            }
        };

        let points_for = tickets.log_points(channel_id).await?;
        tickets.record_closure(&ticket).await?;

        let boards = LeaderboardService::new(self.db, self.platform, self.config);
        if let Err(e) = boards.refresh_clients().await {
            tracing::error!("Failed to refresh client leaderboard: {}", e);
        }
        if let Err(e) = boards.refresh_middlemen().await {
            tracing::error!("Failed to refresh middleman leaderboard: {}", e);
        }

        tickets.delete_ticket_record(channel_id).await?;
        self.tracker.clear(channel_id).await;
        self.platform.delete_channel(channel_id).await?;

        tracing::info!("Ticket {} finished by {}", channel_id, actor_id);

        Ok(AcceptOutcome {
            ticket,
            transcript,
            points_for,
        })
    }

    /// Removes a confirmation prompt without touching the ticket.
    pub async fn cancel(
        &self,
        channel_id: u64,
        message_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !self.tracker.prompt_is_live(channel_id, message_id, now).await {
            return Err(AppError::BadRequest(
                "This confirmation has expired or was already used.".to_string(),
            ));
        }

        self.tracker.discard_prompt(channel_id).await;
        self.platform.delete_message(channel_id, message_id).await
    }
}

/// Prompt asking the assignee to confirm the vouches and close the ticket.
pub fn confirmation_prompt(assignee_id: u64, vouch: &IncomingMessage) -> CreateMessage {
    let quoted: String = vouch.content.chars().take(1000).collect();

    let mut author = CreateEmbedAuthor::new(&vouch.author_name);
    if let Some(avatar) = &vouch.author_avatar {
        author = author.icon_url(avatar);
    }

    let embed = CreateEmbed::new()
        .title("✅ Vouch Detected!")
        .description(format!(
            "A vouch was detected from <@{}>!\n\n\
             **Vouch Message:**\n>>> {}\n\n\
             [Jump to Vouch]({})\n\n\
             Click **Done** to:\n\
             • Generate transcript\n\
             • Log points for clients\n\
             • Close this ticket",
            vouch.author_id, quoted, vouch.jump_url
        ))
        .author(author)
        .color(0x00ff00)
        .footer(CreateEmbedFooter::new(format!(
            "Vouched by {}",
            vouch.author_name
        )));

    CreateMessage::new()
        .content(format!("<@{}>", assignee_id))
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![
            CreateButton::new(ComponentAction::VouchConfirm.custom_id())
                .label("✅ Done - Close Ticket")
                .style(ButtonStyle::Success),
            CreateButton::new(ComponentAction::VouchCancel.custom_id())
                .label("❌ Cancel")
                .style(ButtonStyle::Danger),
        ])])
}
