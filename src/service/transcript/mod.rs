//! Ticket transcripts.
//!
//! A transcript is written as two files in the transcripts directory:
//! `<channel>.html`, served by the transcript server, and
//! `transcript-<channel>.txt`, attached to the transcript message. A
//! `transcript` record keeps the participant counts.

pub mod render;

use std::path::Path;

use sea_orm::DatabaseConnection;
use serenity::all::{
    CreateActionRow, CreateAttachment, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateMessage,
};

use crate::{
    config::Config,
    data::transcript::TranscriptRepository,
    error::AppError,
    model::transcript::{CreateTranscriptParam, ParticipantCount},
    service::{platform::ChatPlatform, EMBED_COLOR},
};

/// Longest value Discord accepts in an embed field.
const FIELD_LIMIT: usize = 1024;

/// A generated transcript, ready to be announced.
#[derive(Debug, Clone)]
pub struct TranscriptArtifact {
    pub channel_id: u64,
    pub channel_name: String,
    pub participants: Vec<ParticipantCount>,
    pub html_url: String,
    pub txt_name: String,
    pub txt: String,
}

impl TranscriptArtifact {
    pub fn embed(&self) -> CreateEmbed {
        let participants = if self.participants.is_empty() {
            "None".to_string()
        } else {
            self.participants
                .iter()
                .map(|p| format!("<@{}> — `{}` messages", p.user_id, p.count))
                .collect::<Vec<_>>()
                .join("\n")
        };

        CreateEmbed::new()
            .title("📄 Transcript Ready")
            .description("Your ticket transcript is now ready.")
            .field("Ticket Name", &self.channel_name, true)
            .field("Ticket ID", self.channel_id.to_string(), true)
            .field(
                "Participants",
                participants.chars().take(FIELD_LIMIT).collect::<String>(),
                false,
            )
            .color(EMBED_COLOR)
            .footer(CreateEmbedFooter::new("Transcript generated"))
    }

    pub fn components(&self) -> Vec<CreateActionRow> {
        vec![CreateActionRow::Buttons(vec![CreateButton::new_link(
            &self.html_url,
        )
        .label("View HTML Transcript")])]
    }

    pub fn attachment(&self) -> CreateAttachment {
        CreateAttachment::bytes(self.txt.as_bytes().to_vec(), self.txt_name.clone())
    }

    pub fn message(&self) -> CreateMessage {
        CreateMessage::new()
            .embed(self.embed())
            .components(self.components())
            .add_file(self.attachment())
    }
}

pub struct TranscriptService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn ChatPlatform,
    config: &'a Config,
}

impl<'a> TranscriptService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        platform: &'a dyn ChatPlatform,
        config: &'a Config,
    ) -> Self {
        Self {
            db,
            platform,
            config,
        }
    }

    /// Writes the transcript files for a channel and records them.
    ///
    /// The transcript is also posted to the transcript log channel; a failure
    /// there is logged and does not fail the transcript.
    ///
    /// # Returns
    /// - `Ok(TranscriptArtifact)` - Files written and record stored
    /// - `Err(AppError::DiscordErr)` - Channel history could not be read
    /// - `Err(AppError::IoErr)` - Files could not be written
    /// - `Err(AppError::TemplateErr)` - HTML rendering failed
    pub async fn generate(&self, channel_id: u64) -> Result<TranscriptArtifact, AppError> {
        let channel_name = self.platform.channel_name(channel_id).await?;
        let lines = self.platform.channel_history(channel_id).await?;

        let participants = render::count_participants(&lines);
        let html = render::render_html(channel_id, &channel_name, &lines, &participants)?;
        let txt = render::render_text(&lines);

        let dir = Path::new(&self.config.transcripts_dir);
        tokio::fs::create_dir_all(dir).await?;

        let html_name = format!("{}.html", channel_id);
        let txt_name = format!("transcript-{}.txt", channel_id);
        tokio::fs::write(dir.join(&html_name), html).await?;
        tokio::fs::write(dir.join(&txt_name), &txt).await?;

        TranscriptRepository::new(self.db)
            .create(CreateTranscriptParam {
                channel_id,
                channel_name: channel_name.clone(),
                participants: participants.clone(),
            })
            .await?;

        let artifact = TranscriptArtifact {
            channel_id,
            channel_name,
            participants,
            html_url: self.config.transcript_url(channel_id),
            txt_name,
            txt,
        };

        if let Err(e) = self
            .platform
            .send_message(self.config.transcript_channel_id, artifact.message())
            .await
        {
            tracing::error!(
                "Failed to post transcript of {} to the log channel: {}",
                channel_id,
                e
            );
        }

        tracing::info!(
            "Generated transcript for {} ({} messages)",
            channel_id,
            lines.len()
        );

        Ok(artifact)
    }
}
