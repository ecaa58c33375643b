//! Replying to whoever triggered a handler.
//!
//! Prefix commands answer with a message referencing the invoking message;
//! button presses and modal submissions answer through the interaction
//! endpoints. Handlers only see `Responder` and build a `Reply`, so the same
//! flow can answer either way.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use serenity::all::{
    ChannelId, ComponentInteraction, CreateActionRow, CreateAllowedMentions, CreateAttachment,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, Http, MessageId, ModalInteraction,
};
use serenity::async_trait;

use crate::error::AppError;

/// Reply payload independent of how it is delivered.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub content: Option<String>,
    pub embeds: Vec<CreateEmbed>,
    pub components: Vec<CreateActionRow>,
    pub attachments: Vec<CreateAttachment>,
    /// Only honoured for interactions; command replies are always public.
    pub ephemeral: bool,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn embed(embed: CreateEmbed) -> Self {
        Self {
            embeds: vec![embed],
            ..Default::default()
        }
    }

    pub fn with_embed(mut self, embed: CreateEmbed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn with_components(mut self, components: Vec<CreateActionRow>) -> Self {
        self.components = components;
        self
    }

    pub fn with_attachment(mut self, attachment: CreateAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    fn into_message(self) -> CreateMessage {
        let mut message = CreateMessage::new()
            .embeds(self.embeds)
            .components(self.components)
            .add_files(self.attachments);
        if let Some(content) = self.content {
            message = message.content(content);
        }
        message
    }

    fn into_response(self) -> CreateInteractionResponseMessage {
        let mut message = CreateInteractionResponseMessage::new()
            .embeds(self.embeds)
            .components(self.components)
            .add_files(self.attachments)
            .ephemeral(self.ephemeral);
        if let Some(content) = self.content {
            message = message.content(content);
        }
        message
    }

    fn into_followup(self) -> CreateInteractionResponseFollowup {
        let mut message = CreateInteractionResponseFollowup::new()
            .embeds(self.embeds)
            .components(self.components)
            .add_files(self.attachments)
            .ephemeral(self.ephemeral);
        if let Some(content) = self.content {
            message = message.content(content);
        }
        message
    }
}

#[async_trait]
pub trait Responder: Send + Sync {
    /// Signals that work is under way before a slow reply.
    async fn acknowledge(&self, ephemeral: bool) -> Result<(), AppError>;

    /// Answers the trigger.
    async fn reply(&self, reply: Reply) -> Result<(), AppError>;

    /// Sends an additional message after the first answer.
    async fn follow_up(&self, reply: Reply) -> Result<(), AppError>;
}

/// Responds to a prefix command in the channel it was typed in.
pub struct CommandResponder {
    http: Arc<Http>,
    channel_id: ChannelId,
    message_id: MessageId,
}

impl CommandResponder {
    pub fn new(http: Arc<Http>, channel_id: ChannelId, message_id: MessageId) -> Self {
        Self {
            http,
            channel_id,
            message_id,
        }
    }
}

#[async_trait]
impl Responder for CommandResponder {
    async fn acknowledge(&self, _ephemeral: bool) -> Result<(), AppError> {
        self.channel_id.broadcast_typing(&self.http).await?;
        Ok(())
    }

    async fn reply(&self, reply: Reply) -> Result<(), AppError> {
        let message = reply
            .into_message()
            .reference_message((self.channel_id, self.message_id))
            .allowed_mentions(CreateAllowedMentions::new().replied_user(false).all_users(true));

        self.channel_id.send_message(&self.http, message).await?;
        Ok(())
    }

    async fn follow_up(&self, reply: Reply) -> Result<(), AppError> {
        self.channel_id
            .send_message(&self.http, reply.into_message())
            .await?;
        Ok(())
    }
}

/// Interaction being answered.
pub enum InteractionKind {
    Component(ComponentInteraction),
    Modal(ModalInteraction),
}

/// Responds to a button press or modal submission.
///
/// The first answer goes through the interaction response; once the
/// interaction has been answered or deferred, further answers are followups.
pub struct InteractionResponder {
    http: Arc<Http>,
    interaction: InteractionKind,
    answered: AtomicBool,
}

impl InteractionResponder {
    pub fn new(http: Arc<Http>, interaction: InteractionKind) -> Self {
        Self {
            http,
            interaction,
            answered: AtomicBool::new(false),
        }
    }

    async fn respond(&self, response: CreateInteractionResponse) -> Result<(), AppError> {
        match &self.interaction {
            InteractionKind::Component(interaction) => {
                interaction.create_response(&self.http, response).await?
            }
            InteractionKind::Modal(interaction) => {
                interaction.create_response(&self.http, response).await?
            }
        }
        Ok(())
    }

    async fn followup(&self, message: CreateInteractionResponseFollowup) -> Result<(), AppError> {
        match &self.interaction {
            InteractionKind::Component(interaction) => {
                interaction.create_followup(&self.http, message).await?;
            }
            InteractionKind::Modal(interaction) => {
                interaction.create_followup(&self.http, message).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Responder for InteractionResponder {
    async fn acknowledge(&self, ephemeral: bool) -> Result<(), AppError> {
        if self.answered.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.respond(CreateInteractionResponse::Defer(
            CreateInteractionResponseMessage::new().ephemeral(ephemeral),
        ))
        .await
    }

    async fn reply(&self, reply: Reply) -> Result<(), AppError> {
        if self.answered.swap(true, Ordering::SeqCst) {
            return self.followup(reply.into_followup()).await;
        }

        self.respond(CreateInteractionResponse::Message(reply.into_response()))
            .await
    }

    async fn follow_up(&self, reply: Reply) -> Result<(), AppError> {
        self.followup(reply.into_followup()).await
    }
}
