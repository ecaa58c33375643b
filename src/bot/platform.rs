//! Discord implementation of the `ChatPlatform` seam.

use std::sync::Arc;

use serenity::all::{
    ChannelId, ChannelType, CreateChannel, CreateMessage, EditChannel, EditMessage, GetMessages,
    GuildChannel, GuildId, Http, Message, MessageId, PermissionOverwrite,
    PermissionOverwriteType, Permissions, RoleId, UserId,
};

use crate::{
    error::AppError,
    model::transcript::TranscriptLine,
    service::platform::{ChannelAccess, ChatPlatform, PostedMessage, TicketChannelSpec},
};

/// Messages fetched per history request; Discord's maximum.
const HISTORY_PAGE: u8 = 100;
/// Members fetched per member-list request; Discord's maximum.
const MEMBER_PAGE: u64 = 1000;

pub struct DiscordPlatform {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }

    async fn guild_channel(&self, channel_id: u64) -> Result<GuildChannel, AppError> {
        ChannelId::new(channel_id)
            .to_channel(&self.http)
            .await?
            .guild()
            .ok_or_else(|| AppError::NotFound(format!("Channel {} is not a guild channel", channel_id)))
    }

    async fn apply_access(
        &self,
        channel_id: u64,
        kind: PermissionOverwriteType,
        access: ChannelAccess,
    ) -> Result<(), AppError> {
        let channel = ChannelId::new(channel_id);

        match overwrite_for(kind, access) {
            Some(overwrite) => channel.create_permission(&self.http, overwrite).await?,
            None => {
                if let Err(e) = channel.delete_permission(&self.http, kind).await {
                    if !is_not_found(&e) {
                        return Err(e.into());
                    }
                }
            }
        }

        Ok(())
    }
}

/// Whether a serenity error is Discord answering 404.
pub fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

/// Overwrite granting `access`; `None` means remove the overwrite.
pub fn overwrite_for(
    kind: PermissionOverwriteType,
    access: ChannelAccess,
) -> Option<PermissionOverwrite> {
    let (allow, deny) = match access {
        ChannelAccess::ReadWrite => (
            Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::READ_MESSAGE_HISTORY
                | Permissions::ATTACH_FILES
                | Permissions::EMBED_LINKS,
            Permissions::empty(),
        ),
        ChannelAccess::ReadOnly => (
            Permissions::VIEW_CHANNEL | Permissions::READ_MESSAGE_HISTORY,
            Permissions::SEND_MESSAGES,
        ),
        ChannelAccess::Hidden => (Permissions::empty(), Permissions::VIEW_CHANNEL),
        ChannelAccess::Cleared => return None,
    };

    Some(PermissionOverwrite { allow, deny, kind })
}

/// Channel under `category_id` with a member overwrite letting `user_id` view it.
pub fn member_ticket_channel<'a>(
    channels: impl IntoIterator<Item = &'a GuildChannel>,
    category_id: u64,
    user_id: u64,
) -> Option<u64> {
    let user = UserId::new(user_id);

    channels
        .into_iter()
        .filter(|channel| channel.parent_id.map(|id| id.get()) == Some(category_id))
        .find(|channel| {
            channel.permission_overwrites.iter().any(|overwrite| {
                overwrite.kind == PermissionOverwriteType::Member(user)
                    && overwrite.allow.contains(Permissions::VIEW_CHANNEL)
            })
        })
        .map(|channel| channel.id.get())
}

fn posted(message: &Message) -> PostedMessage {
    PostedMessage {
        id: message.id.get(),
        author_id: message.author.id.get(),
        from_bot: message.author.bot,
        embed_titles: message
            .embeds
            .iter()
            .filter_map(|embed| embed.title.clone())
            .collect(),
    }
}

fn transcript_line(message: &Message) -> TranscriptLine {
    TranscriptLine {
        author_id: message.author.id.get(),
        author_name: message.author.name.clone(),
        author_is_bot: message.author.bot,
        content: message.content.clone(),
        has_embeds: !message.embeds.is_empty(),
        has_attachments: !message.attachments.is_empty(),
        timestamp: message.timestamp.to_utc(),
    }
}

#[serenity::async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn find_member_ticket_channel(
        &self,
        category_id: u64,
        user_id: u64,
    ) -> Result<Option<u64>, AppError> {
        let channels = self.guild_id.channels(&self.http).await?;

        Ok(member_ticket_channel(channels.values(), category_id, user_id))
    }

    async fn create_ticket_channel(&self, spec: &TicketChannelSpec) -> Result<u64, AppError> {
        let everyone = RoleId::new(self.guild_id.get());

        let mut overwrites: Vec<PermissionOverwrite> = vec![
            (PermissionOverwriteType::Role(everyone), ChannelAccess::Hidden),
            (
                PermissionOverwriteType::Member(UserId::new(spec.requester_id)),
                ChannelAccess::ReadWrite,
            ),
            (
                PermissionOverwriteType::Role(RoleId::new(spec.staff_role_id)),
                ChannelAccess::ReadWrite,
            ),
        ]
        .into_iter()
        .filter_map(|(kind, access)| overwrite_for(kind, access))
        .collect();

        if let Some(counterparty) = spec.counterparty_id {
            overwrites.extend(overwrite_for(
                PermissionOverwriteType::Member(UserId::new(counterparty)),
                ChannelAccess::ReadWrite,
            ));
        }

        let channel = self
            .guild_id
            .create_channel(
                &self.http,
                CreateChannel::new(&spec.name)
                    .kind(ChannelType::Text)
                    .category(ChannelId::new(spec.category_id))
                    .permissions(overwrites),
            )
            .await?;

        Ok(channel.id.get())
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        match ChannelId::new(channel_id).delete(&self.http).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn rename_channel(&self, channel_id: u64, name: &str) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .edit(&self.http, EditChannel::new().name(name))
            .await?;

        Ok(())
    }

    async fn channel_name(&self, channel_id: u64) -> Result<String, AppError> {
        Ok(self.guild_channel(channel_id).await?.name)
    }

    async fn set_member_access(
        &self,
        channel_id: u64,
        user_id: u64,
        access: ChannelAccess,
    ) -> Result<(), AppError> {
        self.apply_access(
            channel_id,
            PermissionOverwriteType::Member(UserId::new(user_id)),
            access,
        )
        .await
    }

    async fn set_role_access(
        &self,
        channel_id: u64,
        role_id: u64,
        access: ChannelAccess,
    ) -> Result<(), AppError> {
        self.apply_access(
            channel_id,
            PermissionOverwriteType::Role(RoleId::new(role_id)),
            access,
        )
        .await
    }

    async fn send_message(&self, channel_id: u64, message: CreateMessage) -> Result<u64, AppError> {
        let sent = ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await?;

        Ok(sent.id.get())
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: EditMessage,
    ) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .edit_message(&self.http, MessageId::new(message_id), message)
            .await?;

        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete_message(&self.http, MessageId::new(message_id))
            .await?;

        Ok(())
    }

    async fn find_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<PostedMessage>, AppError> {
        match ChannelId::new(channel_id)
            .message(&self.http, MessageId::new(message_id))
            .await
        {
            Ok(message) => Ok(Some(posted(&message))),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<PostedMessage>, AppError> {
        let messages = ChannelId::new(channel_id)
            .messages(&self.http, GetMessages::new().limit(limit))
            .await?;

        Ok(messages.iter().map(posted).collect())
    }

    async fn channel_history(&self, channel_id: u64) -> Result<Vec<TranscriptLine>, AppError> {
        let channel = ChannelId::new(channel_id);
        let mut lines = Vec::new();
        let mut before: Option<MessageId> = None;

        loop {
            let mut request = GetMessages::new().limit(HISTORY_PAGE);
            if let Some(id) = before {
                request = request.before(id);
            }

            let page = channel.messages(&self.http, request).await?;
            let Some(oldest) = page.last() else {
                break;
            };
            before = Some(oldest.id);

            let full_page = page.len() == HISTORY_PAGE as usize;
            lines.extend(page.iter().map(transcript_line));
            if !full_page {
                break;
            }
        }

        // Discord pages newest first.
        lines.reverse();

        Ok(lines)
    }

    async fn role_members(&self, role_id: u64) -> Result<Vec<u64>, AppError> {
        let role = RoleId::new(role_id);
        let mut holders = Vec::new();
        let mut after: Option<UserId> = None;

        loop {
            let page = self
                .guild_id
                .members(&self.http, Some(MEMBER_PAGE), after)
                .await?;

            holders.extend(
                page.iter()
                    .filter(|member| !member.user.bot && member.roles.contains(&role))
                    .map(|member| member.user.id.get()),
            );

            match page.last() {
                Some(last) if page.len() as u64 == MEMBER_PAGE => after = Some(last.user.id),
                _ => break,
            }
        }

        Ok(holders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::create_test_text_channel;

    #[test]
    fn finds_channel_member_can_view() {
        let channels = vec![
            create_test_text_channel(10, 1, Some(3), &[5], &[]),
            create_test_text_channel(11, 1, Some(3), &[6], &[]),
        ];

        assert_eq!(member_ticket_channel(&channels, 3, 6), Some(11));
    }

    #[test]
    fn ignores_channels_outside_category() {
        let channels = vec![create_test_text_channel(10, 1, Some(4), &[5], &[])];

        assert_eq!(member_ticket_channel(&channels, 3, 5), None);
    }

    #[test]
    fn ignores_deny_overwrites() {
        let channels = vec![create_test_text_channel(10, 1, Some(3), &[], &[5])];

        assert_eq!(member_ticket_channel(&channels, 3, 5), None);
    }

    #[test]
    fn read_only_denies_sending() {
        let kind = PermissionOverwriteType::Member(UserId::new(5));

        let overwrite = overwrite_for(kind, ChannelAccess::ReadOnly).unwrap();

        assert!(overwrite.allow.contains(Permissions::VIEW_CHANNEL));
        assert!(overwrite.deny.contains(Permissions::SEND_MESSAGES));
        assert!(overwrite_for(kind, ChannelAccess::Cleared).is_none());
    }
}
