//! Prefix commands.
//!
//! A message starting with the configured prefix is split into a command name
//! and its raw argument text, then dispatched to the command's module. Every
//! command returns `Result<(), AppError>`; failures are logged and answered
//! with `AppError::user_message()`.
//!
//! - `ticket` - Setup panel and staff commands run inside tickets
//! - `leaderboard` - Client, middleman and quota boards
//! - `roblox` - Roblox lookups and saved accounts
//! - `tag` - Stored text snippets
//! - `utility` - Sticky messages, crypto addresses, servers, vouch requests, say, help
//! - `moderation` - Member and channel moderation

pub mod leaderboard;
pub mod moderation;
pub mod roblox;
pub mod tag;
pub mod ticket;
pub mod utility;

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, Context, CreateAllowedMentions, CreateEmbed, CreateMessage, GuildId, Member, Message, UserId,
};

use crate::{
    bot::{
        handler::Handler,
        permission::Caller,
        platform::{is_not_found, DiscordPlatform},
        responder::{CommandResponder, Reply, Responder},
    },
    config::Config,
    error::AppError,
    util::parse::parse_mention,
};

/// Commands listed by `help`, in display order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("setup [#channel]", "Posts the middleman request panel (admin)."),
    ("close", "Closes the current ticket (staff)."),
    ("open", "Reopens a closed ticket (staff)."),
    ("add @user", "Adds a user to the current ticket (staff)."),
    ("remove @user", "Removes a user from the current ticket (staff)."),
    ("rename <name>", "Renames the current ticket (staff)."),
    ("delete", "Deletes the current ticket (staff)."),
    ("format", "Posts the trade details format (staff)."),
    ("transcript", "Generates a transcript of the current ticket (staff)."),
    ("resetlb", "Resets the client leaderboard (owner or admin)."),
    ("mmlb", "Updates the middleman leaderboard."),
    ("resetmmlb", "Resets the middleman leaderboard (admin)."),
    ("quota", "Shows this week's middleman quota."),
    ("i <username>", "Shows a Roblox user's profile."),
    ("s <username|id>", "Saves your Roblox account (staff)."),
    ("a [@user]", "Shows someone's saved Roblox account (staff)."),
    ("tagcreate <name> <message>", "Saves a tag (manage messages)."),
    ("tag <name>", "Posts a tag."),
    ("tagdelete <name>", "Deletes a tag (manage messages)."),
    ("taglist", "Lists every tag."),
    ("setsticky #channel <message>", "Keeps a message at the bottom of a channel (manage messages)."),
    ("saveltc <address>", "Saves your LTC address (staff)."),
    ("saveeth <address>", "Saves your ETH address (staff)."),
    ("servers <gag|mm2|sab>", "Posts server choices inside a ticket."),
    ("vouch @user", "DMs a user asking for a vouch (staff)."),
    ("say <message>", "Makes the bot say something (admin)."),
    ("sayembed title: .. description: ..", "Makes the bot post an embed (admin)."),
    ("ban @user [reason]", "Bans a member (ban members)."),
    ("unban <id> [reason]", "Unbans a user (ban members)."),
    ("kick @user [reason]", "Kicks a member (kick members)."),
    ("timeout @user <10m|1h|..> [reason]", "Times a member out (moderate members)."),
    ("untimeout @user [reason]", "Removes a timeout (moderate members)."),
    ("warn @user [reason]", "Warns a member (kick members)."),
    ("lock", "Stops @everyone posting here (manage channels)."),
    ("unlock", "Lets @everyone post here again (manage channels)."),
    ("mmban @user [reason]", "Gives a member the MM Banned role (manage roles)."),
    ("role @user @role [reason]", "Gives a member a role (manage roles)."),
    ("help", "Shows this list."),
];

/// Splits `$name args` into the lowercased command name and its arguments.
///
/// # Returns
/// - `Some((name, args))` - Content starts with `prefix` followed by a name
/// - `None` - Not a command
pub fn parse_command<'a>(content: &'a str, prefix: &str) -> Option<(String, &'a str)> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let (name, args) = next_token(rest)?;

    Some((canonical_name(&name.to_lowercase()).to_string(), args))
}

/// First whitespace-separated token and the trimmed remainder.
pub fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }

    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], input[end..].trim())),
        None => Some((input, "")),
    }
}

fn canonical_name(name: &str) -> &str {
    match name {
        "quotaboard" | "qboard" => "quota",
        "middlemanlb" | "mmlboard" => "mmlb",
        "resetmiddlemanlb" => "resetmmlb",
        "save" => "s",
        "apply" => "a",
        other => other,
    }
}

/// Everything a command needs about its invocation.
pub struct CommandContext<'a> {
    pub ctx: &'a Context,
    pub handler: &'a Handler,
    pub message: &'a Message,
    pub guild_id: GuildId,
    pub caller: Caller,
    pub platform: DiscordPlatform,
    pub responder: CommandResponder,
    /// Argument text after the command name.
    pub args: &'a str,
}

impl<'a> CommandContext<'a> {
    pub fn db(&self) -> &DatabaseConnection {
        &self.handler.db
    }

    pub fn config(&self) -> &Config {
        &self.handler.config
    }

    pub fn channel_id(&self) -> u64 {
        self.message.channel_id.get()
    }

    pub async fn reply_text(&self, text: impl Into<String>) -> Result<(), AppError> {
        self.responder.reply(Reply::text(text)).await
    }

    pub async fn reply(&self, reply: Reply) -> Result<(), AppError> {
        self.responder.reply(reply).await
    }

    /// Posts a plain message in the command's channel, not as a reply.
    pub async fn say(&self, content: impl Into<String>) -> Result<(), AppError> {
        self.responder.follow_up(Reply::text(content)).await
    }

    pub async fn say_embed(&self, embed: CreateEmbed) -> Result<(), AppError> {
        self.responder.follow_up(Reply::embed(embed)).await
    }

    /// Sends a prebuilt message as a reply to the invoking message.
    pub async fn send(&self, message: CreateMessage) -> Result<(), AppError> {
        let message = message
            .reference_message(self.message)
            .allowed_mentions(CreateAllowedMentions::new().replied_user(false).all_users(true));

        self.message
            .channel_id
            .send_message(&self.ctx.http, message)
            .await?;
        Ok(())
    }

    /// Category of the channel the command was used in.
    pub async fn parent_id(&self) -> Result<Option<u64>, AppError> {
        let channel = self.message.channel_id.to_channel(self.ctx).await?;

        Ok(channel
            .guild()
            .and_then(|channel| channel.parent_id)
            .map(|id| id.get()))
    }

    /// Usage hint for this command.
    pub fn usage(&self, usage: &str) -> AppError {
        AppError::BadRequest(format!("Usage: `{}{}`", self.config().command_prefix, usage))
    }

    /// Resolves a member mention or id.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Token is not a mention or id
    /// - `Err(AppError::NotFound)` - No such member in this guild
    pub async fn member(&self, token: &str) -> Result<Member, AppError> {
        let user_id = parse_mention(token)
            .ok_or_else(|| AppError::BadRequest("Please mention a member.".to_string()))?;

        self.guild_id
            .member(self.ctx, UserId::new(user_id))
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    AppError::NotFound("Member not found.".to_string())
                } else {
                    e.into()
                }
            })
    }

    /// Resolves a channel mention, defaulting to the current channel.
    pub fn channel_or_current(&self, token: Option<&str>) -> Result<ChannelId, AppError> {
        match token {
            None => Ok(self.message.channel_id),
            Some(token) => parse_mention(token)
                .map(ChannelId::new)
                .ok_or_else(|| AppError::BadRequest("Please mention a channel.".to_string())),
        }
    }
}

/// Runs the command `name`; unknown names are ignored.
pub async fn dispatch(cmd: &CommandContext<'_>, name: &str) -> Result<(), AppError> {
    match name {
        "setup" => ticket::setup(cmd).await,
        "close" => ticket::close(cmd).await,
        "open" => ticket::open(cmd).await,
        "add" => ticket::add(cmd).await,
        "remove" => ticket::remove(cmd).await,
        "rename" => ticket::rename(cmd).await,
        "delete" => ticket::delete(cmd).await,
        "format" => ticket::format(cmd).await,
        "transcript" => ticket::transcript(cmd).await,

        "resetlb" => leaderboard::reset_clients(cmd).await,
        "mmlb" => leaderboard::middlemen(cmd).await,
        "resetmmlb" => leaderboard::reset_middlemen(cmd).await,
        "quota" => leaderboard::quota(cmd).await,

        "i" => roblox::info(cmd).await,
        "s" => roblox::save(cmd).await,
        "a" => roblox::saved(cmd).await,

        "tagcreate" => tag::create(cmd).await,
        "tag" => tag::show(cmd).await,
        "tagdelete" => tag::delete(cmd).await,
        "taglist" => tag::list(cmd).await,

        "setsticky" => utility::set_sticky(cmd).await,
        "saveltc" => utility::save_ltc(cmd).await,
        "saveeth" => utility::save_eth(cmd).await,
        "servers" => utility::servers(cmd).await,
        "vouch" => utility::vouch_request(cmd).await,
        "say" => utility::say(cmd).await,
        "sayembed" => utility::say_embed(cmd).await,
        "help" => utility::help(cmd).await,

        "ban" => moderation::ban(cmd).await,
        "unban" => moderation::unban(cmd).await,
        "kick" => moderation::kick(cmd).await,
        "timeout" => moderation::timeout(cmd).await,
        "untimeout" => moderation::untimeout(cmd).await,
        "warn" => moderation::warn(cmd).await,
        "lock" => moderation::lock(cmd).await,
        "unlock" => moderation::unlock(cmd).await,
        "mmban" => moderation::mm_ban(cmd).await,
        "role" => moderation::role(cmd).await,

        other => {
            tracing::debug!("Ignoring unknown command {}", other);
            Ok(())
        }
    }
}
