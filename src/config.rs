//! Environment configuration.
//!
//! Every id the bot needs is read once at startup. Missing required values and
//! malformed ids fail fast with a `ConfigError` instead of surfacing on first use.

use std::collections::HashMap;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_BASE_URL: &str = "http://localhost:25267";
const DEFAULT_PORT: u16 = 25267;
const DEFAULT_TRANSCRIPTS_DIR: &str = "transcripts";
const DEFAULT_WEEKLY_QUOTA: i32 = 5;
const DEFAULT_COMMAND_PREFIX: &str = "$";

/// Custom emoji the bot reacts with in the vouches channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEmoji {
    pub name: String,
    pub id: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,

    pub owner_id: u64,
    pub middleman_role_id: u64,
    /// Role allowed to run staff commands; defaults to the middleman role.
    pub staff_role_id: u64,
    pub mm_banned_role_id: Option<u64>,

    pub ticket_category_id: u64,
    pub transcript_channel_id: u64,
    pub lb_channel_id: u64,
    pub lb_message_id: Option<u64>,
    pub mm_lb_channel_id: u64,
    pub quota_channel_id: Option<u64>,
    pub welcome_channel_id: Option<u64>,
    pub vouches_channel_id: Option<u64>,
    pub proofs_channel_id: Option<u64>,
    /// Personal vouch channel per middleman, keyed by middleman id.
    pub mm_vouch_channels: HashMap<u64, u64>,
    pub auto_react_emoji: Option<ReactionEmoji>,

    pub base_url: String,
    pub port: u16,
    pub transcripts_dir: String,
    pub weekly_quota: i32,
    pub command_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, or `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required variable present and well formed
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset or empty
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable could not be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let lb_channel_id = env.required_id("LB_CHANNEL_ID")?;
        let middleman_role_id = env.required_id("MIDDLEMAN_ROLE_ID")?;

        Ok(Self {
            discord_bot_token: env.required("DISCORD_BOT_TOKEN")?,
            database_url: env.required("DATABASE_URL")?,
            owner_id: env.required_id("OWNER_ID")?,
            middleman_role_id,
            staff_role_id: env.optional_id("STAFF_ROLE_ID")?.unwrap_or(middleman_role_id),
            mm_banned_role_id: env.optional_id("MM_BANNED_ROLE_ID")?,
            ticket_category_id: env.required_id("TICKET_CATEGORY_ID")?,
            transcript_channel_id: env.required_id("TRANSCRIPT_CHANNEL_ID")?,
            lb_channel_id,
            lb_message_id: env.optional_id("LB_MESSAGE_ID")?,
            mm_lb_channel_id: env.optional_id("MM_LB_CHANNEL_ID")?.unwrap_or(lb_channel_id),
            quota_channel_id: env.optional_id("QUOTA_CHANNEL_ID")?,
            welcome_channel_id: env.optional_id("WELCOME_CHANNEL_ID")?,
            vouches_channel_id: env.optional_id("VOUCHES_CHANNEL_ID")?,
            proofs_channel_id: env.optional_id("PROOFS_CHANNEL_ID")?,
            mm_vouch_channels: env.vouch_channels("MM_VOUCH_CHANNELS")?,
            auto_react_emoji: env.emoji("AUTO_REACT_EMOJI")?,
            base_url: env
                .optional("BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            port: env.parsed("PORT")?.unwrap_or(DEFAULT_PORT),
            transcripts_dir: env
                .optional("TRANSCRIPTS_DIR")
                .unwrap_or_else(|| DEFAULT_TRANSCRIPTS_DIR.to_string()),
            weekly_quota: env.parsed("WEEKLY_QUOTA")?.unwrap_or(DEFAULT_WEEKLY_QUOTA),
            command_prefix: env
                .optional("COMMAND_PREFIX")
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
        })
    }

    /// Middleman whose personal vouch channel is `channel_id`, if any.
    pub fn middleman_for_vouch_channel(&self, channel_id: u64) -> Option<u64> {
        self.mm_vouch_channels
            .iter()
            .find(|(_, channel)| **channel == channel_id)
            .map(|(mm, _)| *mm)
    }

    /// Public URL of a rendered HTML transcript.
    pub fn transcript_url(&self, channel_id: u64) -> String {
        format!("{}/transcripts/{}.html", self.base_url, channel_id)
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn parsed<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(name)
            .map(|value| {
                value.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    fn required_id(&self, name: &str) -> Result<u64, ConfigError> {
        self.optional_id(name)?
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    /// Parses a snowflake; `0` is treated as unset.
    fn optional_id(&self, name: &str) -> Result<Option<u64>, ConfigError> {
        Ok(self.parsed::<u64>(name)?.filter(|id| *id != 0))
    }

    /// Parses `mmId:channelId` pairs separated by commas.
    fn vouch_channels(&self, name: &str) -> Result<HashMap<u64, u64>, ConfigError> {
        let Some(raw) = self.optional(name) else {
            return Ok(HashMap::new());
        };

        let invalid = |reason: String| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason,
        };

        let mut channels = HashMap::new();
        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (mm, channel) = pair
                .split_once(':')
                .ok_or_else(|| invalid(format!("expected mmId:channelId, got '{}'", pair)))?;
            let mm = mm.trim().parse::<u64>().map_err(|e| invalid(e.to_string()))?;
            let channel = channel
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid(e.to_string()))?;
            channels.insert(mm, channel);
        }

        Ok(channels)
    }

    /// Parses a custom emoji given as `name:id`.
    fn emoji(&self, name: &str) -> Result<Option<ReactionEmoji>, ConfigError> {
        let Some(raw) = self.optional(name) else {
            return Ok(None);
        };

        let (emoji_name, id) = raw.split_once(':').ok_or_else(|| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: format!("expected name:id, got '{}'", raw),
        })?;
        let id = id.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(ReactionEmoji {
            name: emoji_name.to_string(),
            id,
        }))
    }
}
