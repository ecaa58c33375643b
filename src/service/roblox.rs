//! Roblox profile lookups for the `i`, `s` and `a` commands.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use sea_orm::DatabaseConnection;
use serde_json::json;
use serenity::all::{
    CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateMessage, Timestamp,
};

use crate::{
    data::roblox_user::SavedRobloxUserRepository,
    error::AppError,
    model::roblox::{
        CountResponse, RobloxProfile, ThumbnailResponse, UserDetails, UsernameLookup,
    },
    service::EMBED_COLOR,
};

const USERS_API: &str = "https://users.roblox.com";
const FRIENDS_API: &str = "https://friends.roblox.com";
const THUMBNAILS_API: &str = "https://thumbnails.roblox.com";

const FALLBACK_THUMBNAIL: &str = "https://www.roblox.com/images/logo/roblox_logo_300x300.png";
const BANNED_COLOR: u32 = 0xFF0000;

/// Thin client over the public Roblox users, friends and thumbnails APIs.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct RobloxClient {
    http: reqwest::Client,
    users_api: String,
    friends_api: String,
    thumbnails_api: String,
}

impl RobloxClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_urls(http, USERS_API, FRIENDS_API, THUMBNAILS_API)
    }

    /// Client pointed at alternative API hosts.
    pub fn with_base_urls(
        http: reqwest::Client,
        users_api: &str,
        friends_api: &str,
        thumbnails_api: &str,
    ) -> Self {
        Self {
            http,
            users_api: users_api.trim_end_matches('/').to_string(),
            friends_api: friends_api.trim_end_matches('/').to_string(),
            thumbnails_api: thumbnails_api.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves a username to its user id, including banned accounts.
    pub async fn resolve_username(&self, username: &str) -> Result<Option<u64>, AppError> {
        let lookup: UsernameLookup = self
            .http
            .post(format!("{}/v1/usernames/users", self.users_api))
            .json(&json!({ "usernames": [username], "excludeBannedUsers": false }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(lookup.data.first().map(|user| user.id))
    }

    /// Fetches account details; `None` when the id does not exist.
    pub async fn user_details(&self, user_id: u64) -> Result<Option<UserDetails>, AppError> {
        let response = self
            .http
            .get(format!("{}/v1/users/{}", self.users_api, user_id))
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST
        ) {
            return Ok(None);
        }

        Ok(Some(response.error_for_status()?.json().await?))
    }

    async fn count(&self, user_id: u64, kind: &str) -> Result<u64, AppError> {
        let count: CountResponse = self
            .http
            .get(format!(
                "{}/v1/users/{}/{}/count",
                self.friends_api, user_id, kind
            ))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(count.count)
    }

    /// URL of the user's avatar headshot, if the thumbnail is ready.
    pub async fn headshot_url(&self, user_id: u64) -> Result<Option<String>, AppError> {
        let thumbnails: ThumbnailResponse = self
            .http
            .get(format!("{}/v1/users/avatar-headshot", self.thumbnails_api))
            .query(&[
                ("userIds", user_id.to_string().as_str()),
                ("size", "420x420"),
                ("format", "Png"),
                ("isCircular", "false"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(thumbnails
            .data
            .into_iter()
            .next()
            .and_then(|thumb| thumb.image_url))
    }

    /// Resolves a username, or a numeric id, to account details.
    ///
    /// # Returns
    /// - `Ok(UserDetails)` - Account found
    /// - `Err(AppError::NotFound)` - No account by that name or id
    pub async fn find_user(&self, query: &str) -> Result<UserDetails, AppError> {
        let query = query.trim();
        let not_found = || AppError::NotFound(format!("Could not find Roblox user `{}`.", query));

        let user_id = match query.parse::<u64>() {
            Ok(id) => id,
            Err(_) => self
                .resolve_username(query)
                .await?
                .ok_or_else(not_found)?,
        };

        self.user_details(user_id).await?.ok_or_else(not_found)
    }

    /// Full profile with follower counts and headshot.
    pub async fn profile(&self, user_id: u64) -> Result<RobloxProfile, AppError> {
        let details = self
            .user_details(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        let (followers, following, headshot_url) = tokio::try_join!(
            self.count(user_id, "followers"),
            self.count(user_id, "followings"),
            self.headshot_url(user_id),
        )?;

        Ok(RobloxProfile {
            id: details.id,
            name: details.name,
            display_name: details.display_name,
            description: details.description,
            created: details.created,
            is_banned: details.is_banned,
            followers,
            following,
            headshot_url,
        })
    }

    /// Profile for a username as typed by a user.
    pub async fn profile_by_username(&self, username: &str) -> Result<RobloxProfile, AppError> {
        let user_id = self
            .resolve_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        self.profile(user_id).await
    }
}

/// Saved Roblox accounts, keyed by Discord user.
pub struct RobloxService<'a> {
    db: &'a DatabaseConnection,
    client: &'a RobloxClient,
}

impl<'a> RobloxService<'a> {
    pub fn new(db: &'a DatabaseConnection, client: &'a RobloxClient) -> Self {
        Self { db, client }
    }

    /// Resolves `query` and saves the account for `user_id`.
    pub async fn save(&self, user_id: u64, query: &str) -> Result<UserDetails, AppError> {
        let details = self.client.find_user(query).await?;

        SavedRobloxUserRepository::new(self.db)
            .save(user_id, details.id)
            .await?;

        tracing::info!("Saved Roblox user {} for {}", details.id, user_id);

        Ok(details)
    }

    /// Profile of the account `user_id` saved, if they saved one.
    pub async fn saved_profile(&self, user_id: u64) -> Result<Option<RobloxProfile>, AppError> {
        let Some(roblox_id) = SavedRobloxUserRepository::new(self.db)
            .find_roblox_id(user_id)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(self.client.profile(roblox_id).await?))
    }
}

/// Account age in years, to one decimal place.
pub fn account_age_years(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{:.1} years", (now - created).num_days() as f64 / 365.0)
}

/// Largest whole unit elapsed since `created`, e.g. `3d ago`.
pub fn time_ago(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - created;

    if elapsed.num_days() > 0 {
        format!("{}d ago", elapsed.num_days())
    } else if elapsed.num_hours() > 0 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_minutes() > 0 {
        format!("{}m ago", elapsed.num_minutes())
    } else {
        format!("{}s ago", elapsed.num_seconds().max(0))
    }
}

fn profile_button(profile: &RobloxProfile, label: &str) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new_link(profile.profile_url()).label(label)
    ])
}

/// Reply to `i <username>`.
pub fn info_message(profile: &RobloxProfile, now: DateTime<Utc>) -> CreateMessage {
    let mut embed = CreateEmbed::new()
        .title("Roblox User Information")
        .color(EMBED_COLOR)
        .field("Display Name", &profile.display_name, true)
        .field("Username", &profile.name, true)
        .field("User ID", profile.id.to_string(), true)
        .field("\u{200B}", "\u{200B}", false)
        .field(
            "Account Created",
            format!("<t:{}:F>", profile.created.timestamp()),
            true,
        )
        .field("Account Age", account_age_years(profile.created, now), true)
        .field("\u{200B}", "\u{200B}", false)
        .field("Followers", profile.followers.to_string(), true)
        .field("Following", profile.following.to_string(), true)
        .footer(CreateEmbedFooter::new("Roblox Profile Info"))
        .timestamp(Timestamp::now());

    if let Some(headshot) = &profile.headshot_url {
        embed = embed.thumbnail(headshot);
    }

    CreateMessage::new()
        .embed(embed)
        .components(vec![profile_button(profile, "View Profile")])
}

/// Reply to `a [@member]`, showing the account a member saved.
pub fn saved_message(
    profile: &RobloxProfile,
    saved_for: &str,
    now: DateTime<Utc>,
) -> CreateMessage {
    let thumbnail = profile
        .headshot_url
        .clone()
        .unwrap_or_else(|| FALLBACK_THUMBNAIL.to_string());

    let mut embed = CreateEmbed::new()
        .author(
            CreateEmbedAuthor::new(&profile.name)
                .url(profile.profile_url())
                .icon_url(&thumbnail),
        )
        .thumbnail(&thumbnail)
        .color(if profile.is_banned {
            BANNED_COLOR
        } else {
            EMBED_COLOR
        })
        .field("Display Name", format!("`{}`", profile.display_name), true)
        .field("ID", format!("`{}`", profile.id), true)
        .field(
            "Created",
            format!(
                "{}\n{}",
                profile.created.format("%Y-%m-%d %H:%M:%S UTC"),
                time_ago(profile.created, now)
            ),
            false,
        );

    if !profile.description.is_empty() {
        let description: String = profile.description.chars().take(1020).collect();
        embed = embed.field("Description", description, false);
    }
    if profile.is_banned {
        embed = embed.field("Status", "BANNED", false);
    }

    embed = embed
        .footer(CreateEmbedFooter::new(format!("Saved for {}", saved_for)))
        .timestamp(Timestamp::now());

    CreateMessage::new()
        .embed(embed)
        .components(vec![profile_button(profile, "Profile Link")])
}
