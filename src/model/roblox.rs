//! Roblox profile data shown by the `i` and `a` commands.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Profile assembled from the users, friends and thumbnails APIs.
#[derive(Debug, Clone, PartialEq)]
pub struct RobloxProfile {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub is_banned: bool,
    pub followers: u64,
    pub following: u64,
    pub headshot_url: Option<String>,
}

impl RobloxProfile {
    pub fn profile_url(&self) -> String {
        format!("https://www.roblox.com/users/{}/profile", self.id)
    }

    /// Whole days between account creation and `now`.
    pub fn account_age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created).num_days()
    }
}

/// `POST users.roblox.com/v1/usernames/users` response.
#[derive(Debug, Deserialize)]
pub struct UsernameLookup {
    pub data: Vec<UsernameMatch>,
}

#[derive(Debug, Deserialize)]
pub struct UsernameMatch {
    pub id: u64,
    pub name: String,
}

/// `GET users.roblox.com/v1/users/{id}` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub is_banned: bool,
}

/// `followers/count` and `followings/count` responses.
#[derive(Debug, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// `thumbnails.roblox.com/v1/users/avatar-headshot` response.
#[derive(Debug, Deserialize)]
pub struct ThumbnailResponse {
    pub data: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub image_url: Option<String>,
}
