pub use super::client_points::Entity as ClientPoints;
pub use super::crypto_address::Entity as CryptoAddress;
pub use super::leaderboard_message::Entity as LeaderboardMessage;
pub use super::middleman::Entity as Middleman;
pub use super::saved_roblox_user::Entity as SavedRobloxUser;
pub use super::tag::Entity as Tag;
pub use super::ticket::Entity as Ticket;
pub use super::transcript::Entity as Transcript;
pub use super::weekly_quota::Entity as WeeklyQuota;
