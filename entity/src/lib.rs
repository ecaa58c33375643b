//! SeaORM entity models for the middleman bot.
//!
//! One module per table. Discord snowflakes are stored as strings; the
//! repository layer parses them back into `u64` at the boundary.

pub mod prelude;

pub mod client_points;
pub mod crypto_address;
pub mod leaderboard_message;
pub mod middleman;
pub mod saved_roblox_user;
pub mod tag;
pub mod ticket;
pub mod transcript;
pub mod weekly_quota;
