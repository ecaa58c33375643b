//! Database repository layer.
//!
//! Repository structs wrap a borrowed `DatabaseConnection` and expose the
//! queries each service needs. SeaORM entity models stay inside this layer;
//! callers receive the domain models from `crate::model`.

pub mod client_points;
pub mod crypto_address;
pub mod leaderboard_message;
pub mod middleman;
pub mod roblox_user;
pub mod tag;
pub mod ticket;
pub mod transcript;
pub mod weekly_quota;

#[cfg(test)]
mod test;
