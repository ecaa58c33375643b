//! Domain models passed between repositories, services and the bot layer.
//!
//! Repositories convert SeaORM entity models into these types at the data
//! boundary, parsing stored snowflakes back into `u64`.

pub mod component;
pub mod crypto;
pub mod leaderboard;
pub mod quota;
pub mod roblox;
pub mod tag;
pub mod ticket;
pub mod transcript;
