//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot layer (commands, buttons, gateway events) and
//! the data layer. They work with domain models, coordinate repository calls,
//! and reach the chat platform only through the [`platform::ChatPlatform`] seam.

pub mod crypto;
pub mod leaderboard;
pub mod moderation;
pub mod platform;
pub mod quota;
pub mod roblox;
pub mod servers;
pub mod sticky;
pub mod ticket;
pub mod transcript;
pub mod vouch;
pub mod welcome;

#[cfg(test)]
mod test;

/// Colour of the bot's general-purpose embeds.
pub const EMBED_COLOR: u32 = 0x000000;
