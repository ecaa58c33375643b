//! Discord side of the middleman service.
//!
//! Gateway events reach [`handler::Handler`], which routes guild messages to
//! the prefix commands in [`command`] and vouch detection, and button presses
//! and modal submissions to the ticket, vouch and crypto services. Services
//! talk to Discord through [`platform::DiscordPlatform`]; commands and
//! interactions answer through the [`responder::Responder`] trait.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Channel create and delete events
//! - `GUILD_MESSAGES` - Commands, vouches and sticky messages
//! - `GUILD_MEMBERS` - Welcome messages (privileged intent)
//! - `MESSAGE_CONTENT` - Reading command and vouch text (privileged intent)
//!
//! Both privileged intents must be enabled in the Discord Developer Portal.

pub mod command;
pub mod handler;
pub mod payload;
pub mod permission;
pub mod platform;
pub mod responder;
pub mod start;
