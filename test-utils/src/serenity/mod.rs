//! Test factories for creating Serenity API objects.
//!
//! These factories build valid Serenity structs by deserializing JSON,
//! simulating what Discord's API would return.
//!
//! # Available Factories
//!
//! - `channel::create_test_text_channel` - Create Serenity GuildChannel objects

pub mod channel;

pub use channel::create_test_text_channel;
