//! Cron jobs run alongside the bot.
//!
//! - `quota_rollover` - Daily sweep resetting quota records from past weeks

pub mod quota_rollover;
