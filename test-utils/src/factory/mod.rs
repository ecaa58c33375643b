//! Factory methods for creating test data.
//!
//! Each table has its own factory module with a `Factory` struct for
//! customization and a `create_*` convenience function for quick default
//! creation. Factories insert directly through SeaORM active models, bypassing
//! the repositories under test.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let ticket = factory::create_ticket(&db).await?;
//! let points = factory::client_points::ClientPointsFactory::new(&db)
//!     .user_id("42")
//!     .points(7)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `ticket` - Ticket rows with generated channel and requester ids
//! - `client_points` - Client point counters
//! - `middleman` - Lifetime middleman counters
//! - `weekly_quota` - Weekly quota counters
//! - `tag` - Stored tags
//! - `helpers` - Shared id generation

pub mod client_points;
pub mod helpers;
pub mod middleman;
pub mod tag;
pub mod ticket;
pub mod weekly_quota;

pub use client_points::create_client_points;
pub use middleman::create_middleman;
pub use tag::create_tag;
pub use ticket::create_ticket;
pub use weekly_quota::create_weekly_quota;
