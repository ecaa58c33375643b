//! Ticket factory for creating test ticket rows.

use crate::factory::helpers::next_snowflake;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tickets with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::ticket::TicketFactory;
///
/// let ticket = TicketFactory::new(&db)
///     .user1("1")
///     .user2(Some("2"))
///     .claimed_by(Some("3"))
///     .build()
///     .await?;
/// ```
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: String,
    user1: String,
    user2: Option<String>,
    claimed_by: Option<String>,
    trade: String,
    closed_at: Option<DateTime<Utc>>,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory with default values.
    ///
    /// Defaults:
    /// - channel_id / user1: unique snowflake-shaped ids
    /// - user2 / claimed_by: `None`
    /// - trade: `"Trade"`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            channel_id: next_snowflake(),
            user1: next_snowflake(),
            user2: None,
            claimed_by: None,
            trade: "Trade".to_string(),
            closed_at: None,
        }
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn user1(mut self, user1: impl Into<String>) -> Self {
        self.user1 = user1.into();
        self
    }

    pub fn user2(mut self, user2: Option<&str>) -> Self {
        self.user2 = user2.map(str::to_string);
        self
    }

    pub fn claimed_by(mut self, claimed_by: Option<&str>) -> Self {
        self.claimed_by = claimed_by.map(str::to_string);
        self
    }

    pub fn trade(mut self, trade: impl Into<String>) -> Self {
        self.trade = trade.into();
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed_at = Some(Utc::now());
        self
    }

    /// Builds and inserts the ticket into the database.
    ///
    /// # Returns
    /// - `Ok(entity::ticket::Model)` - Created ticket row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            channel_id: ActiveValue::Set(self.channel_id),
            user1: ActiveValue::Set(self.user1),
            user2: ActiveValue::Set(self.user2),
            claimed_by: ActiveValue::Set(self.claimed_by),
            trade: ActiveValue::Set(self.trade),
            side1: ActiveValue::Set("Side one".to_string()),
            side2: ActiveValue::Set("Side two".to_string()),
            closed_at: ActiveValue::Set(self.closed_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unclaimed ticket with a single participant.
///
/// Shorthand for `TicketFactory::new(db).build().await`.
pub async fn create_ticket(db: &DatabaseConnection) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_ticket_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Ticket).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let ticket = create_ticket(db).await?;

        assert!(ticket.channel_id.parse::<u64>().is_ok());
        assert!(ticket.user1.parse::<u64>().is_ok());
        assert!(ticket.user2.is_none());
        assert!(ticket.claimed_by.is_none());
        assert!(ticket.closed_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_ticket_with_custom_values() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Ticket).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let ticket = TicketFactory::new(db)
            .channel_id("10")
            .user1("1")
            .user2(Some("2"))
            .claimed_by(Some("3"))
            .build()
            .await?;

        assert_eq!(ticket.channel_id, "10");
        assert_eq!(ticket.user2.as_deref(), Some("2"));
        assert_eq!(ticket.claimed_by.as_deref(), Some("3"));

        Ok(())
    }
}
