//! Middleman counter factory.

use crate::factory::helpers::next_snowflake;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating lifetime middleman counters.
pub struct MiddlemanFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    completed: i32,
    week: i32,
}

impl<'a> MiddlemanFactory<'a> {
    /// Creates a new factory for a unique middleman with 1 completed ticket.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            user_id: next_snowflake(),
            completed: 1,
            week: 1,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn completed(mut self, completed: i32) -> Self {
        self.completed = completed;
        self
    }

    pub fn week(mut self, week: i32) -> Self {
        self.week = week;
        self
    }

    /// Builds and inserts the counter into the database.
    pub async fn build(self) -> Result<entity::middleman::Model, DbErr> {
        entity::middleman::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            completed: ActiveValue::Set(self.completed),
            week: ActiveValue::Set(self.week),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a middleman counter for `user_id` holding `completed`.
pub async fn create_middleman(
    db: &DatabaseConnection,
    user_id: impl Into<String>,
    completed: i32,
) -> Result<entity::middleman::Model, DbErr> {
    MiddlemanFactory::new(db)
        .user_id(user_id)
        .completed(completed)
        .build()
        .await
}
