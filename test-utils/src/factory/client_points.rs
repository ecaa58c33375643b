//! Client points factory.

use crate::factory::helpers::next_snowflake;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating client point counters.
pub struct ClientPointsFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    points: i32,
}

impl<'a> ClientPointsFactory<'a> {
    /// Creates a new factory for a unique user with 1 point.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            user_id: next_snowflake(),
            points: 1,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    /// Builds and inserts the counter into the database.
    pub async fn build(self) -> Result<entity::client_points::Model, DbErr> {
        entity::client_points::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            points: ActiveValue::Set(self.points),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a counter for `user_id` holding `points`.
pub async fn create_client_points(
    db: &DatabaseConnection,
    user_id: impl Into<String>,
    points: i32,
) -> Result<entity::client_points::Model, DbErr> {
    ClientPointsFactory::new(db)
        .user_id(user_id)
        .points(points)
        .build()
        .await
}
