//! Lifetime middleman counters backing the middleman leaderboard.

use sea_orm::{
    sea_query::{Expr, ExprTrait, OnConflict},
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::leaderboard::LeaderboardEntry;

pub struct MiddlemanRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MiddlemanRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Adds one completed ticket to `user_id`, creating the record if absent.
    ///
    /// # Arguments
    /// - `user_id` - Middleman id
    /// - `week` - ISO week of the completion, stored as the last active week
    pub async fn increment(&self, user_id: u64, week: i32) -> Result<(), DbErr> {
        entity::prelude::Middleman::insert(entity::middleman::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            completed: ActiveValue::Set(1),
            week: ActiveValue::Set(week),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::middleman::Column::UserId)
                .value(
                    entity::middleman::Column::Completed,
                    Expr::col(entity::middleman::Column::Completed).add(1),
                )
                .update_column(entity::middleman::Column::Week)
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Lifetime completed tickets for `user_id`, 0 when no record exists.
    pub async fn get_completed(&self, user_id: u64) -> Result<i32, DbErr> {
        let record = entity::prelude::Middleman::find()
            .filter(entity::middleman::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?;

        Ok(record.map(|r| r.completed).unwrap_or(0))
    }

    /// Highest completed counts, ties in insertion order.
    pub async fn top(&self, limit: u64) -> Result<Vec<LeaderboardEntry>, DbErr> {
        entity::prelude::Middleman::find()
            .order_by_desc(entity::middleman::Column::Completed)
            .order_by_asc(entity::middleman::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(LeaderboardEntry::from_middleman)
            .collect()
    }

    /// Zeroes every completed count without deleting any record.
    pub async fn reset_all(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::Middleman::update_many()
            .col_expr(entity::middleman::Column::Completed, Expr::value(0))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
