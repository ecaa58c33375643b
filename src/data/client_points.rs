//! Client points repository backing the client leaderboard.

use sea_orm::{
    sea_query::{Expr, ExprTrait, OnConflict},
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::model::leaderboard::LeaderboardEntry;

pub struct ClientPointsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ClientPointsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds one point to `user_id`, creating the record if absent.
    ///
    /// A single upsert with the increment applied in SQL, so concurrent
    /// increments for the same user all land.
    pub async fn increment(&self, user_id: u64) -> Result<(), DbErr> {
        entity::prelude::ClientPoints::insert(entity::client_points::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            points: ActiveValue::Set(1),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::client_points::Column::UserId)
                .value(
                    entity::client_points::Column::Points,
                    Expr::col(entity::client_points::Column::Points).add(1),
                )
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Current points for `user_id`, 0 when no record exists.
    pub async fn get_points(&self, user_id: u64) -> Result<i32, DbErr> {
        let record = entity::prelude::ClientPoints::find()
            .filter(entity::client_points::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?;

        Ok(record.map(|r| r.points).unwrap_or(0))
    }

    /// Highest point totals, ties in insertion order.
    ///
    /// # Arguments
    /// - `limit` - Maximum number of rows
    pub async fn top(&self, limit: u64) -> Result<Vec<LeaderboardEntry>, DbErr> {
        entity::prelude::ClientPoints::find()
            .order_by_desc(entity::client_points::Column::Points)
            .order_by_asc(entity::client_points::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(LeaderboardEntry::from_client_points)
            .collect()
    }

    /// Zeroes every record without deleting any.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of records reset
    pub async fn reset_all(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::ClientPoints::update_many()
            .col_expr(entity::client_points::Column::Points, Expr::value(0))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
