//! Weekly quota repository.
//!
//! Both writers are single statements keyed on the stored week:
//! `record_completion` is one upsert that increments a current-week row and
//! restarts a stale one, and `rollover` only touches rows from another week.
//! A sweep racing a completion can therefore never zero a count recorded for
//! the current week.

use sea_orm::{
    sea_query::{Expr, ExprTrait, OnConflict},
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::quota::QuotaRecord;

pub struct WeeklyQuotaRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WeeklyQuotaRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records one completed ticket for `user_id` in `week`.
    ///
    /// Same week increments; a stale week restarts the count at 1; a missing
    /// record is created with a count of 1.
    pub async fn record_completion(&self, user_id: u64, week: i32) -> Result<(), DbErr> {
        let completed = Expr::case(
            Expr::col(entity::weekly_quota::Column::Week).eq(week),
            Expr::col(entity::weekly_quota::Column::Completed).add(1),
        )
        .finally(1);

        entity::prelude::WeeklyQuota::insert(entity::weekly_quota::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            completed: ActiveValue::Set(1),
            week: ActiveValue::Set(week),
        })
        .on_conflict(
            OnConflict::column(entity::weekly_quota::Column::UserId)
                .value(entity::weekly_quota::Column::Completed, completed)
                .update_column(entity::weekly_quota::Column::Week)
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Zeroes every record whose stored week differs from `week`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of records rolled over
    pub async fn rollover(&self, week: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::WeeklyQuota::update_many()
            .col_expr(entity::weekly_quota::Column::Completed, Expr::value(0))
            .col_expr(entity::weekly_quota::Column::Week, Expr::value(week))
            .filter(entity::weekly_quota::Column::Week.ne(week))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn find_by_user_id(&self, user_id: u64) -> Result<Option<QuotaRecord>, DbErr> {
        entity::prelude::WeeklyQuota::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
            .map(QuotaRecord::from_entity)
            .transpose()
    }

    /// Every quota record, highest count first.
    pub async fn get_all(&self) -> Result<Vec<QuotaRecord>, DbErr> {
        entity::prelude::WeeklyQuota::find()
            .order_by_desc(entity::weekly_quota::Column::Completed)
            .order_by_asc(entity::weekly_quota::Column::UserId)
            .all(self.db)
            .await?
            .into_iter()
            .map(QuotaRecord::from_entity)
            .collect()
    }
}
