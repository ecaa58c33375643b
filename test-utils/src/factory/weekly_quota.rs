//! Weekly quota factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a quota row for `user_id` with an explicit count and ISO week.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Middleman id
/// - `completed` - Tickets completed in `week`
/// - `week` - ISO week number the count belongs to
pub async fn create_weekly_quota(
    db: &DatabaseConnection,
    user_id: impl Into<String>,
    completed: i32,
    week: i32,
) -> Result<entity::weekly_quota::Model, DbErr> {
    entity::weekly_quota::ActiveModel {
        user_id: ActiveValue::Set(user_id.into()),
        completed: ActiveValue::Set(completed),
        week: ActiveValue::Set(week),
    }
    .insert(db)
    .await
}
