//! Tag factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a tag named `name` with `message` as its body.
pub async fn create_tag(
    db: &DatabaseConnection,
    name: impl Into<String>,
    message: impl Into<String>,
) -> Result<entity::tag::Model, DbErr> {
    entity::tag::ActiveModel {
        name: ActiveValue::Set(name.into()),
        message: ActiveValue::Set(message.into()),
    }
    .insert(db)
    .await
}
