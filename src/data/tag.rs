use sea_orm::{
    sea_query::OnConflict, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

use crate::model::tag::Tag;

pub struct TagRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the tag or replaces the message of an existing one.
    pub async fn upsert(&self, name: &str, message: &str) -> Result<(), DbErr> {
        entity::prelude::Tag::insert(entity::tag::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            message: ActiveValue::Set(message.to_string()),
        })
        .on_conflict(
            OnConflict::column(entity::tag::Column::Name)
                .update_column(entity::tag::Column::Message)
                .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, DbErr> {
        let entity = entity::prelude::Tag::find_by_id(name.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(Tag::from_entity))
    }

    /// # Returns
    /// - `Ok(true)` - Tag deleted
    /// - `Ok(false)` - No tag with that name
    pub async fn delete(&self, name: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Tag::delete_by_id(name.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Every tag name in alphabetical order.
    pub async fn list_names(&self) -> Result<Vec<String>, DbErr> {
        let tags = entity::prelude::Tag::find()
            .order_by_asc(entity::tag::Column::Name)
            .all(self.db)
            .await?;

        Ok(tags.into_iter().map(|t| t.name).collect())
    }
}
