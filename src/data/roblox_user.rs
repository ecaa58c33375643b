use sea_orm::{sea_query::OnConflict, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

pub struct SavedRobloxUserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SavedRobloxUserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Saves `roblox_id` for the Discord user, replacing any previous value.
    pub async fn save(&self, user_id: u64, roblox_id: u64) -> Result<(), DbErr> {
        entity::prelude::SavedRobloxUser::insert(entity::saved_roblox_user::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            roblox_id: ActiveValue::Set(roblox_id.to_string()),
        })
        .on_conflict(
            OnConflict::column(entity::saved_roblox_user::Column::UserId)
                .update_column(entity::saved_roblox_user::Column::RobloxId)
                .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// Roblox id saved by the Discord user, if any.
    pub async fn find_roblox_id(&self, user_id: u64) -> Result<Option<u64>, DbErr> {
        let saved = entity::prelude::SavedRobloxUser::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        saved
            .map(|s| crate::util::parse::parse_stored_id(&s.roblox_id, "roblox_id"))
            .transpose()
    }
}
