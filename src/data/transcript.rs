use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::model::transcript::CreateTranscriptParam;

pub struct TranscriptRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TranscriptRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a generated transcript. Records are never updated.
    ///
    /// # Returns
    /// - `Ok(i32)` - Id of the new record
    pub async fn create(&self, param: CreateTranscriptParam) -> Result<i32, DbErr> {
        let participants = serde_json::to_value(&param.participants)
            .map_err(|e| DbErr::Custom(format!("Failed to encode participants: {}", e)))?;

        let entity = entity::transcript::ActiveModel {
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            channel_name: ActiveValue::Set(param.channel_name),
            participants: ActiveValue::Set(participants),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(entity.id)
    }
}
