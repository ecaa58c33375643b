use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::crypto::Currency;

pub struct CryptoAddressRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CryptoAddressRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Saves the user's address for `currency`, replacing any previous one.
    pub async fn save(&self, user_id: u64, currency: Currency, address: &str) -> Result<(), DbErr> {
        let existing = entity::prelude::CryptoAddress::find()
            .filter(entity::crypto_address::Column::UserId.eq(user_id.to_string()))
            .filter(entity::crypto_address::Column::Currency.eq(currency.as_str()))
            .one(self.db)
            .await?;

        if let Some(existing) = existing {
            let mut active: entity::crypto_address::ActiveModel = existing.into();
            active.address = ActiveValue::Set(address.to_string());
            active.update(self.db).await?;
        } else {
            entity::crypto_address::ActiveModel {
                user_id: ActiveValue::Set(user_id.to_string()),
                currency: ActiveValue::Set(currency.as_str().to_string()),
                address: ActiveValue::Set(address.to_string()),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    pub async fn find(&self, user_id: u64, currency: Currency) -> Result<Option<String>, DbErr> {
        let record = entity::prelude::CryptoAddress::find()
            .filter(entity::crypto_address::Column::UserId.eq(user_id.to_string()))
            .filter(entity::crypto_address::Column::Currency.eq(currency.as_str()))
            .one(self.db)
            .await?;

        Ok(record.map(|r| r.address))
    }
}
