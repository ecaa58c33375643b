use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CryptoAddress::Table)
                    .if_not_exists()
                    .col(pk_auto(CryptoAddress::Id))
                    .col(string(CryptoAddress::UserId))
                    .col(string(CryptoAddress::Currency))
                    .col(string(CryptoAddress::Address))
                    .to_owned(),
            )
            .await?;

        // One address per currency per user
        manager
            .create_index(
                Index::create()
                    .name("idx_crypto_address_user_currency")
                    .table(CryptoAddress::Table)
                    .col(CryptoAddress::UserId)
                    .col(CryptoAddress::Currency)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_crypto_address_user_currency")
                    .table(CryptoAddress::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CryptoAddress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CryptoAddress {
    Table,
    Id,
    UserId,
    Currency,
    Address,
}
