use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeeklyQuota::Table)
                    .if_not_exists()
                    .col(string(WeeklyQuota::UserId).primary_key())
                    .col(integer(WeeklyQuota::Completed).default(0))
                    .col(integer(WeeklyQuota::Week))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeeklyQuota::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WeeklyQuota {
    Table,
    UserId,
    Completed,
    Week,
}
