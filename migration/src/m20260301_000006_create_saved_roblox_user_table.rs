use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavedRobloxUser::Table)
                    .if_not_exists()
                    .col(string(SavedRobloxUser::UserId).primary_key())
                    .col(string(SavedRobloxUser::RobloxId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedRobloxUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SavedRobloxUser {
    Table,
    UserId,
    RobloxId,
}
