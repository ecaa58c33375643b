use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Middleman::Table)
                    .if_not_exists()
                    .col(pk_auto(Middleman::Id))
                    .col(string_uniq(Middleman::UserId))
                    .col(integer(Middleman::Completed).default(0))
                    .col(integer(Middleman::Week).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Middleman::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Middleman {
    Table,
    Id,
    UserId,
    Completed,
    Week,
}
