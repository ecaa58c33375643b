use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClientPoints::Table)
                    .if_not_exists()
                    .col(pk_auto(ClientPoints::Id))
                    .col(string_uniq(ClientPoints::UserId))
                    .col(integer(ClientPoints::Points).default(0))
                    .to_owned(),
            )
            .await?;

        // Leaderboard reads sort on points
        manager
            .create_index(
                Index::create()
                    .name("idx_client_points_points")
                    .table(ClientPoints::Table)
                    .col(ClientPoints::Points)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_client_points_points")
                    .table(ClientPoints::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ClientPoints::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClientPoints {
    Table,
    Id,
    UserId,
    Points,
}
