use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transcript::Table)
                    .if_not_exists()
                    .col(pk_auto(Transcript::Id))
                    .col(string(Transcript::ChannelId))
                    .col(string(Transcript::ChannelName))
                    .col(json(Transcript::Participants))
                    .col(timestamp_with_time_zone(Transcript::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transcript::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Transcript {
    Table,
    Id,
    ChannelId,
    ChannelName,
    Participants,
    CreatedAt,
}
