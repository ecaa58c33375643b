use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaderboardMessage::Table)
                    .if_not_exists()
                    .col(string(LeaderboardMessage::Kind).primary_key())
                    .col(string(LeaderboardMessage::ChannelId))
                    .col(string(LeaderboardMessage::MessageId))
                    .col(timestamp_with_time_zone(LeaderboardMessage::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeaderboardMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LeaderboardMessage {
    Table,
    Kind,
    ChannelId,
    MessageId,
    UpdatedAt,
}
