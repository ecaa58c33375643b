use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(string(Ticket::ChannelId).primary_key())
                    .col(string(Ticket::User1))
                    .col(string_null(Ticket::User2))
                    .col(string_null(Ticket::ClaimedBy))
                    .col(text(Ticket::Trade))
                    .col(text(Ticket::Side1))
                    .col(text(Ticket::Side2))
                    .col(timestamp_with_time_zone_null(Ticket::ClosedAt))
                    .col(timestamp_with_time_zone(Ticket::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ticket {
    Table,
    ChannelId,
    User1,
    User2,
    ClaimedBy,
    Trade,
    Side1,
    Side2,
    ClosedAt,
    CreatedAt,
}
