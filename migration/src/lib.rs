pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_ticket_table;
mod m20260301_000002_create_client_points_table;
mod m20260301_000003_create_middleman_table;
mod m20260301_000004_create_weekly_quota_table;
mod m20260301_000005_create_tag_table;
mod m20260301_000006_create_saved_roblox_user_table;
mod m20260301_000007_create_crypto_address_table;
mod m20260301_000008_create_transcript_table;
mod m20260301_000009_create_leaderboard_message_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_ticket_table::Migration),
            Box::new(m20260301_000002_create_client_points_table::Migration),
            Box::new(m20260301_000003_create_middleman_table::Migration),
            Box::new(m20260301_000004_create_weekly_quota_table::Migration),
            Box::new(m20260301_000005_create_tag_table::Migration),
            Box::new(m20260301_000006_create_saved_roblox_user_table::Migration),
            Box::new(m20260301_000007_create_crypto_address_table::Migration),
            Box::new(m20260301_000008_create_transcript_table::Migration),
            Box::new(m20260301_000009_create_leaderboard_message_table::Migration),
        ]
    }
}
