//! Middleman ticket keyed by the Discord channel hosting it.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub channel_id: String,
    pub user1: String,
    pub user2: Option<String>,
    pub claimed_by: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub trade: String,
    #[sea_orm(column_type = "Text")]
    pub side1: String,
    #[sea_orm(column_type = "Text")]
    pub side2: String,
    pub closed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
