use crate::{
    data::leaderboard_message::LeaderboardMessageRepository, error::AppError,
    model::leaderboard::BoardKind,
};
use sea_orm::EntityTrait;
use test_utils::builder::TestBuilder;

mod upsert;
