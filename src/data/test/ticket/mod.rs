use crate::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{CreateTicketParam, TradeDetails},
};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory};

mod claim;
mod create;
mod delete;
mod find_open_claimed_by_participant;
mod mark_closed;
