use sea_orm::EntityTrait;
use crate::{data::middleman::MiddlemanRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

mod increment;
