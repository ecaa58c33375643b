use crate::{data::weekly_quota::WeeklyQuotaRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

mod record_completion;
mod rollover;
