use crate::{data::client_points::ClientPointsRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

mod increment;
mod reset_all;
mod top;
