use crate::{
    data::crypto_address::CryptoAddressRepository, error::AppError, model::crypto::Currency,
};
use test_utils::builder::TestBuilder;

mod save;
