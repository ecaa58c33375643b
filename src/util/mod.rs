pub mod parse;
pub mod week;
