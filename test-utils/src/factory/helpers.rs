//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Offset keeping generated ids in the range of real Discord snowflakes.
const SNOWFLAKE_BASE: u64 = 100_000_000_000_000_000;

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Gets a unique snowflake-shaped id as a string.
///
/// Repositories parse stored ids back into `u64`, so factory defaults must be
/// numeric.
///
/// # Returns
/// - `String` - Unique numeric id
pub fn next_snowflake() -> String {
    (SNOWFLAKE_BASE + next_id()).to_string()
}
