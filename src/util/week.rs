use chrono::{DateTime, Datelike, Utc};

/// ISO-8601 week number (Monday start) of `now`.
pub fn iso_week(now: DateTime<Utc>) -> i32 {
    now.iso_week().week() as i32
}

/// ISO week number of the current UTC time.
pub fn current_week() -> i32 {
    iso_week(Utc::now())
}
