use sea_orm::DbErr;

use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a stored snowflake at the repository boundary.
///
/// # Arguments
/// - `value` - Stored id
/// - `field` - Column name used in the error message
///
/// # Returns
/// - `Err(DbErr::Custom)` - Stored value is not a valid u64
pub fn parse_stored_id(value: &str, field: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
}

/// Extracts an id from a mention or a bare id.
///
/// Accepts `<@123>`, `<@!123>`, `<@&123>`, `<#123>` and `123`.
pub fn parse_mention(token: &str) -> Option<u64> {
    let token = token.trim();
    let inner = token
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .map(|t| t.trim_start_matches(['@', '#', '!', '&']))
        .unwrap_or(token);

    inner.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_mention_shape() {
        assert_eq!(parse_mention("<@123>"), Some(123));
        assert_eq!(parse_mention("<@!123>"), Some(123));
        assert_eq!(parse_mention("<@&123>"), Some(123));
        assert_eq!(parse_mention("<#123>"), Some(123));
        assert_eq!(parse_mention("123"), Some(123));
    }

    #[test]
    fn rejects_non_ids() {
        assert_eq!(parse_mention("everyone"), None);
        assert_eq!(parse_mention("<@abc>"), None);
        assert_eq!(parse_mention(""), None);
    }

    #[test]
    fn reports_unparseable_stored_id() {
        let err = parse_stored_id("abc", "user_id").unwrap_err();

        assert!(err.to_string().contains("user_id"));
    }

    #[test]
    fn parse_u64_from_string_wraps_error() {
        let err = parse_u64_from_string("x".to_string()).unwrap_err();

        assert!(matches!(
            err,
            AppError::InternalErr(InternalError::ParseStringId { .. })
        ));
    }
}
