//! Moderation helpers shared by the ban, kick, timeout and related commands.
//!
//! The Discord calls themselves live in the bot layer; this module parses
//! arguments and builds the confirmation embeds.

use std::collections::HashMap;

use chrono::Duration;
use serenity::all::CreateEmbed;

use crate::{error::AppError, service::EMBED_COLOR};

pub const DEFAULT_REASON: &str = "No reason provided.";

/// Longest timeout Discord accepts.
const MAX_TIMEOUT_DAYS: i64 = 28;

/// Parses a timeout duration such as `30s`, `10m`, `1h` or `7d`.
///
/// # Returns
/// - `Ok(Duration)` - Positive duration of at most 28 days
/// - `Err(AppError::BadRequest)` - Malformed, zero or too long
pub fn parse_duration(input: &str) -> Result<Duration, AppError> {
    let invalid = || AppError::BadRequest("Invalid duration. Use like `10m`, `1h`.".to_string());

    let input = input.trim();
    let unit = input.chars().last().ok_or_else(invalid)?;
    let amount: i64 = input[..input.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| invalid())?;

    if amount <= 0 {
        return Err(invalid());
    }

    let duration = match unit.to_ascii_lowercase() {
        's' => Duration::try_seconds(amount),
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        _ => None,
    }
    .ok_or_else(invalid)?;

    if duration > Duration::days(MAX_TIMEOUT_DAYS) {
        return Err(AppError::BadRequest(
            "Timeouts can last at most 28 days.".to_string(),
        ));
    }

    Ok(duration)
}

/// Reason text from the remaining command arguments.
pub fn reason_or_default(reason: &str) -> &str {
    let reason = reason.trim();
    if reason.is_empty() {
        DEFAULT_REASON
    } else {
        reason
    }
}

pub fn mod_embed(title: &str, description: String) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(EMBED_COLOR)
}

/// Confirmation for an action taken against a member.
pub fn member_action_embed(
    title: &str,
    target_id: u64,
    target_name: &str,
    reason: &str,
    moderator: &str,
) -> CreateEmbed {
    mod_embed(
        title,
        format!(
            "**User:** <@{}> ({})\n**Reason:** {}\n**Moderator:** {}",
            target_id, target_name, reason, moderator
        ),
    )
}

/// Splits `key: value` pairs such as `title: Rules description: Be nice`.
///
/// Keys are single words and are lowercased; text before the first key is
/// ignored.
pub fn parse_embed_fields(input: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for word in input.split_whitespace() {
        let key = word
            .strip_suffix(':')
            .filter(|key| !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));

        match key {
            Some(key) => {
                if let Some((name, words)) = current.take() {
                    fields.insert(name, words.join(" "));
                }
                current = Some((key.to_ascii_lowercase(), Vec::new()));
            }
            None => {
                if let Some((_, words)) = current.as_mut() {
                    words.push(word);
                }
            }
        }
    }

    if let Some((name, words)) = current {
        fields.insert(name, words.join(" "));
    }

    fields
}

/// Embed posted by `sayembed`.
pub fn say_embed(input: &str) -> Result<CreateEmbed, AppError> {
    let fields = parse_embed_fields(input);
    if !fields.contains_key("title") && !fields.contains_key("description") {
        return Err(AppError::BadRequest(
            "Provide at least `title:` or `description:`.".to_string(),
        ));
    }

    let mut embed = CreateEmbed::new().color(EMBED_COLOR);
    if let Some(title) = fields.get("title") {
        embed = embed.title(title);
    }
    if let Some(description) = fields.get("description") {
        embed = embed.description(description);
    }
    if let Some(footer) = fields.get("footer") {
        embed = embed.footer(serenity::all::CreateEmbedFooter::new(footer));
    }
    if let Some(thumbnail) = fields.get("thumbnail") {
        embed = embed.thumbnail(thumbnail);
    }
    if let Some(image) = fields.get("image") {
        embed = embed.image(image);
    }

    Ok(embed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::seconds(30));
        assert_eq!(parse_duration("10m").unwrap(), Duration::minutes(10));
        assert_eq!(parse_duration("1h").unwrap(), Duration::hours(1));
        assert_eq!(parse_duration("7d").unwrap(), Duration::days(7));
    }

    #[test]
    fn rejects_malformed_durations() {
        for input in ["", "m", "10", "10w", "-5m", "0s", "1.5h", "ten m"] {
            assert!(
                matches!(parse_duration(input), Err(AppError::BadRequest(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn caps_timeouts_at_28_days() {
        assert!(parse_duration("28d").is_ok());
        assert!(parse_duration("29d").is_err());
    }

    #[test]
    fn empty_reason_uses_default() {
        assert_eq!(reason_or_default("  "), DEFAULT_REASON);
        assert_eq!(reason_or_default("spam"), "spam");
    }

    #[test]
    fn splits_embed_fields() {
        let fields = parse_embed_fields("title: Server Rules description: Be nice to everyone footer: Staff");

        assert_eq!(fields.get("title").map(String::as_str), Some("Server Rules"));
        assert_eq!(
            fields.get("description").map(String::as_str),
            Some("Be nice to everyone")
        );
        assert_eq!(fields.get("footer").map(String::as_str), Some("Staff"));
    }

    #[test]
    fn say_embed_requires_content() {
        assert!(say_embed("footer: only").is_err());
        assert!(say_embed("title: Hello").is_ok());
    }
}
