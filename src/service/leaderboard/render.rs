//! Leaderboard text and embeds.

use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::model::leaderboard::{BoardKind, LeaderboardEntry};

pub const BOARD_COLOR: u32 = 0x2B2D31;

pub const CLIENT_BOARD_TITLE: &str = "🏆 Top Clients This Month";
pub const MIDDLEMAN_BOARD_TITLE: &str = "> **MIDDLEMAN LEADERBOARD**";
pub const QUOTA_BOARD_TITLE: &str = "**WEEKLY MIDDLEMEN QUOTA**";

pub const CLIENT_PLACEHOLDER: &str = "No data yet.";
pub const MIDDLEMAN_PLACEHOLDER: &str = "*No middleman data yet.*";

/// Text searched for in embed titles when the board message id is unknown.
pub fn title_marker(kind: BoardKind) -> &'static str {
    match kind {
        BoardKind::Clients => "Top Clients This Month",
        BoardKind::Middlemen => "MIDDLEMAN LEADERBOARD",
        BoardKind::Quota => "WEEKLY MIDDLEMEN QUOTA",
    }
}

/// `"s"` unless the count is exactly one.
pub fn plural_suffix(count: i32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Ranks entries from `#1`, one line each.
///
/// # Arguments
/// - `entries` - Rows in display order
/// - `unit` - Singular noun for the counted thing
/// - `placeholder` - Text used when there are no rows
pub fn render_ranked(entries: &[LeaderboardEntry], unit: &str, placeholder: &str) -> String {
    if entries.is_empty() {
        return placeholder.to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "**#{}** <@{}> — **{}** {}{}",
                i + 1,
                entry.user_id,
                entry.count,
                unit,
                plural_suffix(entry.count)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_clients(entries: &[LeaderboardEntry]) -> String {
    render_ranked(entries, "point", CLIENT_PLACEHOLDER)
}

pub fn render_middlemen(entries: &[LeaderboardEntry]) -> String {
    render_ranked(entries, "ticket", MIDDLEMAN_PLACEHOLDER)
}

pub fn client_board_embed(entries: &[LeaderboardEntry]) -> CreateEmbed {
    CreateEmbed::new()
        .title(CLIENT_BOARD_TITLE)
        .description(render_clients(entries))
        .color(BOARD_COLOR)
        .footer(CreateEmbedFooter::new("Client Leaderboard"))
        .timestamp(Timestamp::now())
}

pub fn middleman_board_embed(entries: &[LeaderboardEntry]) -> CreateEmbed {
    CreateEmbed::new()
        .title(MIDDLEMAN_BOARD_TITLE)
        .description(format!(
            "__**Top Middlemen:**__\n{}",
            render_middlemen(entries)
        ))
        .color(BOARD_COLOR)
        .footer(CreateEmbedFooter::new(
            "Middleman leaderboard — auto updates on ticket close",
        ))
        .timestamp(Timestamp::now())
}
