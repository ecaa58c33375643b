//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::GuildChannel;

/// Raw `VIEW_CHANNEL | SEND_MESSAGES` permission bits.
const VIEW_AND_SEND: u64 = (1 << 10) | (1 << 11);

/// Creates a text channel with one member overwrite per viewer.
///
/// Every id in `viewers` receives a member overwrite allowing
/// `VIEW_CHANNEL` and `SEND_MESSAGES`; every id in `hidden` receives a member
/// overwrite denying both.
///
/// # Arguments
/// - `channel_id` - Discord channel ID
/// - `guild_id` - Discord guild ID
/// - `parent_id` - Optional category the channel sits in
/// - `viewers` - Members allowed to view the channel
/// - `hidden` - Members explicitly denied the channel
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel
pub fn create_test_text_channel(
    channel_id: u64,
    guild_id: u64,
    parent_id: Option<u64>,
    viewers: &[u64],
    hidden: &[u64],
) -> GuildChannel {
    let allow = viewers.iter().map(|id| {
        serde_json::json!({
            "id": id.to_string(),
            "type": 1,
            "allow": VIEW_AND_SEND.to_string(),
            "deny": "0",
        })
    });
    let deny = hidden.iter().map(|id| {
        serde_json::json!({
            "id": id.to_string(),
            "type": 1,
            "allow": "0",
            "deny": VIEW_AND_SEND.to_string(),
        })
    });
    let overwrites: Vec<serde_json::Value> = allow.chain(deny).collect();

    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "parent_id": parent_id.map(|id| id.to_string()),
        "type": 0,
        "name": format!("ticket-{}", channel_id),
        "position": 0,
        "nsfw": false,
        "flags": 0,
        "permission_overwrites": overwrites,
        "available_tags": [],
        "applied_tags": [],
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}
