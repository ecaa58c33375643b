use serenity::all::{CreateEmbed, CreateEmbedFooter, CreateMessage, Timestamp};

use crate::{config::Config, service::EMBED_COLOR};

/// Greeting posted to the welcome channel when a member joins.
pub fn welcome_message(
    config: &Config,
    member_id: u64,
    member_name: &str,
    avatar_url: &str,
) -> CreateMessage {
    let mut lines = vec![format!(
        "Welcome to **Azan’s Middleman Services** {}!\n",
        member_name
    )];
    if let Some(vouches) = config.vouches_channel_id {
        lines.push(format!("To view vouches: <#{}>", vouches));
    }
    if let Some(proofs) = config.proofs_channel_id {
        lines.push(format!("To view proofs: <#{}>", proofs));
    }
    lines.push("\nWe hope you enjoy your stay here!".to_string());

    CreateMessage::new().embed(
        CreateEmbed::new()
            .color(EMBED_COLOR)
            .description(lines.join("\n"))
            .thumbnail(avatar_url)
            .footer(CreateEmbedFooter::new(format!("User ID: {}", member_id)))
            .timestamp(Timestamp::now()),
    )
}
