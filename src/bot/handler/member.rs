use serenity::all::{ChannelId, Context, Member};

use crate::{bot::handler::Handler, service::welcome::welcome_message};

/// Posts the welcome embed when a member joins.
pub async fn handle_guild_member_addition(handler: &Handler, ctx: Context, new_member: Member) {
    let Some(channel_id) = handler.config.welcome_channel_id else {
        return;
    };
    if new_member.user.bot {
        return;
    }

    let message = welcome_message(
        &handler.config,
        new_member.user.id.get(),
        new_member.display_name(),
        &new_member.face(),
    );

    if let Err(e) = ChannelId::new(channel_id)
        .send_message(&ctx.http, message)
        .await
    {
        tracing::error!(
            "Failed to welcome {} in {}: {}",
            new_member.user.id,
            channel_id,
            e
        );
    }
}
