//! Messages posted by the ticket flow.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateInputText,
    CreateMessage, CreateModal, InputTextStyle,
};

use crate::{
    config::Config,
    model::{component::ComponentAction, crypto::Currency, ticket::Ticket},
    service::{leaderboard::render::BOARD_COLOR, EMBED_COLOR},
};

/// Modal input ids.
pub const INPUT_TRADE: &str = "trade";
pub const INPUT_SIDE1: &str = "side1";
pub const INPUT_SIDE2: &str = "side2";
pub const INPUT_COUNTERPARTY: &str = "counterparty";

fn button(action: ComponentAction, label: &str, style: ButtonStyle) -> CreateButton {
    CreateButton::new(action.custom_id())
        .label(label)
        .style(style)
}

/// Panel with the *Request Middleman* button, posted by `setup`.
pub fn ticket_panel(config: &Config) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("Azan’s Middleman Service")
        .description(format!(
            "To request a middleman from this server\n\
             click the `Request Middleman` button below.\n\n\
             **How does a Middleman Work?**\n\
             Example: Trade is Harvester (MM2) for Robux.\n\
             1. Seller gives Harvester to middleman.\n\
             2. Buyer pays seller robux (after middleman confirms receiving mm2).\n\
             3. Middleman gives buyer Harvester (after seller received robux).\n\n\
             **Important**\n\
             • Troll tickets are not allowed. Once the trade is completed you must vouch your middleman in their respective servers.\n\
             • If you have trouble getting a user's ID click [here](https://youtube.com/shorts/pMG8CuIADDs?feature=shared).\n\
             • Make sure to read <#{}> before making a ticket.",
            config.ticket_category_id
        ))
        .color(EMBED_COLOR);

    CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![button(
            ComponentAction::RequestMiddleman,
            "Request Middleman",
            ButtonStyle::Primary,
        )])])
}

/// Middleman request form.
pub fn request_modal() -> CreateModal {
    CreateModal::new(ComponentAction::SubmitRequest.custom_id(), "Middleman Request").components(
        vec![
            CreateActionRow::InputText(
                CreateInputText::new(InputTextStyle::Short, "What's the trade?", INPUT_TRADE)
                    .required(true)
                    .max_length(200),
            ),
            CreateActionRow::InputText(
                CreateInputText::new(InputTextStyle::Paragraph, "What's your side?", INPUT_SIDE1)
                    .required(true)
                    .max_length(500),
            ),
            CreateActionRow::InputText(
                CreateInputText::new(
                    InputTextStyle::Paragraph,
                    "What's their side?",
                    INPUT_SIDE2,
                )
                .required(true)
                .max_length(500),
            ),
            CreateActionRow::InputText(
                CreateInputText::new(
                    InputTextStyle::Short,
                    "Their Discord ID?",
                    INPUT_COUNTERPARTY,
                )
                .required(false)
                .max_length(20),
            ),
        ],
    )
}

/// First message of a ticket: pings staff and lays out the trade.
///
/// # Arguments
/// - `ticket` - Freshly stored ticket
/// - `config` - Owner and middleman role to ping
/// - `requester_count` - Requester's completed tickets
/// - `counterparty_count` - Counterparty's completed tickets, if one was named
pub fn trade_intro(
    ticket: &Ticket,
    config: &Config,
    requester_count: i32,
    counterparty_count: Option<i32>,
) -> CreateMessage {
    let counterparty = match (ticket.user2, counterparty_count) {
        (Some(user_id), Some(count)) => format!("<@{}> [{}]", user_id, count),
        _ => "Unknown User [0]".to_string(),
    };

    let embed = CreateEmbed::new()
        .title("• TRADE •")
        .description(&ticket.details.trade)
        .field(
            "Trader 1",
            format!(
                "<@{}> [{}]\n**Side:** {}",
                ticket.user1, requester_count, ticket.details.side1
            ),
            true,
        )
        .field(
            "Trader 2",
            format!("{}\n**Side:** {}", counterparty, ticket.details.side2),
            true,
        )
        .color(EMBED_COLOR)
        .footer(CreateEmbedFooter::new("Please wait for Middleman assistance"));

    CreateMessage::new()
        .content(format!(
            "<@{}> <@&{}>",
            config.owner_id, config.middleman_role_id
        ))
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![
            button(ComponentAction::Claim, "Claim", ButtonStyle::Success),
            button(
                ComponentAction::DeleteTicket,
                "Delete Ticket",
                ButtonStyle::Danger,
            ),
        ])])
}

/// Announces the assignee, with buttons revealing their payout addresses.
pub fn claim_announcement(assignee_id: u64) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("✅ Ticket Claimed")
        .description(format!(
            "<@{}> will be your middleman for this trade.",
            assignee_id
        ))
        .color(EMBED_COLOR);

    CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![
            button(
                ComponentAction::ShowAddress {
                    currency: Currency::Ltc,
                    middleman_id: assignee_id,
                },
                "LTC Address",
                ButtonStyle::Primary,
            ),
            button(
                ComponentAction::ShowAddress {
                    currency: Currency::Eth,
                    middleman_id: assignee_id,
                },
                "ETH Address",
                ButtonStyle::Primary,
            ),
        ])])
}

/// Panel posted when a ticket is closed.
pub fn close_panel(channel_name: &str, owner_id: u64, closed_by: &str) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("🔒 Ticket Closed")
        .description("Select an option below to generate the transcript or delete the ticket.")
        .field("Ticket Name", channel_name, true)
        .field("Owner", format!("<@{}>", owner_id), true)
        .color(BOARD_COLOR)
        .footer(CreateEmbedFooter::new(format!("Closed by {}", closed_by)));

    CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![
            button(
                ComponentAction::Transcript,
                "TRANSCRIPT",
                ButtonStyle::Secondary,
            ),
            button(ComponentAction::CloseDelete, "DELETE", ButtonStyle::Danger),
            button(ComponentAction::LogPoints, "LOG POINTS", ButtonStyle::Success),
        ])])
}

/// Questionnaire asking both traders for their trade details.
pub fn trade_format(user1: u64, user2: u64) -> CreateMessage {
    let questions = "1. What is your roblox username/ingame username?\n\
                     2. What is your side of the trade?\n\
                     3. Can you join private servers? (13+)\n\
                     4. Do you agree to vouch after the trade is done?";

    let embed = CreateEmbed::new()
        .title("📒 Fill Out Trade Details")
        .description(
            "To proceed, please **answer the questions below** and fill in all the details for the trade.\n\n\
             👉 You may ping the middleman when both traders are done filling in the details.",
        )
        .field("Questions", format!("```{}```", questions), false)
        .color(EMBED_COLOR)
        .footer(CreateEmbedFooter::new(
            "Fill this out accurately. The middleman will confirm before proceeding.",
        ));

    CreateMessage::new()
        .content(format!(
            "<@{}> and <@{}>, please fill out the trade details below:",
            user1, user2
        ))
        .embed(embed)
}
