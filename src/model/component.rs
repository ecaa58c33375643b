//! Custom ids carried by buttons and modals.
//!
//! Every component the bot posts is persistent: the action is recovered from
//! the custom id alone, so buttons keep working across restarts.

use crate::model::crypto::Currency;

/// Game a `servers` panel was posted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    Gag,
    Mm2,
    Sab,
}

impl Game {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Gag => "gag",
            Self::Mm2 => "mm2",
            Self::Sab => "sab",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "gag" => Some(Self::Gag),
            "mm2" => Some(Self::Mm2),
            "sab" => Some(Self::Sab),
            _ => None,
        }
    }
}

/// Action behind a button press or modal submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    /// Ticket panel button; opens the request modal.
    RequestMiddleman,
    /// Request modal submission.
    SubmitRequest,
    /// Claim button on the trade intro.
    Claim,
    /// Delete button on the trade intro.
    DeleteTicket,
    /// Close panel buttons.
    Transcript,
    CloseDelete,
    LogPoints,
    /// Vouch confirmation prompt.
    VouchConfirm,
    VouchCancel,
    /// Reveal a middleman's saved address.
    ShowAddress { currency: Currency, middleman_id: u64 },
    /// Pick a server from a `servers` panel.
    ChooseServer { game: Game, private: bool },
}

impl ComponentAction {
    pub fn custom_id(&self) -> String {
        match self {
            Self::RequestMiddleman => "open_ticket".to_string(),
            Self::SubmitRequest => "ticket_modal".to_string(),
            Self::Claim => "claim_ticket".to_string(),
            Self::DeleteTicket => "delete_ticket".to_string(),
            Self::Transcript => "ticket_transcript".to_string(),
            Self::CloseDelete => "ticket_delete".to_string(),
            Self::LogPoints => "ticket_log_points".to_string(),
            Self::VouchConfirm => "vouch_confirm".to_string(),
            Self::VouchCancel => "vouch_cancel".to_string(),
            Self::ShowAddress {
                currency,
                middleman_id,
            } => format!(
                "show_{}:{}",
                currency.as_str().to_ascii_lowercase(),
                middleman_id
            ),
            Self::ChooseServer { game, private } => format!(
                "{}_{}",
                if *private { "private" } else { "public" },
                game.key()
            ),
        }
    }

    /// Recovers the action from a custom id; unknown ids yield `None`.
    pub fn parse(custom_id: &str) -> Option<Self> {
        let action = match custom_id {
            "open_ticket" => Self::RequestMiddleman,
            "ticket_modal" => Self::SubmitRequest,
            "claim_ticket" => Self::Claim,
            "delete_ticket" => Self::DeleteTicket,
            "ticket_transcript" => Self::Transcript,
            "ticket_delete" => Self::CloseDelete,
            "ticket_log_points" => Self::LogPoints,
            "vouch_confirm" => Self::VouchConfirm,
            "vouch_cancel" => Self::VouchCancel,
            other => return Self::parse_parameterised(other),
        };

        Some(action)
    }

    fn parse_parameterised(custom_id: &str) -> Option<Self> {
        if let Some(rest) = custom_id.strip_prefix("show_") {
            let (currency, middleman_id) = rest.split_once(':')?;
            return Some(Self::ShowAddress {
                currency: Currency::from_str_opt(currency)?,
                middleman_id: middleman_id.parse().ok()?,
            });
        }

        let (kind, game) = custom_id.split_once('_')?;
        let private = match kind {
            "public" => false,
            "private" => true,
            _ => return None,
        };

        Some(Self::ChooseServer {
            game: Game::from_key(game)?,
            private,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_ids() {
        assert_eq!(
            ComponentAction::parse("ticket_log_points"),
            Some(ComponentAction::LogPoints)
        );
        assert_eq!(
            ComponentAction::parse("vouch_cancel"),
            Some(ComponentAction::VouchCancel)
        );
    }

    #[test]
    fn address_button_carries_middleman() {
        let action = ComponentAction::ShowAddress {
            currency: Currency::Eth,
            middleman_id: 42,
        };

        assert_eq!(action.custom_id(), "show_eth:42");
        assert_eq!(ComponentAction::parse("show_eth:42"), Some(action));
    }

    #[test]
    fn parses_server_choice() {
        assert_eq!(
            ComponentAction::parse("private_mm2"),
            Some(ComponentAction::ChooseServer {
                game: Game::Mm2,
                private: true
            })
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        assert_eq!(ComponentAction::parse("public_unknown"), None);
        assert_eq!(ComponentAction::parse("show_btc:1"), None);
        assert_eq!(ComponentAction::parse("something"), None);
    }
}
