//! Reading values out of Discord payloads.

use std::collections::HashMap;

use serenity::all::{ActionRow, ActionRowComponent};

use crate::{
    error::AppError,
    model::ticket::TradeDetails,
    service::ticket::{
        message::{INPUT_COUNTERPARTY, INPUT_SIDE1, INPUT_SIDE2, INPUT_TRADE},
        TicketRequest,
    },
    util::parse::parse_mention,
};

/// Text inputs of a submitted modal, keyed by custom id.
pub fn modal_values(rows: &[ActionRow]) -> HashMap<String, String> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => Some((
                input.custom_id.clone(),
                input.value.clone().unwrap_or_default().trim().to_string(),
            )),
            _ => None,
        })
        .collect()
}

/// Turns the middleman request form into a ticket request.
///
/// # Returns
/// - `Ok(TicketRequest)` - Form complete; a blank counterparty means none
/// - `Err(AppError::BadRequest)` - A required answer is missing or the
///   counterparty is not a user id or mention
pub fn ticket_request(
    values: &HashMap<String, String>,
    requester_id: u64,
    requester_name: &str,
) -> Result<TicketRequest, AppError> {
    let required = |key: &str| {
        values
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or_else(|| AppError::BadRequest("Please answer every question on the form.".to_string()))
    };

    let counterparty_id = match values.get(INPUT_COUNTERPARTY).map(String::as_str) {
        None | Some("") => None,
        Some(raw) => Some(parse_mention(raw).ok_or_else(|| {
            AppError::BadRequest(format!("`{}` is not a valid Discord user ID.", raw))
        })?),
    };

    Ok(TicketRequest {
        requester_id,
        requester_name: requester_name.to_string(),
        counterparty_id,
        details: TradeDetails {
            trade: required(INPUT_TRADE)?,
            side1: required(INPUT_SIDE1)?,
            side2: required(INPUT_SIDE2)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(counterparty: &str) -> HashMap<String, String> {
        HashMap::from([
            (INPUT_TRADE.to_string(), "Harvester for Robux".to_string()),
            (INPUT_SIDE1.to_string(), "Harvester".to_string()),
            (INPUT_SIDE2.to_string(), "1000 Robux".to_string()),
            (INPUT_COUNTERPARTY.to_string(), counterparty.to_string()),
        ])
    }

    #[test]
    fn blank_counterparty_is_none() {
        let request = ticket_request(&form(""), 1, "alice").unwrap();

        assert_eq!(request.counterparty_id, None);
        assert_eq!(request.details.side2, "1000 Robux");
    }

    #[test]
    fn counterparty_accepts_mentions_and_ids() {
        assert_eq!(
            ticket_request(&form("<@42>"), 1, "alice").unwrap().counterparty_id,
            Some(42)
        );
        assert_eq!(
            ticket_request(&form("42"), 1, "alice").unwrap().counterparty_id,
            Some(42)
        );
    }

    #[test]
    fn garbage_counterparty_is_rejected() {
        let err = ticket_request(&form("bob#1234"), 1, "alice").unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn missing_answer_is_rejected() {
        let mut values = form("");
        values.remove(INPUT_SIDE1);

        assert!(ticket_request(&values, 1, "alice").is_err());
    }
}
