//! Ticket domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::util::parse::parse_stored_id;

/// Answers from the middleman request form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TradeDetails {
    /// Short description of the trade.
    pub trade: String,
    /// What the requester gives.
    pub side1: String,
    /// What the counterparty gives.
    pub side2: String,
}

/// Middleman ticket hosted in its own channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Channel hosting the ticket; also the ticket id.
    pub channel_id: u64,
    /// Requester.
    pub user1: u64,
    /// Counterparty named on the request form, if any.
    pub user2: Option<u64>,
    /// Middleman who claimed the ticket.
    pub claimed_by: Option<u64>,
    pub details: TradeDetails,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Converts an entity model to a ticket domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Converted ticket
    /// - `Err(DbErr::Custom)` - A stored id is not a valid u64
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, DbErr> {
        Ok(Self {
            channel_id: parse_stored_id(&entity.channel_id, "channel_id")?,
            user1: parse_stored_id(&entity.user1, "user1")?,
            user2: entity
                .user2
                .as_deref()
                .map(|id| parse_stored_id(id, "user2"))
                .transpose()?,
            claimed_by: entity
                .claimed_by
                .as_deref()
                .map(|id| parse_stored_id(id, "claimed_by"))
                .transpose()?,
            details: TradeDetails {
                trade: entity.trade,
                side1: entity.side1,
                side2: entity.side2,
            },
            closed_at: entity.closed_at,
            created_at: entity.created_at,
        })
    }

    /// Participants recorded on the ticket, requester first.
    pub fn participants(&self) -> Vec<u64> {
        std::iter::once(self.user1).chain(self.user2).collect()
    }

    /// Whether `user_id` is the requester or the counterparty.
    pub fn is_participant(&self, user_id: u64) -> bool {
        self.user1 == user_id || self.user2 == Some(user_id)
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

/// Parameters for persisting a freshly provisioned ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketParam {
    pub channel_id: u64,
    pub user1: u64,
    pub user2: Option<u64>,
    pub details: TradeDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(user2: Option<&str>) -> entity::ticket::Model {
        entity::ticket::Model {
            channel_id: "10".to_string(),
            user1: "1".to_string(),
            user2: user2.map(str::to_string),
            claimed_by: None,
            trade: "Harvester for Robux".to_string(),
            side1: "Harvester".to_string(),
            side2: "1000 Robux".to_string(),
            closed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn lists_requester_then_counterparty() {
        let ticket = Ticket::from_entity(entity(Some("2"))).unwrap();

        assert_eq!(ticket.participants(), vec![1, 2]);
        assert!(ticket.is_participant(2));
        assert!(!ticket.is_participant(3));
    }

    #[test]
    fn single_participant_without_counterparty() {
        let ticket = Ticket::from_entity(entity(None)).unwrap();

        assert_eq!(ticket.participants(), vec![1]);
    }

    #[test]
    fn rejects_malformed_stored_ids() {
        let result = Ticket::from_entity(entity(Some("not-an-id")));

        assert!(result.is_err());
    }
}
