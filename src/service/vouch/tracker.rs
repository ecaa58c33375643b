//! In-memory vouch bookkeeping per ticket.
//!
//! Nothing here is persisted: a restart forgets who vouched and turns every
//! outstanding confirmation prompt into an expired one.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

/// How long a confirmation prompt's buttons are honoured.
pub const PROMPT_TTL_SECONDS: i64 = 300;

/// Result of recording a vouch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VouchProgress {
    /// Recorded; other traders have not vouched yet.
    Recorded,
    /// This vouch completed the set; prompt the assignee.
    AllVouched,
    /// The trader had already vouched, or the set was already complete.
    AlreadyVouched,
}

#[derive(Debug, Clone, Copy)]
struct Prompt {
    message_id: u64,
    expires_at: DateTime<Utc>,
    confirmed: bool,
}

#[derive(Debug, Default)]
struct TicketVouches {
    vouched: HashSet<u64>,
    complete: bool,
    prompt: Option<Prompt>,
}

/// Shared handle to the vouch state of every open ticket.
#[derive(Clone, Default)]
pub struct VouchTracker {
    tickets: Arc<RwLock<HashMap<u64, TicketVouches>>>,
}

impl VouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `user_id` as having vouched in ticket `channel_id`.
    ///
    /// # Arguments
    /// - `channel_id` - Ticket channel
    /// - `user_id` - Trader who vouched
    /// - `expected` - Every trader on the ticket
    ///
    /// # Returns
    /// `AllVouched` exactly once per ticket, on the vouch that covers every
    /// expected trader.
    pub async fn record(&self, channel_id: u64, user_id: u64, expected: &[u64]) -> VouchProgress {
        let mut tickets = self.tickets.write().await;
        let entry = tickets.entry(channel_id).or_default();

        if entry.complete || !entry.vouched.insert(user_id) {
            return VouchProgress::AlreadyVouched;
        }

        if expected.iter().all(|id| entry.vouched.contains(id)) {
            entry.complete = true;
            VouchProgress::AllVouched
        } else {
            VouchProgress::Recorded
        }
    }

    /// Remembers the prompt posted for a ticket.
    pub async fn register_prompt(&self, channel_id: u64, message_id: u64, now: DateTime<Utc>) {
        let mut tickets = self.tickets.write().await;
        tickets.entry(channel_id).or_default().prompt = Some(Prompt {
            message_id,
            expires_at: now + Duration::seconds(PROMPT_TTL_SECONDS),
            confirmed: false,
        });
    }

    /// Whether the prompt `message_id` in `channel_id` still accepts presses.
    pub async fn prompt_is_live(&self, channel_id: u64, message_id: u64, now: DateTime<Utc>) -> bool {
        let tickets = self.tickets.read().await;

        tickets
            .get(&channel_id)
            .and_then(|ticket| ticket.prompt)
            .is_some_and(|prompt| {
                prompt.message_id == message_id && !prompt.confirmed && now < prompt.expires_at
            })
    }

    /// Consumes a live prompt so it can only be accepted once.
    ///
    /// # Returns
    /// - `true` - The caller won the prompt
    /// - `false` - Expired, unknown or already confirmed
    pub async fn confirm_prompt(&self, channel_id: u64, message_id: u64, now: DateTime<Utc>) -> bool {
        let mut tickets = self.tickets.write().await;

        match tickets
            .get_mut(&channel_id)
            .and_then(|ticket| ticket.prompt.as_mut())
        {
            Some(prompt)
                if prompt.message_id == message_id
                    && !prompt.confirmed
                    && now < prompt.expires_at =>
            {
                prompt.confirmed = true;
                true
            }
            _ => false,
        }
    }

    /// Drops the prompt but keeps the recorded vouches.
    pub async fn discard_prompt(&self, channel_id: u64) {
        if let Some(ticket) = self.tickets.write().await.get_mut(&channel_id) {
            ticket.prompt = None;
        }
    }

    /// Forgets everything about a ticket.
    pub async fn clear(&self, channel_id: u64) {
        self.tickets.write().await.remove(&channel_id);
    }
}
