use thiserror::Error;

/// Refused ticket lifecycle transitions.
///
/// Display strings are shown to users verbatim.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TicketError {
    /// Requester can already see a channel in the ticket category.
    #[error("You already have an open ticket: <#{channel_id}>")]
    DuplicateOpenTicket { channel_id: u64 },

    /// Ticket already has an assignee.
    #[error("This ticket has already been claimed by <@{assignee_id}>.")]
    AlreadyClaimed { assignee_id: u64 },

    /// No ticket record exists for the channel.
    #[error("Could not find ticket data.")]
    TicketNotFound,

    /// The ticket record names no participants.
    #[error("No users to log points for.")]
    NoParticipants,

    /// Command used outside the ticket category.
    #[error("This can only be used inside ticket channels.")]
    NotTicketChannel,

    /// Ticket has not been claimed yet.
    #[error("This ticket has not been claimed yet.")]
    NotClaimed,
}
