//! Error types and response handling.
//!
//! `AppError` is the top-level error type. Bot handlers turn it into a short
//! message for the user with `user_message()` and log the full error; the
//! transcript server turns it into an HTTP response through `IntoResponse`.

pub mod config;
pub mod internal;
pub mod ticket;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, ticket::TicketError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Fatal at startup; never produced once the bot is running.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Ticket state transition refused.
    #[error(transparent)]
    Ticket(#[from] TicketError),

    /// Unexpected internal condition such as a malformed stored id.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem error while reading or writing transcripts.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Transcript template rendering error.
    #[error(transparent)]
    TemplateErr(#[from] askama::Error),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what was not found, safe to show to users
    #[error("{0}")]
    NotFound(String),

    /// Caller lacks the role, permission or assignment required.
    ///
    /// # Fields
    /// - Message describing the missing permission, safe to show to users
    #[error("{0}")]
    PermissionDenied(String),

    /// Malformed command input.
    ///
    /// # Fields
    /// - Message describing what was wrong, safe to show to users
    #[error("{0}")]
    BadRequest(String),

    /// An external service answered but not with what was needed.
    ///
    /// # Fields
    /// - Detailed error message for logging
    #[error("{0}")]
    ExternalService(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message shown to a Discord user when a command fails.
    ///
    /// Domain errors carry their own wording. Infrastructure errors collapse
    /// into a generic message; the detail only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Ticket(err) => format!("❌ {}", err),
            Self::NotFound(msg) | Self::PermissionDenied(msg) | Self::BadRequest(msg) => {
                format!("❌ {}", msg)
            }
            Self::ReqwestErr(_) | Self::ExternalService(_) => {
                "❌ An external service failed to respond. Please try again later.".to_string()
            }
            Self::DiscordErr(_) => "❌ Discord rejected the request.".to_string(),
            _ => "❌ Something went wrong. Please try again later.".to_string(),
        }
    }
}

/// Converts application errors into HTTP responses for the transcript server.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`
/// - 403 Forbidden - For `PermissionDenied`
/// - 404 Not Found - For `NotFound`
/// - 500 Internal Server Error - For everything else
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::PermissionDenied(msg) => (StatusCode::FORBIDDEN, msg).into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the error and returns a generic body.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
            .into_response()
    }
}
