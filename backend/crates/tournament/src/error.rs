//! Tournament Error Types
//!
//! Tournament-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::serde_ext::InvalidInteger;
use thiserror::Error;

/// Tournament-specific result type alias
pub type TournamentResult<T> = Result<T, TournamentError>;

#[derive(Debug, Error)]
pub enum TournamentError {
    /// A required field is absent, null or blank
    #[error("Missing required fields")]
    MissingFields,

    /// A field is present but unacceptable (length, type)
    #[error("{0}")]
    InvalidField(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error(transparent)]
    InvalidInteger(#[from] InvalidInteger),

    #[error("Winner ID must match one of the entrants")]
    WinnerNotAnEntrant,

    /// `check_distinct_entrants` violated
    #[error("Entrants must be different")]
    SameEntrant,

    /// A match may only refer to entrants of its own event
    #[error("Entrants must belong to the match's event")]
    EntrantOutsideEvent,

    #[error("Event not found")]
    EventNotFound,

    #[error("Entrant not found")]
    EntrantNotFound,

    #[error("Match not found")]
    MatchNotFound,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::MissingFields
            | TournamentError::InvalidField(_)
            | TournamentError::InvalidStatus(_)
            | TournamentError::InvalidInteger(_)
            | TournamentError::WinnerNotAnEntrant
            | TournamentError::SameEntrant
            | TournamentError::EntrantOutsideEvent
            | TournamentError::BadRequest(_) => ErrorKind::BadRequest,
            TournamentError::EventNotFound
            | TournamentError::EntrantNotFound
            | TournamentError::MatchNotFound => ErrorKind::NotFound,
            TournamentError::Database(_) | TournamentError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError; server-side detail stays in the log
    pub fn to_app_error(&self) -> AppError {
        match self {
            TournamentError::InvalidStatus(_) => AppError::bad_request(self.to_string())
                .with_action("Use one of: drafting, published, cancelled, completed"),
            TournamentError::EventNotFound
            | TournamentError::EntrantNotFound
            | TournamentError::MatchNotFound => AppError::not_found(self.to_string()),
            _ if self.kind().is_server_error() => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            TournamentError::Database(e) => {
                tracing::error!(error = %e, "Tournament database error");
            }
            TournamentError::Internal(msg) => {
                tracing::error!(message = %msg, "Tournament internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Tournament request rejected");
            }
        }
    }
}

impl IntoResponse for TournamentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<TournamentError> for AppError {
    fn from(err: TournamentError) -> Self {
        err.to_app_error()
    }
}

impl From<JsonRejection> for TournamentError {
    fn from(rejection: JsonRejection) -> Self {
        TournamentError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for TournamentError {
    fn from(rejection: PathRejection) -> Self {
        TournamentError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for TournamentError {
    fn from(rejection: QueryRejection) -> Self {
        TournamentError::BadRequest(rejection.body_text())
    }
}
