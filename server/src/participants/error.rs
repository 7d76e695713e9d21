//! Participant Error Types

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use velvet_common::AccessLevel;

use crate::auth::ErrorResponse;

/// Errors raised by participant visibility operations.
#[derive(Debug, Error)]
pub enum ParticipantError {
    /// Event does not exist.
    #[error("Event not found")]
    EventNotFound,

    /// Participant does not exist, is not part of the event, or is hidden.
    #[error("Participant not found")]
    ParticipantNotFound,

    /// Member does not exist.
    #[error("User not found")]
    UserNotFound,

    /// Viewer's access level is below what the operation requires.
    #[error("Access level {actual} is below required level {required}")]
    AccessDenied {
        required: AccessLevel,
        actual: AccessLevel,
    },

    /// Only the event organizer may perform this operation.
    #[error("Only the event organizer may do this")]
    NotOrganizer,

    /// Invalid request payload.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Stored data could not be interpreted.
    #[error("Corrupt stored value: {0}")]
    CorruptData(#[from] velvet_common::Error),

    /// Database error.
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ParticipantError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::EventNotFound => (StatusCode::NOT_FOUND, "EVENT_NOT_FOUND"),
            Self::ParticipantNotFound => (StatusCode::NOT_FOUND, "PARTICIPANT_NOT_FOUND"),
            Self::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            Self::AccessDenied { .. } => (StatusCode::FORBIDDEN, "ACCESS_DENIED"),
            Self::NotOrganizer => (StatusCode::FORBIDDEN, "NOT_ORGANIZER"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::CorruptData(e) => {
                tracing::error!(error = %e, "Corrupt participant data");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "Participant database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match &self {
            Self::CorruptData(_) | Self::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for ParticipantError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<JsonRejection> for ParticipantError {
    fn from(e: JsonRejection) -> Self {
        Self::Validation(e.body_text())
    }
}

impl From<QueryRejection> for ParticipantError {
    fn from(e: QueryRejection) -> Self {
        Self::Validation(e.body_text())
    }
}

/// Result type for participant operations.
pub type ParticipantResult<T> = Result<T, ParticipantError>;
