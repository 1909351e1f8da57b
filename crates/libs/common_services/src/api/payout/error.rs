use crate::api::collaboration::error::CollaborationError;
use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use common_types::TransitionError;
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PayoutError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("only the payee can request a payout")]
    NotPayee,

    #[error("KYC verification must be approved before requesting a payout")]
    KycNotApproved,

    #[error("nothing left to pay out, net amount is {net}")]
    NoBalance { net: Decimal },

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

fn log_error(error: &PayoutError) {
    match error {
        PayoutError::Database(e) => warn!("Database query failed: {}", e),
        PayoutError::Internal(e) => warn!("Internal error: {:?}", e),
        other => warn!("Payout -> {}", other),
    }
}

impl PayoutError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, format!("Not found: {message}")),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
            Self::NoBalance { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Conflict(message) => (StatusCode::CONFLICT, message.clone()),
            Self::NotPayee | Self::KycNotApproved => (StatusCode::FORBIDDEN, self.to_string()),
            Self::Transition(e) if e.is_validation() => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Transition(e) => (StatusCode::CONFLICT, e.to_string()),
        }
    }
}

impl IntoResponse for PayoutError {
    fn into_response(self) -> Response {
        log_error(&self);
        let (status, error_message) = self.status_and_message();
        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

impl From<DbError> for PayoutError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(_) => Self::Conflict("payout already exists".into()),
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

/// Payout flows reuse the collaboration loaders.
impl From<CollaborationError> for PayoutError {
    fn from(err: CollaborationError) -> Self {
        match err {
            CollaborationError::Database(e) => Self::Database(e),
            CollaborationError::Internal(e) => Self::Internal(e),
            CollaborationError::NotFound(id) => Self::NotFound(id),
            CollaborationError::BadRequest(message) => Self::BadRequest(message),
            CollaborationError::Conflict(message) => Self::Conflict(message),
            CollaborationError::Transition(e) => Self::Transition(e),
            CollaborationError::Cancellation(e) => Self::BadRequest(e.to_string()),
        }
    }
}
