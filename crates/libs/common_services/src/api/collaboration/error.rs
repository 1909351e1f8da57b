use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use common_types::{CancellationError, TransitionError};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum CollaborationError {
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

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Cancellation(#[from] CancellationError),
}

fn log_error(error: &CollaborationError) {
    match error {
        CollaborationError::Database(e) => warn!("Database query failed: {}", e),
        CollaborationError::Internal(e) => warn!("Internal error: {:?}", e),
        CollaborationError::NotFound(id) => warn!("Collaboration -> Not found: {}", id),
        CollaborationError::BadRequest(message) => {
            warn!("Collaboration -> Bad Request: {}", message);
        }
        CollaborationError::Conflict(message) => warn!("Collaboration -> Conflict: {}", message),
        CollaborationError::Transition(e) => warn!("Collaboration -> Transition refused: {}", e),
        CollaborationError::Cancellation(e) => {
            warn!("Collaboration -> Cancellation refused: {}", e);
        }
    }
}

impl CollaborationError {
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
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                format!("Collaboration not found: {message}"),
            ),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
            Self::Conflict(message) => (StatusCode::CONFLICT, message.clone()),
            Self::Transition(e) if e.is_validation() => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Transition(e) => (StatusCode::CONFLICT, e.to_string()),
            Self::Cancellation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
        }
    }
}

impl IntoResponse for CollaborationError {
    fn into_response(self) -> Response {
        log_error(&self);
        let (status, error_message) = self.status_and_message();
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for CollaborationError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(_) => Self::Conflict("record already exists".into()),
            DbError::Sqlx(sqlx::Error::RowNotFound) => Self::NotFound("row not found".into()),
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_types::{Action, ActorRole, CollaborationStatus};
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case(CollaborationError::NotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case(CollaborationError::Conflict("stale".into()), StatusCode::CONFLICT)]
    #[case(TransitionError::EmptyReason.into(), StatusCode::BAD_REQUEST)]
    #[case(TransitionError::InvalidAmount.into(), StatusCode::BAD_REQUEST)]
    #[case(
        TransitionError::NotPermitted {
            action: Action::Accept,
            role: ActorRole::Brand,
            status: CollaborationStatus::Completed,
        }.into(),
        StatusCode::CONFLICT
    )]
    #[case(
        CancellationError::PenaltyNotAcknowledged { penalty: Decimal::from(500) }.into(),
        StatusCode::BAD_REQUEST
    )]
    fn maps_to_status(#[case] error: CollaborationError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[test]
    fn missing_row_is_not_found() {
        let error = CollaborationError::from(DbError::Sqlx(sqlx::Error::RowNotFound));
        assert!(matches!(error, CollaborationError::NotFound(_)));
    }
}
