use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum KycError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("KYC submission not found: {0}")]
    NotFound(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("a rejection needs a review note")]
    MissingNote,

    #[error("KYC is already approved")]
    AlreadyApproved,

    #[error("submission {0} was already reviewed")]
    AlreadyReviewed(String),
}

impl IntoResponse for KycError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Database(e) => {
                warn!("Database query failed: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "A database error occurred." })),
                )
                    .into_response();
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingField(_) | Self::MissingNote => StatusCode::BAD_REQUEST,
            Self::AlreadyApproved | Self::AlreadyReviewed(_) => StatusCode::CONFLICT,
        };
        warn!("KYC -> {}", self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<DbError> for KycError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(e) | DbError::Sqlx(e) => Self::Database(e),
        }
    }
}
