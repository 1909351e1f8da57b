use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization token")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid username")]
    InvalidUsername,

    #[error("user {user_email} may not access {path}")]
    PermissionDenied { user_email: String, path: String },

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_auth_failure(error: &AuthError) {
    match error {
        AuthError::MissingToken => warn!("Authentication failed: Missing Authorization token."),
        AuthError::InvalidToken => warn!("Authentication failed: Invalid token provided."),
        AuthError::InvalidCredentials => {
            info!("Authentication failed: Invalid credentials provided.");
        }
        AuthError::UserAlreadyExists => info!("Registration failed: User already exists."),
        AuthError::UserNotFound => warn!("Authentication failed: User from token not found."),
        AuthError::InvalidUsername => info!("Registration failed: Invalid username."),
        AuthError::PermissionDenied { user_email, path } => {
            warn!(
                "Authorization failed: User {} tried to access admin endpoint: {}",
                user_email, path
            );
        }
        AuthError::Internal(e) => {
            error!("Internal server error during authentication: {:?}", e);
        }
    }
}

impl AuthError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::MissingToken | Self::InvalidToken | Self::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "Authentication failed")
            }
            Self::UserAlreadyExists => (
                StatusCode::CONFLICT,
                "A user with this email already exists",
            ),
            Self::InvalidUsername => (
                StatusCode::BAD_REQUEST,
                "Names may only contain letters, digits and inner spaces",
            ),
            Self::PermissionDenied { .. } => (StatusCode::FORBIDDEN, "Permission denied"),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred",
            ),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        log_auth_failure(&self);
        let (status, error_message) = self.status_and_message();
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(_) => Self::UserAlreadyExists,
            DbError::Sqlx(e) => Self::Internal(eyre::Report::new(e)),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        DbError::from(err).into()
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_expected_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_and_message().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::UserAlreadyExists.status_and_message().0,
            StatusCode::CONFLICT
        );
        let denied = AuthError::PermissionDenied {
            user_email: "a@b.c".into(),
            path: "/admin/kyc".into(),
        };
        assert_eq!(denied.status_and_message().0, StatusCode::FORBIDDEN);
    }

    #[test]
    fn response_has_error_body() {
        let response = AuthError::MissingToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
