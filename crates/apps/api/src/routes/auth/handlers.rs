//! This module defines the HTTP handlers for authentication-related routes.

use crate::api_state::ApiContext;
use axum::http::StatusCode;
use axum::{Extension, Json, extract::State};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::{CreateUser, LoginUser, Tokens};
use common_services::api::auth::service::{authenticate_user, create_access_token, create_user};
use common_services::database::app_user::User;
use tracing::instrument;

/// Handles user login and returns a bearer access token.
///
/// # Errors
///
/// Returns `AuthError` if the user credentials are invalid or the token
/// cannot be created.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = Tokens),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn login(
    State(context): State<ApiContext>,
    Json(payload): Json<LoginUser>,
) -> Result<Json<Tokens>, AuthError> {
    let user = authenticate_user(&context.pool, &payload.email, &payload.password).await?;
    let tokens = create_access_token(&context.settings.secrets.jwt, user.id, user.role)?;
    Ok(Json(tokens))
}

/// Registers a new user. The first account becomes the platform admin.
///
/// # Errors
///
/// Returns `AuthError` if a user with the provided email already exists or
/// if a database error occurs during user creation.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Invalid name"),
        (status = 409, description = "User with this email already exists"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn register(
    State(context): State<ApiContext>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), AuthError> {
    let user = create_user(&context.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get current user info.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user data", body = User),
        (status = 401, description = "Authentication required"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
