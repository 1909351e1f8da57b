use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::{AuthClaims, CreateUser, Tokens};
use crate::database::app_user::{User, UserRole, UserWithPassword};
use crate::database::user_store::UserStore;
use app_state::constants;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;
use tracing::{info, instrument};

/// Authenticates a user based on email and password.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` if the email or password is incorrect.
#[instrument(skip(pool, password))]
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    let user = UserStore::find_by_email_with_password(pool, email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(password.as_ref(), &user.password)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

fn validate_username(username: &str) -> Result<(), AuthError> {
    let valid = !username.is_empty()
        && username.chars().all(|c| c.is_alphanumeric() || c == ' ')
        && !username.starts_with(' ')
        && !username.ends_with(' ');
    if valid {
        Ok(())
    } else {
        Err(AuthError::InvalidUsername)
    }
}

/// Creates a new user in the database. The first user to register becomes admin.
///
/// # Errors
///
/// * `AuthError::UserAlreadyExists` if a user with the given email already exists.
/// * `AuthError::InvalidUsername` when the username contains illegal characters.
#[instrument(skip(pool, payload), fields(email = %payload.email))]
pub async fn create_user(pool: &PgPool, payload: &CreateUser) -> Result<User, AuthError> {
    validate_username(&payload.name)?;
    let hashed = hash_password(payload.password.as_ref())?;

    let role = if UserStore::any_exists(pool).await? {
        UserRole::User
    } else {
        UserRole::Admin
    };
    info!(
        "Creating user email={}, name={}, role={}",
        payload.email, payload.name, role
    );

    Ok(UserStore::create(
        pool,
        &payload.email,
        &payload.name,
        &hashed,
        role,
        payload.marketplace_role,
    )
    .await?)
}

/// Creates a new access token for a given user ID and role.
///
/// # Errors
///
/// * `jsonwebtoken::Error` if token encoding fails.
pub fn create_access_token(
    jwt_secret: &str,
    user_id: i32,
    role: UserRole,
) -> Result<Tokens, AuthError> {
    let exp =
        (Utc::now() + Duration::minutes(constants().auth.access_token_expiry_minutes)).timestamp();
    let claims = AuthClaims {
        sub: user_id,
        role,
        exp,
    };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?;

    Ok(Tokens {
        expiry: exp as u64,
        access_token,
    })
}

/// Decodes and validates an access token.
///
/// # Errors
///
/// * `AuthError::InvalidToken` when the signature or expiry check fails.
pub fn decode_access_token(token: &str, jwt_secret: &str) -> Result<AuthClaims, AuthError> {
    decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}
