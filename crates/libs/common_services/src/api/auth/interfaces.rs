use crate::database::app_user::UserRole;
use common_types::ActorRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Represents the data required to create a new user.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
    pub marketplace_role: ActorRole,
}

/// Represents the data required for user login.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub email: String,
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
}

/// A bearer access token and its expiry as a unix timestamp.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub expiry: u64,
    pub access_token: String,
}

/// Represents the claims contained within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthClaims {
    pub sub: i32, // Subject (user ID)
    pub exp: i64, // Expiration time
    pub role: UserRole,
}
