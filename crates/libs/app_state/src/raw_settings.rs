use common_types::FeeSettings;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub uploads: RawUploadSettings,
    pub marketplace: MarketplaceSettings,
    pub constants: RawConstants,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    pub public_url: String,
    pub rate_limiting: RateLimitingSettings,
}

/// Limits applied to the unauthenticated auth endpoints.
#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitingSettings {
    pub req_per_second: u64,
    pub burst_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
    pub database_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawUploadSettings {
    /// Folder uploaded documents and deliverables are written to.
    pub folder: PathBuf,
    pub max_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

/// Money rules of the marketplace.
#[derive(Debug, Deserialize, Clone)]
pub struct MarketplaceSettings {
    pub fees: FeeSettings,
    /// Charged when a participant cancels. Zero disables the penalty notice.
    pub cancellation_penalty: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConstants {
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
}

/// Database connection and related configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    pub max_connections: u32,
    pub min_connection: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
    /// Length of generated `id` for collaborations, payouts and kyc submissions.
    pub record_id_length: usize,
    /// Length of the random part of a collab code, e.g. `ADS-4FQ2`.
    pub collab_code_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConstants {
    pub access_token_expiry_minutes: i64,
}
