use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Maps to the `kyc_document_type` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "kyc_document_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum KycDocumentType {
    Aadhaar,
    Pan,
    Passport,
    DrivingLicense,
    Other,
}

/// Maps to the `kyc_status` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "kyc_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KycSubmission {
    pub id: String,
    pub user_id: i32,
    pub full_name: String,
    pub document_type: KycDocumentType,
    pub document_number: String,
    pub document_url: String,
    pub selfie_url: String,
    pub status: KycStatus,
    pub review_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}
