use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Maps to the `payout_kind` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "payout_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PayoutKind {
    /// Advance paid out by an admin before the collaboration completes.
    Partial,
    /// Settles the remaining balance after fees.
    Final,
}

/// Maps to the `payout_status` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "payout_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: String,
    pub collaboration_id: Option<String>,
    pub payee_id: i32,
    pub kind: PayoutKind,
    pub final_amount: Decimal,
    pub commission: Decimal,
    pub processing_charge: Decimal,
    pub gst: Decimal,
    pub prior_payouts: Decimal,
    pub net_amount: Decimal,
    pub status: PayoutStatus,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}
