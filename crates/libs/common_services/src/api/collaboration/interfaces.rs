use chrono::{DateTime, Utc};
use common_types::{Action, ActorRole, Collaboration, CollaborationKind, StatusBucket};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// --- Request Payloads ---

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollaborationRequest {
    pub kind: CollaborationKind,
    /// The brand when a partner creates the record, the partner otherwise.
    pub counterparty_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Opening offer.
    pub amount: Option<Decimal>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollaborationRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// One negotiation or work step.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action: Action,
    /// Required for `counter`.
    pub amount: Option<Decimal>,
    /// Required for `reject` and `dispute`, optional for `requestRefund`.
    pub reason: Option<String>,
    /// Optional proof of work for `completeWork`.
    pub deliverable_url: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub reason: String,
    /// Must be true when a cancellation penalty applies.
    #[serde(default)]
    pub acknowledge_penalty: bool,
}

/// A payment confirmed by the payment gateway.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub transaction_id: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRefundRequest {
    pub approve: bool,
}

// --- Query Parameters ---

#[derive(Serialize, Deserialize, IntoParams, ToSchema, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListCollaborationsParams {
    /// Only return collaborations in this tab.
    pub bucket: Option<StatusBucket>,
}

// --- Responses ---

/// A collaboration as seen by one participant.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationView {
    #[serde(flatten)]
    pub collaboration: Collaboration,
    pub bucket: StatusBucket,
    pub viewer_role: ActorRole,
    pub permitted_actions: Vec<Action>,
    /// Present when cancelling is allowed and costs a penalty.
    pub cancellation_penalty: Option<Decimal>,
}
