use crate::collaboration::role::{ActorRole, CollaborationKind, Side};
use crate::collaboration::status::CollaborationStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maps to the `work_status` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "work_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    NotStarted,
    Started,
    Submitted,
}

/// Maps to the `payment_status` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    PayoutRequested,
    PaidOut,
    RefundRequested,
    Refunded,
}

/// The latest offer on the table. Earlier offers are overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub amount: Decimal,
    pub proposed_by: ActorRole,
    pub proposed_at: DateTime<Utc>,
}

/// A collaboration between a brand (payer) and an influencer or agency (payee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collaboration {
    pub id: String,
    pub collab_code: Option<String>,
    pub kind: CollaborationKind,
    pub brand_id: i32,
    pub partner_id: i32,
    pub partner_role: ActorRole,
    pub requested_by: ActorRole,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[schema(value_type = String, example = "brand_offer")]
    pub status: CollaborationStatus,
    pub current_offer: Option<Offer>,
    pub final_amount: Option<Decimal>,
    pub work_status: Option<WorkStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub reason: Option<String>,
    pub deliverable_url: Option<String>,
    pub penalty_amount: Option<Decimal>,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collaboration {
    /// Role the given user plays in this collaboration, if any.
    #[must_use]
    pub fn role_of(&self, user_id: i32) -> Option<ActorRole> {
        if user_id == self.brand_id {
            Some(ActorRole::Brand)
        } else if user_id == self.partner_id {
            Some(self.partner_role)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == Some(PaymentStatus::Paid)
    }

    /// Only finished or rejected records may be purged from history.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        self.status.is_terminal()
    }

    /// The end date has passed (or there is none to wait for).
    #[must_use]
    pub fn work_window_closed(&self, now: DateTime<Utc>) -> bool {
        if !self.kind.is_time_bound() {
            return true;
        }
        self.end_date.is_none_or(|end| now >= end)
    }

    /// The side that opened the current negotiation round.
    #[must_use]
    pub fn offering_side(&self) -> Side {
        self.current_offer
            .as_ref()
            .map_or(self.requested_by, |offer| offer.proposed_by)
            .side()
    }

    /// `final_amount` appears only from `agreement_reached` on, and the offer is
    /// gone once it does.
    #[must_use]
    pub fn amounts_consistent(&self) -> bool {
        match self.final_amount {
            Some(_) => self.current_offer.is_none() && !self.status.is_offer_stage(),
            None => true,
        }
    }
}
