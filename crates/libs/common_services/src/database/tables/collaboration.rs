use chrono::{DateTime, Utc};
use common_types::{
    ActorRole, Collaboration, CollaborationKind, CollaborationStatus, Offer, PaymentStatus,
    WorkStatus,
};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Flat `collaboration` row. The offer is spread over three nullable columns
/// and the status is free text.
#[derive(Debug, FromRow)]
pub struct CollaborationRow {
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
    pub status: String,
    pub offer_amount: Option<Decimal>,
    pub offer_by: Option<ActorRole>,
    pub offer_at: Option<DateTime<Utc>>,
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

impl From<CollaborationRow> for Collaboration {
    fn from(row: CollaborationRow) -> Self {
        let current_offer = match (row.offer_amount, row.offer_by, row.offer_at) {
            (Some(amount), Some(proposed_by), Some(proposed_at)) => Some(Offer {
                amount,
                proposed_by,
                proposed_at,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            collab_code: row.collab_code,
            kind: row.kind,
            brand_id: row.brand_id,
            partner_id: row.partner_id,
            partner_role: row.partner_role,
            requested_by: row.requested_by,
            title: row.title,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            status: CollaborationStatus::from(row.status),
            current_offer,
            final_amount: row.final_amount,
            work_status: row.work_status,
            payment_status: row.payment_status,
            reason: row.reason,
            deliverable_url: row.deliverable_url,
            penalty_amount: row.penalty_amount,
            transaction_id: row.transaction_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CollaborationRow {
        let now = Utc::now();
        CollaborationRow {
            id: "abc".into(),
            collab_code: None,
            kind: CollaborationKind::DirectCollaboration,
            brand_id: 1,
            partner_id: 2,
            partner_role: ActorRole::Influencer,
            requested_by: ActorRole::Brand,
            title: "Launch reel".into(),
            description: None,
            start_date: None,
            end_date: None,
            status: "brand_offer".into(),
            offer_amount: Some(Decimal::from(2500)),
            offer_by: Some(ActorRole::Brand),
            offer_at: Some(now),
            final_amount: None,
            work_status: None,
            payment_status: None,
            reason: None,
            deliverable_url: None,
            penalty_amount: None,
            transaction_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn offer_columns_become_an_offer() {
        let collaboration = Collaboration::from(row());
        assert_eq!(collaboration.status, CollaborationStatus::BrandOffer);
        let offer = collaboration.current_offer.expect("offer");
        assert_eq!(offer.amount, Decimal::from(2500));
        assert_eq!(offer.proposed_by, ActorRole::Brand);
    }

    #[test]
    fn partial_offer_columns_are_dropped() {
        let collaboration = Collaboration::from(CollaborationRow {
            offer_by: None,
            status: "legacy_hold".into(),
            ..row()
        });
        assert_eq!(collaboration.current_offer, None);
        assert!(!collaboration.status.is_recognized());
    }
}
