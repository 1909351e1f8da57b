//! Creation of new collaborations: who may open which kind, and in which status it starts.

use crate::collaboration::error::TransitionError;
use crate::collaboration::record::{Collaboration, Offer};
use crate::collaboration::role::{ActorRole, CollaborationKind, Side};
use crate::collaboration::status::CollaborationStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Participant as seen at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub user_id: i32,
    pub role: ActorRole,
}

#[derive(Debug, Clone)]
pub struct OpeningRequest {
    pub kind: CollaborationKind,
    pub creator: Participant,
    pub counterparty: Participant,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Opening offer by the creator.
    pub amount: Option<Decimal>,
}

/// Status a new collaboration starts in.
pub fn opening_status(
    kind: CollaborationKind,
    creator: ActorRole,
    has_offer: bool,
) -> Result<CollaborationStatus, TransitionError> {
    use CollaborationKind::{AdSlotRequest, BannerBooking, CampaignApplication, DirectCollaboration};

    let status = match (creator, kind) {
        (ActorRole::Brand, AdSlotRequest | BannerBooking) => CollaborationStatus::Pending,
        (ActorRole::Influencer | ActorRole::Agency, CampaignApplication) => {
            CollaborationStatus::PendingApproval
        }
        (_, DirectCollaboration) if !has_offer => CollaborationStatus::Pending,
        (ActorRole::Brand, DirectCollaboration) => CollaborationStatus::BrandOffer,
        (ActorRole::Influencer, DirectCollaboration) => CollaborationStatus::InfluencerOffer,
        (ActorRole::Agency, DirectCollaboration) => CollaborationStatus::AgencyOffer,
        (role, kind) => return Err(TransitionError::CannotOpen { kind, role }),
    };
    Ok(status)
}

impl Collaboration {
    /// Builds a new record from a creation request.
    pub fn open(
        id: String,
        collab_code: Option<String>,
        request: OpeningRequest,
        now: DateTime<Utc>,
    ) -> Result<Self, TransitionError> {
        let OpeningRequest {
            kind,
            creator,
            counterparty,
            title,
            description,
            start_date,
            end_date,
            amount,
        } = request;

        if creator.role.side() == counterparty.role.side() || creator.user_id == counterparty.user_id
        {
            return Err(TransitionError::SameSide);
        }
        if amount.is_some_and(|a| a <= Decimal::ZERO) {
            return Err(TransitionError::InvalidAmount);
        }
        let schedule_ok = match (start_date, end_date) {
            (Some(start), Some(end)) => end >= start,
            (_, None) => !kind.is_time_bound(),
            (None, Some(_)) => true,
        };
        if !schedule_ok {
            return Err(TransitionError::InvalidSchedule);
        }

        let status = opening_status(kind, creator.role, amount.is_some())?;
        let (brand, partner) = match creator.role.side() {
            Side::Payer => (creator, counterparty),
            Side::Payee => (counterparty, creator),
        };

        Ok(Self {
            id,
            collab_code,
            kind,
            brand_id: brand.user_id,
            partner_id: partner.user_id,
            partner_role: partner.role,
            requested_by: creator.role,
            title,
            description,
            start_date,
            end_date,
            status,
            current_offer: amount.map(|amount| Offer {
                amount,
                proposed_by: creator.role,
                proposed_at: now,
            }),
            final_amount: None,
            work_status: None,
            payment_status: None,
            reason: None,
            deliverable_url: None,
            penalty_amount: None,
            transaction_id: None,
            created_at: now,
            updated_at: now,
        })
    }
}
