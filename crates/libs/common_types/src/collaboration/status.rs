use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;

/// Status shared by every collaboration kind.
///
/// Statuses are stored as text. A stored value that is not part of the known
/// taxonomy is kept as [`CollaborationStatus::Unrecognized`] so it can still be
/// listed (it falls into the "other" tab) instead of failing the whole read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CollaborationStatus {
    Pending,
    PendingApproval,
    InfluencerOffer,
    AgencyOffer,
    BrandOffer,
    BrandCounterOffer,
    InfluencerCounterOffer,
    AgreementReached,
    InProgress,
    WorkSubmitted,
    Completed,
    Rejected,
    Disputed,
    BrandDecisionPending,
    RefundPendingAdminReview,
    Unrecognized(String),
}

impl CollaborationStatus {
    /// Every status of the known taxonomy, in lifecycle order.
    pub const KNOWN: [Self; 15] = [
        Self::Pending,
        Self::PendingApproval,
        Self::InfluencerOffer,
        Self::AgencyOffer,
        Self::BrandOffer,
        Self::BrandCounterOffer,
        Self::InfluencerCounterOffer,
        Self::AgreementReached,
        Self::InProgress,
        Self::WorkSubmitted,
        Self::Completed,
        Self::Rejected,
        Self::Disputed,
        Self::BrandDecisionPending,
        Self::RefundPendingAdminReview,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::PendingApproval => "pending_approval",
            Self::InfluencerOffer => "influencer_offer",
            Self::AgencyOffer => "agency_offer",
            Self::BrandOffer => "brand_offer",
            Self::BrandCounterOffer => "brand_counter_offer",
            Self::InfluencerCounterOffer => "influencer_counter_offer",
            Self::AgreementReached => "agreement_reached",
            Self::InProgress => "in_progress",
            Self::WorkSubmitted => "work_submitted",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Disputed => "disputed",
            Self::BrandDecisionPending => "brand_decision_pending",
            Self::RefundPendingAdminReview => "refund_pending_admin_review",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Statuses in which an offer is on the table and no amount is agreed yet.
    #[must_use]
    pub const fn is_offer_stage(&self) -> bool {
        matches!(
            self,
            Self::Pending
                | Self::PendingApproval
                | Self::InfluencerOffer
                | Self::AgencyOffer
                | Self::BrandOffer
                | Self::BrandCounterOffer
                | Self::InfluencerCounterOffer
        )
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for CollaborationStatus {
    fn from(raw: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|status| status.as_str() == raw)
            .unwrap_or_else(|| Self::Unrecognized(raw.to_owned()))
    }
}

impl From<String> for CollaborationStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<CollaborationStatus> for String {
    fn from(status: CollaborationStatus) -> Self {
        match status {
            CollaborationStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl Display for CollaborationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse_back_to_themselves() {
        for status in CollaborationStatus::KNOWN {
            assert_eq!(CollaborationStatus::from(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_is_preserved_verbatim() {
        let status = CollaborationStatus::from("on_hold");
        assert_eq!(status, CollaborationStatus::Unrecognized("on_hold".into()));
        assert_eq!(String::from(status), "on_hold");
    }

    #[test]
    fn serializes_as_snake_case_text() {
        let json = serde_json::to_string(&CollaborationStatus::BrandCounterOffer).unwrap();
        assert_eq!(json, "\"brand_counter_offer\"");
        let parsed: CollaborationStatus = serde_json::from_str("\"work_submitted\"").unwrap();
        assert_eq!(parsed, CollaborationStatus::WorkSubmitted);
    }
}
