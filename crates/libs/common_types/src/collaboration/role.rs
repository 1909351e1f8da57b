use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use utoipa::ToSchema;

/// Marketplace role of a participant. Maps to the `actor_role` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "actor_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Brand,
    Influencer,
    Agency,
}

/// Which end of the money flow a role sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Payer,
    Payee,
}

impl ActorRole {
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Brand => Side::Payer,
            Self::Influencer | Self::Agency => Side::Payee,
        }
    }
}

impl Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Brand => "brand",
            Self::Influencer => "influencer",
            Self::Agency => "agency",
        };
        f.write_str(s)
    }
}

/// The four record shapes a collaboration can take.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "collaboration_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CollaborationKind {
    AdSlotRequest,
    BannerBooking,
    CampaignApplication,
    DirectCollaboration,
}

impl CollaborationKind {
    /// Slots and bookings run until an end date; work can only be completed after it.
    #[must_use]
    pub const fn is_time_bound(self) -> bool {
        matches!(self, Self::AdSlotRequest | Self::BannerBooking)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdSlotRequest => "ad_slot_request",
            Self::BannerBooking => "banner_booking",
            Self::CampaignApplication => "campaign_application",
            Self::DirectCollaboration => "direct_collaboration",
        }
    }

    /// Prefix of the human-readable collab code.
    #[must_use]
    pub const fn code_prefix(self) -> &'static str {
        match self {
            Self::AdSlotRequest => "ADS",
            Self::BannerBooking => "BNR",
            Self::CampaignApplication => "CMP",
            Self::DirectCollaboration => "COL",
        }
    }
}

impl Display for CollaborationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
