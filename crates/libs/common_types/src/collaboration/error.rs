use crate::collaboration::negotiation::Action;
use crate::collaboration::role::{ActorRole, CollaborationKind};
use crate::collaboration::status::CollaborationStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("'{action}' is not available to the {role} while the collaboration is {status}")]
    NotPermitted {
        action: Action,
        role: ActorRole,
        status: CollaborationStatus,
    },

    #[error("collaboration is {status}, expected {expected}")]
    UnexpectedStatus {
        expected: CollaborationStatus,
        status: CollaborationStatus,
    },

    #[error("a {role} cannot open a {kind}")]
    CannotOpen {
        kind: CollaborationKind,
        role: ActorRole,
    },

    #[error("both participants must be on opposite sides of the payment")]
    SameSide,

    #[error("the end date must not be before the start date, and time-bound kinds need one")]
    InvalidSchedule,

    #[error("there is no offer to accept")]
    MissingOffer,

    #[error("no amount has been agreed yet")]
    MissingAgreement,

    #[error("offer amount must be greater than zero")]
    InvalidAmount,

    #[error("a reason is required")]
    EmptyReason,

    #[error("work can only be completed after {ends_at}")]
    WorkWindowOpen { ends_at: DateTime<Utc> },

    #[error("payment of {paid} does not match the agreed amount of {expected}")]
    PaymentMismatch { expected: Decimal, paid: Decimal },
}

impl TransitionError {
    /// Errors caused by bad input rather than by the state of the record.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount
                | Self::EmptyReason
                | Self::PaymentMismatch { .. }
                | Self::CannotOpen { .. }
                | Self::SameSide
                | Self::InvalidSchedule
        )
    }
}
