use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CancellationError {
    #[error("a cancellation reason is required")]
    EmptyReason,

    #[error("the cancellation penalty of {penalty} must be acknowledged")]
    PenaltyNotAcknowledged { penalty: Decimal },

    #[error("a cancellation is already being submitted")]
    AlreadySubmitting,
}

/// A validated cancellation, ready to be applied to a collaboration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationTicket {
    pub reason: String,
    /// Penalty charged to the canceller. `None` when no penalty applies.
    pub penalty: Option<Decimal>,
}

/// State of a cancellation form: a free-text reason plus an in-flight flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationDraft {
    reason: String,
    submitting: bool,
}

impl CancellationDraft {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            submitting: false,
        }
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Confirm is disabled while the reason is blank or a submission is in flight.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        !self.submitting && !self.reason.trim().is_empty()
    }

    /// Penalty to surface to the user, if there is one.
    #[must_use]
    pub fn penalty_notice(penalty: Decimal) -> Option<Decimal> {
        (penalty > Decimal::ZERO).then_some(penalty)
    }

    /// Validates the draft and marks it as submitting.
    pub fn submit(
        &mut self,
        penalty: Decimal,
        acknowledged: bool,
    ) -> Result<CancellationTicket, CancellationError> {
        if self.submitting {
            return Err(CancellationError::AlreadySubmitting);
        }
        let ticket = Self::validate(&self.reason, penalty, acknowledged)?;
        self.submitting = true;
        Ok(ticket)
    }

    /// The submission resolved, successfully or not.
    pub fn finish(&mut self) {
        self.submitting = false;
    }

    /// Stateless validation used by the API, where there is no form to track.
    pub fn validate(
        reason: &str,
        penalty: Decimal,
        acknowledged: bool,
    ) -> Result<CancellationTicket, CancellationError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(CancellationError::EmptyReason);
        }
        let penalty = Self::penalty_notice(penalty);
        match penalty {
            Some(penalty) if !acknowledged => {
                Err(CancellationError::PenaltyNotAcknowledged { penalty })
            }
            _ => Ok(CancellationTicket {
                reason: reason.to_owned(),
                penalty,
            }),
        }
    }
}
