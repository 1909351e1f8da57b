//! Which actions a participant may take on a collaboration, and what each
//! action does to the record.
//!
//! Every transition first checks [`Collaboration::permitted_actions`] for the
//! acting role, so the list shown to a user and the transitions the server
//! accepts never disagree.

use crate::collaboration::cancellation::CancellationTicket;
use crate::collaboration::error::TransitionError;
use crate::collaboration::record::{Collaboration, Offer, PaymentStatus, WorkStatus};
use crate::collaboration::role::{ActorRole, Side};
use crate::collaboration::status::CollaborationStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Message,
    Reject,
    Counter,
    Accept,
    PayNow,
    /// Informational: the payee waits for the payer to pay.
    AwaitPayment,
    StartWork,
    CompleteWork,
    MarkComplete,
    Dispute,
    ApproveRelease,
    RequestRefund,
    RequestPayout,
    Cancel,
    Delete,
}

impl Action {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Reject => "reject",
            Self::Counter => "counter",
            Self::Accept => "accept",
            Self::PayNow => "pay now",
            Self::AwaitPayment => "await payment",
            Self::StartWork => "start work",
            Self::CompleteWork => "complete work",
            Self::MarkComplete => "mark complete",
            Self::Dispute => "dispute",
            Self::ApproveRelease => "approve release",
            Self::RequestRefund => "request refund",
            Self::RequestPayout => "request payout",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Collaboration {
    /// Ordered list of actions the viewer may take right now.
    #[must_use]
    pub fn permitted_actions(&self, viewer: ActorRole, now: DateTime<Utc>) -> Vec<Action> {
        let side = viewer.side();
        let mut actions = Vec::new();

        if self.status.is_recognized() && !self.status.is_terminal() {
            actions.push(Action::Message);
        }

        match &self.status {
            status if status.is_offer_stage() => {
                if self.offering_side() != side {
                    actions.extend([Action::Reject, Action::Counter]);
                    if self.current_offer.is_some() {
                        actions.push(Action::Accept);
                    }
                }
                actions.push(Action::Cancel);
            }
            CollaborationStatus::AgreementReached => {
                actions.push(match side {
                    Side::Payer => Action::PayNow,
                    Side::Payee => Action::AwaitPayment,
                });
                actions.push(Action::Cancel);
            }
            CollaborationStatus::InProgress => {
                let not_started = matches!(self.work_status, None | Some(WorkStatus::NotStarted));
                if side == Side::Payee && self.is_paid() {
                    match self.work_status {
                        None | Some(WorkStatus::NotStarted) => actions.push(Action::StartWork),
                        Some(WorkStatus::Started) if self.work_window_closed(now) => {
                            actions.push(Action::CompleteWork);
                        }
                        _ => {}
                    }
                }
                if not_started {
                    actions.push(Action::Cancel);
                }
            }
            CollaborationStatus::WorkSubmitted if side == Side::Payer => {
                actions.extend([Action::MarkComplete, Action::Dispute]);
            }
            CollaborationStatus::BrandDecisionPending if side == Side::Payer => {
                actions.extend([Action::ApproveRelease, Action::RequestRefund]);
            }
            CollaborationStatus::Completed => {
                if side == Side::Payee && self.is_paid() {
                    actions.push(Action::RequestPayout);
                }
            }
            _ => {}
        }

        if self.is_deletable() {
            actions.push(Action::Delete);
        }

        actions
    }

    fn ensure_permitted(
        &self,
        actor: ActorRole,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        if self.permitted_actions(actor, now).contains(&action) {
            Ok(())
        } else {
            Err(TransitionError::NotPermitted {
                action,
                role: actor,
                status: self.status.clone(),
            })
        }
    }

    fn ensure_status(&self, expected: CollaborationStatus) -> Result<(), TransitionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(TransitionError::UnexpectedStatus {
                expected,
                status: self.status.clone(),
            })
        }
    }

    /// Status the other party sees after `actor` puts a new amount on the table.
    fn counter_status(&self, actor: ActorRole) -> CollaborationStatus {
        let answers_other_side = self.offering_side() != actor.side();
        match actor {
            ActorRole::Brand if answers_other_side => CollaborationStatus::BrandCounterOffer,
            ActorRole::Brand => CollaborationStatus::BrandOffer,
            ActorRole::Influencer if answers_other_side => {
                CollaborationStatus::InfluencerCounterOffer
            }
            ActorRole::Influencer => CollaborationStatus::InfluencerOffer,
            ActorRole::Agency => CollaborationStatus::AgencyOffer,
        }
    }

    /// Takes the counterpart's amount as the final amount.
    pub fn accept_offer(
        &mut self,
        actor: ActorRole,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::Accept, now)?;
        let offer = self
            .current_offer
            .take()
            .ok_or(TransitionError::MissingOffer)?;

        self.final_amount = Some(offer.amount);
        self.status = CollaborationStatus::AgreementReached;
        self.payment_status = Some(PaymentStatus::Unpaid);
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the offer on the table. Only the latest offer is kept.
    pub fn counter_offer(
        &mut self,
        actor: ActorRole,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::Counter, now)?;
        if amount <= Decimal::ZERO {
            return Err(TransitionError::InvalidAmount);
        }

        self.status = self.counter_status(actor);
        self.current_offer = Some(Offer {
            amount,
            proposed_by: actor,
            proposed_at: now,
        });
        self.updated_at = now;
        Ok(())
    }

    pub fn reject(
        &mut self,
        actor: ActorRole,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::Reject, now)?;
        let reason = non_empty(reason)?;

        self.status = CollaborationStatus::Rejected;
        self.reason = Some(reason);
        self.updated_at = now;
        Ok(())
    }

    /// Applies a confirmed cancellation. Unpaid records end as `rejected`; a
    /// paid one goes to admin review with its refund requested.
    pub fn cancel(
        &mut self,
        actor: ActorRole,
        ticket: CancellationTicket,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::Cancel, now)?;

        if self.is_paid() {
            self.status = CollaborationStatus::RefundPendingAdminReview;
            self.payment_status = Some(PaymentStatus::RefundRequested);
        } else {
            self.status = CollaborationStatus::Rejected;
        }
        self.reason = Some(ticket.reason);
        self.penalty_amount = ticket.penalty;
        self.updated_at = now;
        Ok(())
    }

    /// Records a payment confirmed by the payment gateway.
    pub fn record_payment(
        &mut self,
        actor: ActorRole,
        amount: Decimal,
        transaction_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::PayNow, now)?;
        let expected = self.final_amount.ok_or(TransitionError::MissingAgreement)?;
        if amount != expected {
            return Err(TransitionError::PaymentMismatch {
                expected,
                paid: amount,
            });
        }

        self.status = CollaborationStatus::InProgress;
        self.payment_status = Some(PaymentStatus::Paid);
        self.work_status = Some(WorkStatus::NotStarted);
        self.transaction_id = Some(transaction_id.to_owned());
        self.updated_at = now;
        Ok(())
    }

    pub fn start_work(&mut self, actor: ActorRole, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::StartWork, now)?;
        self.work_status = Some(WorkStatus::Started);
        self.updated_at = now;
        Ok(())
    }

    /// Submits the work. Time-bound slots can only be completed once their end date passed.
    pub fn complete_work(
        &mut self,
        actor: ActorRole,
        deliverable_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        let waiting_for_window = self.status == CollaborationStatus::InProgress
            && self.work_status == Some(WorkStatus::Started)
            && actor.side() == Side::Payee
            && !self.work_window_closed(now);
        if waiting_for_window {
            if let Some(ends_at) = self.end_date {
                return Err(TransitionError::WorkWindowOpen { ends_at });
            }
        }
        self.ensure_permitted(actor, Action::CompleteWork, now)?;

        self.status = CollaborationStatus::WorkSubmitted;
        self.work_status = Some(WorkStatus::Submitted);
        if deliverable_url.is_some() {
            self.deliverable_url = deliverable_url;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn mark_complete(&mut self, actor: ActorRole, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::MarkComplete, now)?;
        self.status = CollaborationStatus::Completed;
        self.updated_at = now;
        Ok(())
    }

    pub fn dispute(
        &mut self,
        actor: ActorRole,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::Dispute, now)?;
        let reason = non_empty(reason)?;

        self.status = CollaborationStatus::Disputed;
        self.reason = Some(reason);
        self.updated_at = now;
        Ok(())
    }

    /// Brand accepts the work after a dispute review and releases the payment.
    pub fn approve_release(
        &mut self,
        actor: ActorRole,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::ApproveRelease, now)?;
        self.status = CollaborationStatus::Completed;
        self.updated_at = now;
        Ok(())
    }

    pub fn request_refund(
        &mut self,
        actor: ActorRole,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::RequestRefund, now)?;

        self.status = CollaborationStatus::RefundPendingAdminReview;
        self.payment_status = Some(PaymentStatus::RefundRequested);
        if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
            self.reason = Some(reason.to_owned());
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn request_payout(
        &mut self,
        actor: ActorRole,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_permitted(actor, Action::RequestPayout, now)?;
        self.payment_status = Some(PaymentStatus::PayoutRequested);
        self.updated_at = now;
        Ok(())
    }

    /// Admin hands a reviewed dispute back to the brand for a decision.
    pub fn review_dispute(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.ensure_status(CollaborationStatus::Disputed)?;
        self.status = CollaborationStatus::BrandDecisionPending;
        self.updated_at = now;
        Ok(())
    }

    /// Admin decision on a refund request. A denied refund completes the
    /// collaboration with the payment still held for the payee.
    pub fn resolve_refund(&mut self, approve: bool, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.ensure_status(CollaborationStatus::RefundPendingAdminReview)?;
        if approve {
            self.status = CollaborationStatus::Rejected;
            self.payment_status = Some(PaymentStatus::Refunded);
        } else {
            self.status = CollaborationStatus::Completed;
            self.payment_status = Some(PaymentStatus::Paid);
        }
        self.updated_at = now;
        Ok(())
    }

    /// The final payout went out.
    pub fn mark_paid_out(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.ensure_status(CollaborationStatus::Completed)?;
        self.payment_status = Some(PaymentStatus::PaidOut);
        self.updated_at = now;
        Ok(())
    }
}

fn non_empty(reason: &str) -> Result<String, TransitionError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(TransitionError::EmptyReason);
    }
    Ok(reason.to_owned())
}
