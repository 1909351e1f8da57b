use crate::api::collaboration::service::{load_as_participant, persist};
use crate::api::payout::error::PayoutError;
use crate::database::app_user::User;
use crate::database::collaboration_store::CollaborationStore;
use crate::database::kyc::KycStatus;
use crate::database::kyc_store::KycStore;
use crate::database::payout::{Payout, PayoutKind, PayoutStatus};
use crate::database::payout_store::PayoutStore;
use crate::alert;
use crate::utils::nice_id;
use app_state::constants;
use chrono::Utc;
use common_types::{
    ActorRole, Collaboration, CollaborationStatus, FeeSettings, PaymentStatus, PayoutBreakdown,
    Side, TransitionError, calculate_payout,
};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use tracing::{info, instrument};

fn ensure_payee(role: ActorRole) -> Result<(), PayoutError> {
    if role.side() == Side::Payee {
        Ok(())
    } else {
        Err(PayoutError::NotPayee)
    }
}

async fn breakdown_for(
    executor: impl Executor<'_, Database = Postgres>,
    collaboration: &Collaboration,
    fees: &FeeSettings,
) -> Result<PayoutBreakdown, PayoutError> {
    let final_amount = collaboration
        .final_amount
        .ok_or(TransitionError::MissingAgreement)?;
    let prior = PayoutStore::sum_paid_partials(executor, &collaboration.id).await?;
    Ok(calculate_payout(final_amount, fees, prior))
}

/// Shows the payee what a payout would come to, without requesting it.
#[instrument(skip(pool, user, fees), fields(user_id = user.id))]
pub async fn preview_payout(
    pool: &PgPool,
    user: &User,
    collaboration_id: &str,
    fees: &FeeSettings,
) -> Result<PayoutBreakdown, PayoutError> {
    let (collaboration, role) = load_as_participant(pool, user, collaboration_id).await?;
    ensure_payee(role)?;
    if collaboration.status != CollaborationStatus::Completed {
        return Err(TransitionError::UnexpectedStatus {
            expected: CollaborationStatus::Completed,
            status: collaboration.status,
        }
        .into());
    }
    breakdown_for(pool, &collaboration, fees).await
}

/// Requests the final payout. The payout row and the `payout_requested`
/// payment status are written in one transaction.
#[instrument(skip(pool, user, fees), fields(user_id = user.id))]
pub async fn request_payout(
    pool: &PgPool,
    user: &User,
    collaboration_id: &str,
    fees: &FeeSettings,
) -> Result<Payout, PayoutError> {
    let mut tx = pool.begin().await?;

    let (original, role) = load_as_participant(&mut *tx, user, collaboration_id).await?;
    ensure_payee(role)?;
    let kyc_approved = KycStore::find_by_user(&mut *tx, user.id)
        .await?
        .is_some_and(|kyc| kyc.status == KycStatus::Approved);
    if !kyc_approved {
        return Err(PayoutError::KycNotApproved);
    }

    let now = Utc::now();
    let mut updated = original.clone();
    updated.request_payout(role, now)?;

    let breakdown = breakdown_for(&mut *tx, &original, fees).await?;
    if !breakdown.has_balance() {
        return Err(PayoutError::NoBalance {
            net: breakdown.net_amount,
        });
    }

    persist(&mut *tx, &original, &updated).await?;
    let payout = PayoutStore::create(
        &mut *tx,
        &nice_id(constants().database.record_id_length),
        collaboration_id,
        user.id,
        PayoutKind::Final,
        PayoutStatus::Pending,
        &breakdown,
    )
    .await?;
    tx.commit().await?;

    info!(
        payout_id = %payout.id,
        collaboration_id,
        net = %payout.net_amount,
        "Payout requested"
    );
    Ok(payout)
}

#[instrument(skip(pool, user), fields(user_id = user.id))]
pub async fn list_payouts(pool: &PgPool, user: &User) -> Result<Vec<Payout>, PayoutError> {
    Ok(PayoutStore::list_for_payee(pool, user.id).await?)
}

/// Returns the agreed amount when `amount` may be paid out on top of the
/// partials already paid.
fn check_partial_payout(
    collaboration: &Collaboration,
    prior: Decimal,
    amount: Decimal,
) -> Result<Decimal, PayoutError> {
    let status = collaboration.status.clone();
    if !status.is_recognized() || (status.is_terminal() && status != CollaborationStatus::Completed)
    {
        return Err(PayoutError::Conflict(format!(
            "collaboration {} is {} and takes no payouts",
            collaboration.id,
            status.as_str()
        )));
    }
    if collaboration.payment_status != Some(PaymentStatus::Paid) {
        return Err(PayoutError::Conflict(format!(
            "collaboration {} holds no payment to advance from",
            collaboration.id
        )));
    }
    let agreed = collaboration
        .final_amount
        .ok_or(TransitionError::MissingAgreement)?;
    let remaining = agreed - prior;
    if amount > remaining {
        return Err(PayoutError::BadRequest(format!(
            "partial payout of {amount} exceeds the remaining {remaining}"
        )));
    }
    Ok(agreed)
}

/// Admin: pays out part of the agreed amount ahead of completion.
#[instrument(skip(pool))]
pub async fn record_partial_payout(
    pool: &PgPool,
    collaboration_id: &str,
    amount: Decimal,
) -> Result<Payout, PayoutError> {
    if amount <= Decimal::ZERO {
        return Err(TransitionError::InvalidAmount.into());
    }
    let mut tx = pool.begin().await?;
    // Locked so concurrent partials see each other's rows in the sum.
    let collaboration = CollaborationStore::find_by_id_for_update(&mut *tx, collaboration_id)
        .await?
        .ok_or_else(|| PayoutError::NotFound(collaboration_id.to_owned()))?;
    let prior = PayoutStore::sum_paid_partials(&mut *tx, collaboration_id).await?;
    let agreed = check_partial_payout(&collaboration, prior, amount)?;

    let breakdown = PayoutBreakdown {
        final_amount: agreed,
        commission: Decimal::ZERO,
        processing_charge: Decimal::ZERO,
        gst: Decimal::ZERO,
        prior_payouts: prior,
        total_deductions: prior,
        net_amount: amount,
    };
    let payout = PayoutStore::create(
        &mut *tx,
        &nice_id(constants().database.record_id_length),
        collaboration_id,
        collaboration.partner_id,
        PayoutKind::Partial,
        PayoutStatus::Paid,
        &breakdown,
    )
    .await?;
    tx.commit().await?;

    info!(payout_id = %payout.id, collaboration_id, %amount, "Partial payout recorded");
    Ok(payout)
}

/// Admin: confirms a pending payout was sent. Settling a final payout marks
/// the collaboration as paid out.
#[instrument(skip(pool))]
pub async fn complete_payout(pool: &PgPool, payout_id: &str) -> Result<Payout, PayoutError> {
    let mut tx = pool.begin().await?;
    let Some(payout) = PayoutStore::mark_paid(&mut *tx, payout_id).await? else {
        return match PayoutStore::find_by_id(&mut *tx, payout_id).await? {
            Some(_) => Err(PayoutError::Conflict(format!(
                "payout {payout_id} was already paid"
            ))),
            None => Err(PayoutError::NotFound(payout_id.to_owned())),
        };
    };

    if payout.kind == PayoutKind::Final {
        let original = match payout.collaboration_id.as_deref() {
            Some(collaboration_id) => {
                CollaborationStore::find_by_id(&mut *tx, collaboration_id).await?
            }
            None => None,
        };
        if let Some(original) = original {
            let mut updated = original.clone();
            updated.mark_paid_out(Utc::now())?;
            persist(&mut *tx, &original, &updated).await?;
        } else {
            alert!("Final payout {} settled without a collaboration to mark paid out", payout_id);
        }
    }
    tx.commit().await?;

    info!(payout_id, kind = ?payout.kind, "Payout completed");
    Ok(payout)
}
