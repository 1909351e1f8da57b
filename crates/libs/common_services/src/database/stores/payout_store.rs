use crate::database::DbError;
use crate::database::payout::{Payout, PayoutKind, PayoutStatus};
use common_types::PayoutBreakdown;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

pub struct PayoutStore;

impl PayoutStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        payout_id: &str,
        collaboration_id: &str,
        payee_id: i32,
        kind: PayoutKind,
        status: PayoutStatus,
        breakdown: &PayoutBreakdown,
    ) -> Result<Payout, DbError> {
        Ok(sqlx::query_as::<_, Payout>(
            r"
            INSERT INTO payout (
                id, collaboration_id, payee_id, kind, final_amount, commission,
                processing_charge, gst, prior_payouts, net_amount, status, paid_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    CASE WHEN $11 = 'paid'::payout_status THEN now() END)
            RETURNING *
            ",
        )
        .bind(payout_id)
        .bind(collaboration_id)
        .bind(payee_id)
        .bind(kind)
        .bind(breakdown.final_amount)
        .bind(breakdown.commission)
        .bind(breakdown.processing_charge)
        .bind(breakdown.gst)
        .bind(breakdown.prior_payouts)
        .bind(breakdown.net_amount)
        .bind(status)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        payout_id: &str,
    ) -> Result<Option<Payout>, DbError> {
        Ok(sqlx::query_as::<_, Payout>("SELECT * FROM payout WHERE id = $1")
            .bind(payout_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn list_for_payee(
        executor: impl Executor<'_, Database = Postgres>,
        payee_id: i32,
    ) -> Result<Vec<Payout>, DbError> {
        Ok(sqlx::query_as::<_, Payout>(
            "SELECT * FROM payout WHERE payee_id = $1 ORDER BY created_at DESC, id",
        )
        .bind(payee_id)
        .fetch_all(executor)
        .await?)
    }

    /// Sum of partial payouts already paid out for a collaboration.
    pub async fn sum_paid_partials(
        executor: impl Executor<'_, Database = Postgres>,
        collaboration_id: &str,
    ) -> Result<Decimal, DbError> {
        Ok(sqlx::query_scalar::<_, Decimal>(
            r"
            SELECT COALESCE(SUM(net_amount), 0)
            FROM payout
            WHERE collaboration_id = $1 AND kind = 'partial' AND status = 'paid'
            ",
        )
        .bind(collaboration_id)
        .fetch_one(executor)
        .await?)
    }

    /// Marks a pending payout as paid. Returns `None` if it was not pending.
    pub async fn mark_paid(
        executor: impl Executor<'_, Database = Postgres>,
        payout_id: &str,
    ) -> Result<Option<Payout>, DbError> {
        Ok(sqlx::query_as::<_, Payout>(
            r"
            UPDATE payout
            SET status = 'paid', paid_at = now()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            ",
        )
        .bind(payout_id)
        .fetch_optional(executor)
        .await?)
    }
}
