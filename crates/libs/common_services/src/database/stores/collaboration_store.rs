use crate::database::DbError;
use crate::database::collaboration::CollaborationRow;
use chrono::{DateTime, Utc};
use common_types::{Collaboration, CollaborationStatus};
use sqlx::{Executor, Postgres};

pub struct CollaborationStore;

fn offer_stage_statuses() -> Vec<String> {
    CollaborationStatus::KNOWN
        .iter()
        .filter(|status| status.is_offer_stage())
        .map(|status| status.as_str().to_owned())
        .collect()
}

impl CollaborationStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        collaboration: &Collaboration,
    ) -> Result<Collaboration, DbError> {
        let offer = collaboration.current_offer.as_ref();
        let row = sqlx::query_as::<_, CollaborationRow>(
            r"
            INSERT INTO collaboration (
                id, collab_code, kind, brand_id, partner_id, partner_role, requested_by,
                title, description, start_date, end_date, status,
                offer_amount, offer_by, offer_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            ",
        )
        .bind(&collaboration.id)
        .bind(&collaboration.collab_code)
        .bind(collaboration.kind)
        .bind(collaboration.brand_id)
        .bind(collaboration.partner_id)
        .bind(collaboration.partner_role)
        .bind(collaboration.requested_by)
        .bind(&collaboration.title)
        .bind(&collaboration.description)
        .bind(collaboration.start_date)
        .bind(collaboration.end_date)
        .bind(collaboration.status.as_str())
        .bind(offer.map(|o| o.amount))
        .bind(offer.map(|o| o.proposed_by))
        .bind(offer.map(|o| o.proposed_at))
        .fetch_one(executor)
        .await?;
        Ok(row.into())
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        collaboration_id: &str,
    ) -> Result<Option<Collaboration>, DbError> {
        let row = sqlx::query_as::<_, CollaborationRow>("SELECT * FROM collaboration WHERE id = $1")
            .bind(collaboration_id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Like [`Self::find_by_id`], but locks the row until the surrounding
    /// transaction ends.
    pub async fn find_by_id_for_update(
        executor: impl Executor<'_, Database = Postgres>,
        collaboration_id: &str,
    ) -> Result<Option<Collaboration>, DbError> {
        let row = sqlx::query_as::<_, CollaborationRow>(
            "SELECT * FROM collaboration WHERE id = $1 FOR UPDATE",
        )
        .bind(collaboration_id)
        .fetch_optional(executor)
        .await?;
        Ok(row.map(Into::into))
    }

    /// All collaborations the user takes part in, most recently touched first.
    pub async fn list_for_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Vec<Collaboration>, DbError> {
        let rows = sqlx::query_as::<_, CollaborationRow>(
            r"
            SELECT * FROM collaboration
            WHERE brand_id = $1 OR partner_id = $1
            ORDER BY updated_at DESC, id
            ",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Updates descriptive fields while the collaboration is still in the offer
    /// stage. Pass `None` for fields that should remain unchanged. Returns `None`
    /// when the row is missing or has left the offer stage.
    pub async fn update_details(
        executor: impl Executor<'_, Database = Postgres>,
        collaboration_id: &str,
        title: Option<String>,
        description: Option<String>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Collaboration>, DbError> {
        let row = sqlx::query_as::<_, CollaborationRow>(
            r"
            UPDATE collaboration
            SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                updated_at = now()
            WHERE id = $5 AND status = ANY($6)
            RETURNING *
            ",
        )
        .bind(title)
        .bind(description)
        .bind(start_date)
        .bind(end_date)
        .bind(collaboration_id)
        .bind(offer_stage_statuses())
        .fetch_optional(executor)
        .await?;
        Ok(row.map(Into::into))
    }

    /// Writes the workflow fields of `collaboration`, but only if the stored row
    /// still has the status and `updated_at` the caller read. Returns `None` when
    /// another request changed the row in between.
    pub async fn save_transition(
        executor: impl Executor<'_, Database = Postgres>,
        collaboration: &Collaboration,
        read_status: &CollaborationStatus,
        read_updated_at: DateTime<Utc>,
    ) -> Result<Option<Collaboration>, DbError> {
        let offer = collaboration.current_offer.as_ref();
        let row = sqlx::query_as::<_, CollaborationRow>(
            r"
            UPDATE collaboration
            SET
                status = $1,
                offer_amount = $2,
                offer_by = $3,
                offer_at = $4,
                final_amount = $5,
                work_status = $6,
                payment_status = $7,
                reason = $8,
                deliverable_url = $9,
                penalty_amount = $10,
                transaction_id = $11,
                updated_at = $12
            WHERE id = $13 AND status = $14 AND updated_at = $15
            RETURNING *
            ",
        )
        .bind(collaboration.status.as_str())
        .bind(offer.map(|o| o.amount))
        .bind(offer.map(|o| o.proposed_by))
        .bind(offer.map(|o| o.proposed_at))
        .bind(collaboration.final_amount)
        .bind(collaboration.work_status)
        .bind(collaboration.payment_status)
        .bind(&collaboration.reason)
        .bind(&collaboration.deliverable_url)
        .bind(collaboration.penalty_amount)
        .bind(&collaboration.transaction_id)
        .bind(collaboration.updated_at)
        .bind(&collaboration.id)
        .bind(read_status.as_str())
        .bind(read_updated_at)
        .fetch_optional(executor)
        .await?;
        Ok(row.map(Into::into))
    }

    /// Deletes a finished collaboration. Returns whether a row was removed.
    pub async fn delete_terminal(
        executor: impl Executor<'_, Database = Postgres>,
        collaboration_id: &str,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            "DELETE FROM collaboration WHERE id = $1 AND status IN ('completed', 'rejected')",
        )
        .bind(collaboration_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_guard_covers_exactly_the_offer_stage() {
        let statuses = offer_stage_statuses();
        assert_eq!(statuses.len(), 7);
        assert!(statuses.contains(&"brand_counter_offer".to_owned()));
        assert!(!statuses.contains(&"agreement_reached".to_owned()));
        assert!(!statuses.contains(&"in_progress".to_owned()));
    }
}
