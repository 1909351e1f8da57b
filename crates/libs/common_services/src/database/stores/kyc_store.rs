use crate::database::DbError;
use crate::database::kyc::{KycDocumentType, KycStatus, KycSubmission};
use sqlx::{Executor, Postgres};

pub struct KycStore;

impl KycStore {
    /// Inserts a submission, or replaces the user's earlier one and resets it to `pending`.
    pub async fn upsert(
        executor: impl Executor<'_, Database = Postgres>,
        submission_id: &str,
        user_id: i32,
        full_name: &str,
        document_type: KycDocumentType,
        document_number: &str,
        document_url: &str,
        selfie_url: &str,
    ) -> Result<KycSubmission, DbError> {
        Ok(sqlx::query_as::<_, KycSubmission>(
            r"
            INSERT INTO kyc_submission (
                id, user_id, full_name, document_type, document_number, document_url, selfie_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                document_type = EXCLUDED.document_type,
                document_number = EXCLUDED.document_number,
                document_url = EXCLUDED.document_url,
                selfie_url = EXCLUDED.selfie_url,
                status = 'pending',
                review_note = NULL,
                reviewed_at = NULL,
                updated_at = now()
            RETURNING *
            ",
        )
        .bind(submission_id)
        .bind(user_id)
        .bind(full_name)
        .bind(document_type)
        .bind(document_number)
        .bind(document_url)
        .bind(selfie_url)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        submission_id: &str,
    ) -> Result<Option<KycSubmission>, DbError> {
        Ok(
            sqlx::query_as::<_, KycSubmission>("SELECT * FROM kyc_submission WHERE id = $1")
                .bind(submission_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn find_by_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<KycSubmission>, DbError> {
        Ok(
            sqlx::query_as::<_, KycSubmission>("SELECT * FROM kyc_submission WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn list_by_status(
        executor: impl Executor<'_, Database = Postgres>,
        status: KycStatus,
    ) -> Result<Vec<KycSubmission>, DbError> {
        Ok(sqlx::query_as::<_, KycSubmission>(
            "SELECT * FROM kyc_submission WHERE status = $1 ORDER BY created_at, id",
        )
        .bind(status)
        .fetch_all(executor)
        .await?)
    }

    /// Records a review decision on a pending submission. Returns `None` when the
    /// submission does not exist or was already reviewed.
    pub async fn review(
        executor: impl Executor<'_, Database = Postgres>,
        submission_id: &str,
        status: KycStatus,
        review_note: Option<String>,
    ) -> Result<Option<KycSubmission>, DbError> {
        Ok(sqlx::query_as::<_, KycSubmission>(
            r"
            UPDATE kyc_submission
            SET status = $1, review_note = $2, reviewed_at = now(), updated_at = now()
            WHERE id = $3 AND status = 'pending'
            RETURNING *
            ",
        )
        .bind(status)
        .bind(review_note)
        .bind(submission_id)
        .fetch_optional(executor)
        .await?)
    }
}
