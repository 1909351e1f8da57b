use crate::api::kyc::error::KycError;
use crate::api::kyc::interfaces::{ReviewKycRequest, SubmitKycRequest};
use crate::database::app_user::User;
use crate::database::kyc::{KycStatus, KycSubmission};
use crate::database::kyc_store::KycStore;
use crate::utils::nice_id;
use app_state::constants;
use sqlx::PgPool;
use tracing::{info, instrument};

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, KycError> {
    let value = value.trim();
    if value.is_empty() {
        Err(KycError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// Submits KYC details, replacing an earlier pending or rejected submission.
#[instrument(skip(pool, user, request), fields(user_id = user.id))]
pub async fn submit_kyc(
    pool: &PgPool,
    user: &User,
    request: SubmitKycRequest,
) -> Result<KycSubmission, KycError> {
    let full_name = required(&request.full_name, "fullName")?;
    let document_number = required(&request.document_number, "documentNumber")?;
    let document_url = required(&request.document_url, "documentUrl")?;
    let selfie_url = required(&request.selfie_url, "selfieUrl")?;

    if let Some(existing) = KycStore::find_by_user(pool, user.id).await? {
        if existing.status == KycStatus::Approved {
            return Err(KycError::AlreadyApproved);
        }
    }

    let submission = KycStore::upsert(
        pool,
        &nice_id(constants().database.record_id_length),
        user.id,
        full_name,
        request.document_type,
        document_number,
        document_url,
        selfie_url,
    )
    .await?;
    info!(submission_id = %submission.id, "KYC submitted");
    Ok(submission)
}

#[instrument(skip(pool, user), fields(user_id = user.id))]
pub async fn get_own_kyc(pool: &PgPool, user: &User) -> Result<Option<KycSubmission>, KycError> {
    Ok(KycStore::find_by_user(pool, user.id).await?)
}

#[instrument(skip(pool))]
pub async fn list_pending_kyc(pool: &PgPool) -> Result<Vec<KycSubmission>, KycError> {
    Ok(KycStore::list_by_status(pool, KycStatus::Pending).await?)
}

/// Admin decision on a pending submission.
#[instrument(skip(pool, request), fields(approve = request.approve))]
pub async fn review_kyc(
    pool: &PgPool,
    submission_id: &str,
    request: ReviewKycRequest,
) -> Result<KycSubmission, KycError> {
    let note = request
        .note
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty());
    if !request.approve && note.is_none() {
        return Err(KycError::MissingNote);
    }
    let status = if request.approve {
        KycStatus::Approved
    } else {
        KycStatus::Rejected
    };

    let Some(reviewed) = KycStore::review(pool, submission_id, status, note).await? else {
        return match KycStore::find_by_id(pool, submission_id).await? {
            Some(_) => Err(KycError::AlreadyReviewed(submission_id.to_owned())),
            None => Err(KycError::NotFound(submission_id.to_owned())),
        };
    };
    info!(submission_id, ?status, "KYC reviewed");
    Ok(reviewed)
}
