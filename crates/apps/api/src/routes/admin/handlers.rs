//! Platform admin endpoints: KYC review, dispute and refund decisions, payouts.

use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common_services::api::auth::error::AuthError;
use common_services::api::collaboration::error::CollaborationError;
use common_services::api::collaboration::interfaces::ResolveRefundRequest;
use common_services::api::collaboration::service::{resolve_refund, review_dispute};
use common_services::api::kyc::error::KycError;
use common_services::api::kyc::interfaces::ReviewKycRequest;
use common_services::api::kyc::service::{list_pending_kyc, review_kyc};
use common_services::api::payout::error::PayoutError;
use common_services::api::payout::interfaces::PartialPayoutRequest;
use common_services::api::payout::service::{complete_payout, record_partial_payout};
use common_services::database::app_user::User;
use common_services::database::kyc::KycSubmission;
use common_services::database::payout::Payout;
use common_services::database::user_store::UserStore;
use common_types::Collaboration;

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "All registered users.", body = Vec<User>),
        (status = 403, description = "Admin role required."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<User>>, AuthError> {
    Ok(Json(UserStore::list_users(&context.pool).await?))
}

#[utoipa::path(
    get,
    path = "/admin/kyc",
    tag = "Admin",
    responses(
        (status = 200, description = "KYC submissions waiting for review, oldest first.", body = Vec<KycSubmission>),
        (status = 403, description = "Admin role required."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_pending_kyc_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<KycSubmission>>, KycError> {
    Ok(Json(list_pending_kyc(&context.pool).await?))
}

/// Approve or reject a KYC submission. Rejections need a note.
#[utoipa::path(
    post,
    path = "/admin/kyc/{submission_id}/review",
    tag = "Admin",
    params(
        ("submission_id" = String, Path, description = "The unique ID of the KYC submission.")
    ),
    request_body = ReviewKycRequest,
    responses(
        (status = 200, description = "Decision recorded.", body = KycSubmission),
        (status = 400, description = "Rejection without a note."),
        (status = 404, description = "Submission not found."),
        (status = 409, description = "Submission was already reviewed."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn review_kyc_handler(
    State(context): State<ApiContext>,
    Path(submission_id): Path<String>,
    Json(payload): Json<ReviewKycRequest>,
) -> Result<Json<KycSubmission>, KycError> {
    Ok(Json(review_kyc(&context.pool, &submission_id, payload).await?))
}

/// Hand a disputed collaboration back to the brand for a decision.
#[utoipa::path(
    post,
    path = "/admin/collaborations/{collaboration_id}/review-dispute",
    tag = "Admin",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    responses(
        (status = 200, description = "Brand decision pending.", body = Collaboration),
        (status = 404, description = "Collaboration not found."),
        (status = 409, description = "The collaboration is not disputed."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn review_dispute_handler(
    State(context): State<ApiContext>,
    Path(collaboration_id): Path<String>,
) -> Result<Json<Collaboration>, CollaborationError> {
    Ok(Json(review_dispute(&context.pool, &collaboration_id).await?))
}

/// Approve (refund the brand) or deny (complete for the payee) a refund request.
#[utoipa::path(
    post,
    path = "/admin/collaborations/{collaboration_id}/resolve-refund",
    tag = "Admin",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    request_body = ResolveRefundRequest,
    responses(
        (status = 200, description = "Refund decision applied.", body = Collaboration),
        (status = 404, description = "Collaboration not found."),
        (status = 409, description = "No refund is pending review."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn resolve_refund_handler(
    State(context): State<ApiContext>,
    Path(collaboration_id): Path<String>,
    Json(payload): Json<ResolveRefundRequest>,
) -> Result<Json<Collaboration>, CollaborationError> {
    Ok(Json(
        resolve_refund(&context.pool, &collaboration_id, payload.approve).await?,
    ))
}

/// Record an advance already paid to the payee.
#[utoipa::path(
    post,
    path = "/admin/collaborations/{collaboration_id}/partial-payouts",
    tag = "Admin",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    request_body = PartialPayoutRequest,
    responses(
        (status = 201, description = "Partial payout recorded as paid.", body = Payout),
        (status = 400, description = "Amount is not positive or exceeds what remains."),
        (status = 409, description = "The collaboration holds no payment."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn record_partial_payout_handler(
    State(context): State<ApiContext>,
    Path(collaboration_id): Path<String>,
    Json(payload): Json<PartialPayoutRequest>,
) -> Result<(StatusCode, Json<Payout>), PayoutError> {
    let payout = record_partial_payout(&context.pool, &collaboration_id, payload.amount).await?;
    Ok((StatusCode::CREATED, Json(payout)))
}

/// Confirm a pending payout was sent.
#[utoipa::path(
    post,
    path = "/admin/payouts/{payout_id}/complete",
    tag = "Admin",
    params(
        ("payout_id" = String, Path, description = "The unique ID of the payout.")
    ),
    responses(
        (status = 200, description = "Payout marked as paid.", body = Payout),
        (status = 404, description = "Payout not found."),
        (status = 409, description = "Payout was already paid."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn complete_payout_handler(
    State(context): State<ApiContext>,
    Path(payout_id): Path<String>,
) -> Result<Json<Payout>, PayoutError> {
    Ok(Json(complete_payout(&context.pool, &payout_id).await?))
}
