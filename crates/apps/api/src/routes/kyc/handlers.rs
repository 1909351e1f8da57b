use crate::api_state::ApiContext;
use axum::extract::State;
use axum::{Extension, Json};
use common_services::api::kyc::error::KycError;
use common_services::api::kyc::interfaces::SubmitKycRequest;
use common_services::api::kyc::service::{get_own_kyc, submit_kyc};
use common_services::database::app_user::User;
use common_services::database::kyc::KycSubmission;

/// The current user's KYC submission, if any.
#[utoipa::path(
    get,
    path = "/kyc",
    tag = "KYC",
    responses(
        (status = 200, description = "The submission, or null when nothing was submitted.", body = Option<KycSubmission>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_kyc_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Option<KycSubmission>>, KycError> {
    Ok(Json(get_own_kyc(&context.pool, &user).await?))
}

/// Submit or resubmit KYC details. Resets the review to pending.
#[utoipa::path(
    post,
    path = "/kyc",
    tag = "KYC",
    request_body = SubmitKycRequest,
    responses(
        (status = 200, description = "Submission stored and waiting for review.", body = KycSubmission),
        (status = 400, description = "A required field is empty."),
        (status = 409, description = "KYC is already approved."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_kyc_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<SubmitKycRequest>,
) -> Result<Json<KycSubmission>, KycError> {
    Ok(Json(submit_kyc(&context.pool, &user, payload).await?))
}
