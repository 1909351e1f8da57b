use crate::api_state::ApiContext;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::payout::error::PayoutError;
use common_services::api::payout::service::{list_payouts, preview_payout, request_payout};
use common_services::database::app_user::User;
use common_services::database::payout::Payout;
use common_types::PayoutBreakdown;

/// Fee breakdown the payee would receive for a completed collaboration.
#[utoipa::path(
    get,
    path = "/collaborations/{collaboration_id}/payout-preview",
    tag = "Payout",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    responses(
        (status = 200, description = "Commission, processing charge, GST, prior payouts and net amount.", body = PayoutBreakdown),
        (status = 403, description = "Only the payee can preview a payout."),
        (status = 409, description = "The collaboration is not completed."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn payout_preview_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(collaboration_id): Path<String>,
) -> Result<Json<PayoutBreakdown>, PayoutError> {
    let breakdown = preview_payout(
        &context.pool,
        &user,
        &collaboration_id,
        &context.settings.marketplace.fees,
    )
    .await?;
    Ok(Json(breakdown))
}

/// Request the final payout of a completed, paid collaboration.
///
/// Requires approved KYC and a positive net amount.
#[utoipa::path(
    post,
    path = "/collaborations/{collaboration_id}/payout",
    tag = "Payout",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    responses(
        (status = 201, description = "Payout requested.", body = Payout),
        (status = 400, description = "Nothing left to pay out."),
        (status = 403, description = "Not the payee, or KYC is not approved."),
        (status = 409, description = "The collaboration is not completed and paid, or a payout was already requested."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn request_payout_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(collaboration_id): Path<String>,
) -> Result<(StatusCode, Json<Payout>), PayoutError> {
    let payout = request_payout(
        &context.pool,
        &user,
        &collaboration_id,
        &context.settings.marketplace.fees,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(payout)))
}

/// Payouts made or requested for the current user.
#[utoipa::path(
    get,
    path = "/payouts",
    tag = "Payout",
    responses(
        (status = 200, description = "The user's payouts, newest first.", body = Vec<Payout>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_payouts_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Payout>>, PayoutError> {
    Ok(Json(list_payouts(&context.pool, &user).await?))
}
