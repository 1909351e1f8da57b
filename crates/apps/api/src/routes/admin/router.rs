use crate::admin::handlers::{
    complete_payout_handler, list_pending_kyc_handler, list_users_handler,
    record_partial_payout_handler, resolve_refund_handler, review_dispute_handler,
    review_kyc_handler,
};
use crate::api_state::ApiContext;
use axum::{
    Router,
    routing::{get, post},
};

pub fn admin_router() -> Router<ApiContext> {
    Router::new()
        .route("/admin/users", get(list_users_handler))
        .route("/admin/kyc", get(list_pending_kyc_handler))
        .route("/admin/kyc/{submission_id}/review", post(review_kyc_handler))
        .route(
            "/admin/collaborations/{collaboration_id}/review-dispute",
            post(review_dispute_handler),
        )
        .route(
            "/admin/collaborations/{collaboration_id}/resolve-refund",
            post(resolve_refund_handler),
        )
        .route(
            "/admin/collaborations/{collaboration_id}/partial-payouts",
            post(record_partial_payout_handler),
        )
        .route(
            "/admin/payouts/{payout_id}/complete",
            post(complete_payout_handler),
        )
}
