use crate::api_state::ApiContext;
use crate::collaboration::handlers::{
    cancel_collaboration_handler, create_collaboration_handler, delete_collaboration_handler,
    get_collaboration_handler, list_collaborations_handler, list_tabs_handler,
    perform_action_handler, record_payment_handler, update_collaboration_handler,
};
use crate::payout::handlers::{payout_preview_handler, request_payout_handler};
use axum::{
    Router,
    routing::{get, post},
};

pub fn collaboration_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/collaborations",
            get(list_collaborations_handler).post(create_collaboration_handler),
        )
        .route("/collaborations/tabs", get(list_tabs_handler))
        .route(
            "/collaborations/{collaboration_id}",
            get(get_collaboration_handler)
                .patch(update_collaboration_handler)
                .delete(delete_collaboration_handler),
        )
        .route(
            "/collaborations/{collaboration_id}/actions",
            post(perform_action_handler),
        )
        .route(
            "/collaborations/{collaboration_id}/cancel",
            post(cancel_collaboration_handler),
        )
        .route(
            "/collaborations/{collaboration_id}/payment",
            post(record_payment_handler),
        )
        .route(
            "/collaborations/{collaboration_id}/payout-preview",
            get(payout_preview_handler),
        )
        .route(
            "/collaborations/{collaboration_id}/payout",
            post(request_payout_handler),
        )
}
