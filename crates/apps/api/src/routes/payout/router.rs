use crate::api_state::ApiContext;
use crate::payout::handlers::list_payouts_handler;
use axum::{Router, routing::get};

pub fn payout_protected_router() -> Router<ApiContext> {
    Router::new().route("/payouts", get(list_payouts_handler))
}
