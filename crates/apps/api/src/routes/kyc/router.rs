use crate::api_state::ApiContext;
use crate::kyc::handlers::{get_kyc_handler, submit_kyc_handler};
use axum::{Router, routing::get};

pub fn kyc_protected_router() -> Router<ApiContext> {
    Router::new().route("/kyc", get(get_kyc_handler).post(submit_kyc_handler))
}
