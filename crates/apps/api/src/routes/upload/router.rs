use crate::api_state::ApiContext;
use crate::upload::handlers::upload_handler;
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::post};

/// Room for the multipart boundaries and headers around the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn upload_protected_router(max_upload_bytes: usize) -> Router<ApiContext> {
    Router::new().route(
        "/uploads",
        post(upload_handler).layer(DefaultBodyLimit::max(
            max_upload_bytes + MULTIPART_OVERHEAD,
        )),
    )
}
