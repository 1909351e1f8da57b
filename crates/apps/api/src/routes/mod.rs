pub mod admin;
mod api_doc;
pub mod auth;
pub mod collaboration;
pub mod kyc;
pub mod payout;
pub mod root;
pub mod upload;

use crate::admin::router::admin_router;
use crate::api_state::ApiContext;
use crate::auth::middlewares::require_role::require_role;
use crate::auth::middlewares::user::ApiUser;
use crate::auth::router::{auth_protected_router, auth_public_router};
use crate::collaboration::router::collaboration_protected_router;
use crate::kyc::router::kyc_protected_router;
use crate::payout::router::payout_protected_router;
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use crate::upload::router::upload_protected_router;
use app_state::RateLimitingSettings;
use axum::Router;
use axum::middleware::{from_extractor_with_state, from_fn_with_state};
use color_eyre::Result;
use common_services::database::app_user::UserRole;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Result<Router> {
    Ok(Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(public_routes(&api_state.settings.api.rate_limiting)?)
        .merge(protected_routes(api_state.clone()))
        .merge(admin_routes(api_state.clone()))
        .with_state(api_state))
}

fn public_routes(rate_limiting: &RateLimitingSettings) -> Result<Router<ApiContext>> {
    Ok(Router::new()
        .merge(auth_public_router(rate_limiting)?)
        .merge(root_public_router()))
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    let max_upload_bytes = api_state.settings.uploads.max_bytes;
    Router::new()
        .merge(auth_protected_router())
        .merge(collaboration_protected_router())
        .merge(payout_protected_router())
        .merge(kyc_protected_router())
        .merge(upload_protected_router(max_upload_bytes))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}

fn admin_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(admin_router())
        .route_layer(from_fn_with_state(UserRole::Admin, require_role))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
