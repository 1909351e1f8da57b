use crate::routes::{admin, auth, collaboration, kyc, payout, root, upload};
use common_types::{Action, StatusBucket};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Auth handlers
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::get_me,
        // Collaboration handlers
        collaboration::handlers::list_collaborations_handler,
        collaboration::handlers::list_tabs_handler,
        collaboration::handlers::create_collaboration_handler,
        collaboration::handlers::get_collaboration_handler,
        collaboration::handlers::update_collaboration_handler,
        collaboration::handlers::delete_collaboration_handler,
        collaboration::handlers::perform_action_handler,
        collaboration::handlers::cancel_collaboration_handler,
        collaboration::handlers::record_payment_handler,
        // Payout handlers
        payout::handlers::payout_preview_handler,
        payout::handlers::request_payout_handler,
        payout::handlers::list_payouts_handler,
        // KYC handlers
        kyc::handlers::get_kyc_handler,
        kyc::handlers::submit_kyc_handler,
        // Upload handlers
        upload::handlers::upload_handler,
        // Admin handlers
        admin::handlers::list_users_handler,
        admin::handlers::list_pending_kyc_handler,
        admin::handlers::review_kyc_handler,
        admin::handlers::review_dispute_handler,
        admin::handlers::resolve_refund_handler,
        admin::handlers::record_partial_payout_handler,
        admin::handlers::complete_payout_handler,
    ),
    components(
        schemas(
            Action,
            StatusBucket,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Collaboration", description = "Negotiating, running and closing collaborations"),
        (name = "Payout", description = "Fee breakdowns and payout requests"),
        (name = "KYC", description = "Identity verification required for payouts"),
        (name = "Upload", description = "Document and deliverable uploads"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Admin", description = "Platform administration"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
