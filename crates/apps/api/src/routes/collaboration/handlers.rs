use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::collaboration::error::CollaborationError;
use common_services::api::collaboration::interfaces::{
    ActionRequest, CancelRequest, CollaborationView, CreateCollaborationRequest,
    ListCollaborationsParams, RecordPaymentRequest, UpdateCollaborationRequest,
};
use common_services::api::collaboration::service::{
    cancel_collaboration, create_collaboration, delete_collaboration, get_collaboration,
    list_collaborations, list_tabs, perform_action, record_payment, update_collaboration,
};
use common_services::database::app_user::User;
use common_types::BucketedCollaborations;

/// List the current user's collaborations, newest activity first.
#[utoipa::path(
    get,
    path = "/collaborations",
    tag = "Collaboration",
    params(ListCollaborationsParams),
    responses(
        (status = 200, description = "Collaborations the user takes part in.", body = Vec<CollaborationView>),
        (status = 500, description = "A database or internal error occurred."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_collaborations_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Query(params): Query<ListCollaborationsParams>,
) -> Result<Json<Vec<CollaborationView>>, CollaborationError> {
    let views = list_collaborations(
        &context.pool,
        &user,
        params.bucket,
        context.settings.marketplace.cancellation_penalty,
    )
    .await?;
    Ok(Json(views))
}

/// The user's collaborations grouped into the pending, in progress and archived tabs.
#[utoipa::path(
    get,
    path = "/collaborations/tabs",
    tag = "Collaboration",
    responses(
        (status = 200, description = "Collaborations per tab.", body = BucketedCollaborations<CollaborationView>),
        (status = 500, description = "A database or internal error occurred."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_tabs_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<BucketedCollaborations<CollaborationView>>, CollaborationError> {
    let tabs = list_tabs(
        &context.pool,
        &user,
        context.settings.marketplace.cancellation_penalty,
    )
    .await?;
    Ok(Json(tabs))
}

/// Open a new collaboration with another user.
///
/// The starting status depends on the kind and on the creator's role.
#[utoipa::path(
    post,
    path = "/collaborations",
    tag = "Collaboration",
    request_body = CreateCollaborationRequest,
    responses(
        (status = 201, description = "Collaboration created.", body = CollaborationView),
        (status = 400, description = "The creator cannot open this kind, or the dates or amount are invalid."),
        (status = 404, description = "Counterparty not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_collaboration_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateCollaborationRequest>,
) -> Result<(StatusCode, Json<CollaborationView>), CollaborationError> {
    let view = create_collaboration(
        &context.pool,
        &user,
        payload,
        context.settings.marketplace.cancellation_penalty,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/collaborations/{collaboration_id}",
    tag = "Collaboration",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    responses(
        (status = 200, description = "The collaboration with the actions available to the caller.", body = CollaborationView),
        (status = 404, description = "Collaboration not found or not visible to the user."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_collaboration_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(collaboration_id): Path<String>,
) -> Result<Json<CollaborationView>, CollaborationError> {
    let view = get_collaboration(
        &context.pool,
        &user,
        &collaboration_id,
        context.settings.marketplace.cancellation_penalty,
    )
    .await?;
    Ok(Json(view))
}

/// Edit the title, description or dates while the terms are still being negotiated.
#[utoipa::path(
    patch,
    path = "/collaborations/{collaboration_id}",
    tag = "Collaboration",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    request_body = UpdateCollaborationRequest,
    responses(
        (status = 200, description = "Collaboration updated.", body = CollaborationView),
        (status = 404, description = "Collaboration not found or not visible to the user."),
        (status = 409, description = "The collaboration is past the negotiation stage."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_collaboration_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(collaboration_id): Path<String>,
    Json(payload): Json<UpdateCollaborationRequest>,
) -> Result<Json<CollaborationView>, CollaborationError> {
    let view = update_collaboration(
        &context.pool,
        &user,
        &collaboration_id,
        payload,
        context.settings.marketplace.cancellation_penalty,
    )
    .await?;
    Ok(Json(view))
}

/// Delete a completed or rejected collaboration.
#[utoipa::path(
    delete,
    path = "/collaborations/{collaboration_id}",
    tag = "Collaboration",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    responses(
        (status = 204, description = "Collaboration deleted."),
        (status = 404, description = "Collaboration not found or not visible to the user."),
        (status = 409, description = "Only completed or rejected collaborations can be deleted."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_collaboration_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(collaboration_id): Path<String>,
) -> Result<StatusCode, CollaborationError> {
    delete_collaboration(&context.pool, &user, &collaboration_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Take a negotiation or work step: accept, counter, reject, start or complete work,
/// mark complete, dispute, approve release or request a refund.
#[utoipa::path(
    post,
    path = "/collaborations/{collaboration_id}/actions",
    tag = "Collaboration",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    request_body = ActionRequest,
    responses(
        (status = 200, description = "Action applied.", body = CollaborationView),
        (status = 400, description = "Missing or invalid amount or reason."),
        (status = 409, description = "The action is not available in the current status, or the record changed concurrently."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn perform_action_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(collaboration_id): Path<String>,
    Json(payload): Json<ActionRequest>,
) -> Result<Json<CollaborationView>, CollaborationError> {
    let view = perform_action(
        &context.pool,
        &user,
        &collaboration_id,
        payload,
        context.settings.marketplace.cancellation_penalty,
    )
    .await?;
    Ok(Json(view))
}

/// Cancel with a reason. When a penalty applies it must be acknowledged.
#[utoipa::path(
    post,
    path = "/collaborations/{collaboration_id}/cancel",
    tag = "Collaboration",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    request_body = CancelRequest,
    responses(
        (status = 200, description = "Collaboration cancelled.", body = CollaborationView),
        (status = 400, description = "Empty reason or unacknowledged penalty."),
        (status = 409, description = "Cancelling is not possible in the current status."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_collaboration_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(collaboration_id): Path<String>,
    Json(payload): Json<CancelRequest>,
) -> Result<Json<CollaborationView>, CollaborationError> {
    let view = cancel_collaboration(
        &context.pool,
        &user,
        &collaboration_id,
        payload,
        context.settings.marketplace.cancellation_penalty,
    )
    .await?;
    Ok(Json(view))
}

/// Record the payer's payment of the agreed amount.
#[utoipa::path(
    post,
    path = "/collaborations/{collaboration_id}/payment",
    tag = "Collaboration",
    params(
        ("collaboration_id" = String, Path, description = "The unique ID of the collaboration.")
    ),
    request_body = RecordPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded, work can start.", body = CollaborationView),
        (status = 400, description = "The amount does not match the agreed amount."),
        (status = 409, description = "No agreement is waiting for payment."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn record_payment_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(collaboration_id): Path<String>,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<Json<CollaborationView>, CollaborationError> {
    let view = record_payment(
        &context.pool,
        &user,
        &collaboration_id,
        payload,
        context.settings.marketplace.cancellation_penalty,
    )
    .await?;
    Ok(Json(view))
}
