use crate::api::collaboration::error::CollaborationError;
use crate::api::collaboration::interfaces::{
    ActionRequest, CancelRequest, CollaborationView, CreateCollaborationRequest,
    RecordPaymentRequest, UpdateCollaborationRequest,
};
use crate::database::app_user::User;
use crate::database::collaboration_store::CollaborationStore;
use crate::database::user_store::UserStore;
use crate::utils::{collab_code, nice_id};
use app_state::constants;
use chrono::{DateTime, Utc};
use common_types::{
    Action, ActorRole, BucketedCollaborations, CancellationDraft, Collaboration, OpeningRequest,
    Participant, StatusBucket, TransitionError,
};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use tracing::{info, instrument};

/// Wraps a collaboration with what `viewer` may do with it right now.
#[must_use]
pub fn to_view(
    collaboration: Collaboration,
    viewer: ActorRole,
    cancellation_penalty: Decimal,
    now: DateTime<Utc>,
) -> CollaborationView {
    let permitted_actions = collaboration.permitted_actions(viewer, now);
    let cancellation_penalty = if permitted_actions.contains(&Action::Cancel) {
        CancellationDraft::penalty_notice(cancellation_penalty)
    } else {
        None
    };
    CollaborationView {
        bucket: StatusBucket::of(&collaboration.status),
        viewer_role: viewer,
        permitted_actions,
        cancellation_penalty,
        collaboration,
    }
}

/// Loads a collaboration the user takes part in. Other users get a 404.
pub(crate) async fn load_as_participant(
    executor: impl Executor<'_, Database = Postgres>,
    user: &User,
    collaboration_id: &str,
) -> Result<(Collaboration, ActorRole), CollaborationError> {
    let collaboration = CollaborationStore::find_by_id(executor, collaboration_id)
        .await?
        .ok_or_else(|| CollaborationError::NotFound(collaboration_id.to_owned()))?;
    let role = collaboration
        .role_of(user.id)
        .ok_or_else(|| CollaborationError::NotFound(collaboration_id.to_owned()))?;
    Ok((collaboration, role))
}

async fn load_any(
    executor: impl Executor<'_, Database = Postgres>,
    collaboration_id: &str,
) -> Result<Collaboration, CollaborationError> {
    CollaborationStore::find_by_id(executor, collaboration_id)
        .await?
        .ok_or_else(|| CollaborationError::NotFound(collaboration_id.to_owned()))
}

/// Persists a transition applied to `updated`, which was read as `original`.
pub(crate) async fn persist(
    executor: impl Executor<'_, Database = Postgres>,
    original: &Collaboration,
    updated: &Collaboration,
) -> Result<Collaboration, CollaborationError> {
    CollaborationStore::save_transition(executor, updated, &original.status, original.updated_at)
        .await?
        .ok_or_else(|| {
            CollaborationError::Conflict(format!(
                "collaboration {} was changed by another request, reload and try again",
                original.id
            ))
        })
}

#[instrument(skip(pool, user), fields(user_id = user.id))]
pub async fn list_collaborations(
    pool: &PgPool,
    user: &User,
    bucket: Option<StatusBucket>,
    cancellation_penalty: Decimal,
) -> Result<Vec<CollaborationView>, CollaborationError> {
    let now = Utc::now();
    let collaborations = CollaborationStore::list_for_user(pool, user.id).await?;
    Ok(collaborations
        .into_iter()
        .filter_map(|c| {
            let role = c.role_of(user.id)?;
            Some(to_view(c, role, cancellation_penalty, now))
        })
        .filter(|view| bucket.is_none_or(|b| view.bucket == b))
        .collect())
}

/// The user's collaborations grouped into list tabs.
#[instrument(skip(pool, user), fields(user_id = user.id))]
pub async fn list_tabs(
    pool: &PgPool,
    user: &User,
    cancellation_penalty: Decimal,
) -> Result<BucketedCollaborations<CollaborationView>, CollaborationError> {
    let views = list_collaborations(pool, user, None, cancellation_penalty).await?;
    let mut tabs = BucketedCollaborations::default();
    for view in views {
        tabs.push(view.bucket, view);
    }
    Ok(tabs)
}

#[instrument(skip(pool, user), fields(user_id = user.id))]
pub async fn get_collaboration(
    pool: &PgPool,
    user: &User,
    collaboration_id: &str,
    cancellation_penalty: Decimal,
) -> Result<CollaborationView, CollaborationError> {
    let (collaboration, role) = load_as_participant(pool, user, collaboration_id).await?;
    Ok(to_view(collaboration, role, cancellation_penalty, Utc::now()))
}

#[instrument(skip(pool, user, request), fields(user_id = user.id, kind = %request.kind))]
pub async fn create_collaboration(
    pool: &PgPool,
    user: &User,
    request: CreateCollaborationRequest,
    cancellation_penalty: Decimal,
) -> Result<CollaborationView, CollaborationError> {
    if request.title.trim().is_empty() {
        return Err(CollaborationError::BadRequest("title is required".into()));
    }
    let counterparty = UserStore::find_by_id(pool, request.counterparty_id)
        .await?
        .ok_or_else(|| {
            CollaborationError::NotFound(format!("user {}", request.counterparty_id))
        })?;

    let now = Utc::now();
    let db = &constants().database;
    let opening = OpeningRequest {
        kind: request.kind,
        creator: Participant {
            user_id: user.id,
            role: user.marketplace_role,
        },
        counterparty: Participant {
            user_id: counterparty.id,
            role: counterparty.marketplace_role,
        },
        title: request.title.trim().to_owned(),
        description: request.description,
        start_date: request.start_date,
        end_date: request.end_date,
        amount: request.amount,
    };
    let collaboration = Collaboration::open(
        nice_id(db.record_id_length),
        Some(collab_code(request.kind.code_prefix(), db.collab_code_length)),
        opening,
        now,
    )?;

    let created = CollaborationStore::create(pool, &collaboration).await?;
    info!(
        collaboration_id = %created.id,
        status = %created.status,
        "Collaboration opened"
    );
    Ok(to_view(created, user.marketplace_role, cancellation_penalty, now))
}

/// Edits descriptive fields. Only allowed while the terms are still being negotiated.
#[instrument(skip(pool, user, request), fields(user_id = user.id))]
pub async fn update_collaboration(
    pool: &PgPool,
    user: &User,
    collaboration_id: &str,
    request: UpdateCollaborationRequest,
    cancellation_penalty: Decimal,
) -> Result<CollaborationView, CollaborationError> {
    let (collaboration, role) = load_as_participant(pool, user, collaboration_id).await?;
    if !collaboration.status.is_offer_stage() {
        return Err(CollaborationError::Conflict(format!(
            "collaboration can no longer be edited while it is {}",
            collaboration.status
        )));
    }
    if request.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(CollaborationError::BadRequest("title cannot be empty".into()));
    }
    let start = request.start_date.or(collaboration.start_date);
    let end = request.end_date.or(collaboration.end_date);
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(TransitionError::InvalidSchedule.into());
        }
    }

    let updated = CollaborationStore::update_details(
        pool,
        collaboration_id,
        request.title.map(|t| t.trim().to_owned()),
        request.description,
        request.start_date,
        request.end_date,
    )
    .await?
    .ok_or_else(|| {
        CollaborationError::Conflict(format!(
            "collaboration {collaboration_id} left the offer stage before the edit was applied"
        ))
    })?;
    Ok(to_view(updated, role, cancellation_penalty, Utc::now()))
}

/// Removes a completed or rejected collaboration from the user's history.
#[instrument(skip(pool, user), fields(user_id = user.id))]
pub async fn delete_collaboration(
    pool: &PgPool,
    user: &User,
    collaboration_id: &str,
) -> Result<(), CollaborationError> {
    let (collaboration, role) = load_as_participant(pool, user, collaboration_id).await?;
    if !collaboration.is_deletable() {
        return Err(TransitionError::NotPermitted {
            action: Action::Delete,
            role,
            status: collaboration.status,
        }
        .into());
    }
    if !CollaborationStore::delete_terminal(pool, collaboration_id).await? {
        return Err(CollaborationError::Conflict(format!(
            "collaboration {collaboration_id} changed before it could be deleted"
        )));
    }
    info!(collaboration_id, "Collaboration deleted");
    Ok(())
}

/// Applies one negotiation or work step for the acting participant.
#[instrument(skip(pool, user, request), fields(user_id = user.id, action = %request.action))]
pub async fn perform_action(
    pool: &PgPool,
    user: &User,
    collaboration_id: &str,
    request: ActionRequest,
    cancellation_penalty: Decimal,
) -> Result<CollaborationView, CollaborationError> {
    let (original, role) = load_as_participant(pool, user, collaboration_id).await?;
    let now = Utc::now();
    let mut updated = original.clone();
    let reason = request.reason.as_deref().unwrap_or_default();

    match request.action {
        Action::Accept => updated.accept_offer(role, now)?,
        Action::Counter => {
            let amount = request.amount.ok_or_else(|| {
                CollaborationError::BadRequest("an amount is required to counter".into())
            })?;
            updated.counter_offer(role, amount, now)?;
        }
        Action::Reject => updated.reject(role, reason, now)?,
        Action::StartWork => updated.start_work(role, now)?,
        Action::CompleteWork => updated.complete_work(role, request.deliverable_url, now)?,
        Action::MarkComplete => updated.mark_complete(role, now)?,
        Action::Dispute => updated.dispute(role, reason, now)?,
        Action::ApproveRelease => updated.approve_release(role, now)?,
        Action::RequestRefund => updated.request_refund(role, request.reason.as_deref(), now)?,
        Action::Cancel => {
            return Err(CollaborationError::BadRequest(
                "cancellations go through the cancel endpoint".into(),
            ));
        }
        Action::PayNow => {
            return Err(CollaborationError::BadRequest(
                "payments go through the payment endpoint".into(),
            ));
        }
        Action::RequestPayout => {
            return Err(CollaborationError::BadRequest(
                "payouts go through the payout endpoint".into(),
            ));
        }
        Action::Delete => {
            return Err(CollaborationError::BadRequest(
                "use DELETE on the collaboration".into(),
            ));
        }
        action @ (Action::Message | Action::AwaitPayment) => {
            return Err(CollaborationError::BadRequest(format!(
                "'{action}' does not change the collaboration"
            )));
        }
    }

    let saved = persist(pool, &original, &updated).await?;
    info!(
        collaboration_id,
        from = %original.status,
        to = %saved.status,
        "Collaboration transition"
    );
    Ok(to_view(saved, role, cancellation_penalty, now))
}

/// Cancels a collaboration. A configured penalty must be acknowledged first.
#[instrument(skip(pool, user, request), fields(user_id = user.id))]
pub async fn cancel_collaboration(
    pool: &PgPool,
    user: &User,
    collaboration_id: &str,
    request: CancelRequest,
    cancellation_penalty: Decimal,
) -> Result<CollaborationView, CollaborationError> {
    let (original, role) = load_as_participant(pool, user, collaboration_id).await?;
    let now = Utc::now();
    if !original.permitted_actions(role, now).contains(&Action::Cancel) {
        return Err(TransitionError::NotPermitted {
            action: Action::Cancel,
            role,
            status: original.status,
        }
        .into());
    }

    let ticket = CancellationDraft::validate(
        &request.reason,
        cancellation_penalty,
        request.acknowledge_penalty,
    )?;
    let mut updated = original.clone();
    updated.cancel(role, ticket, now)?;

    let saved = persist(pool, &original, &updated).await?;
    info!(collaboration_id, penalty = ?saved.penalty_amount, "Collaboration cancelled");
    Ok(to_view(saved, role, cancellation_penalty, now))
}

/// Records the payer's payment once the gateway confirmed it.
#[instrument(skip(pool, user, request), fields(user_id = user.id))]
pub async fn record_payment(
    pool: &PgPool,
    user: &User,
    collaboration_id: &str,
    request: RecordPaymentRequest,
    cancellation_penalty: Decimal,
) -> Result<CollaborationView, CollaborationError> {
    let transaction_id = request.transaction_id.trim();
    if transaction_id.is_empty() {
        return Err(CollaborationError::BadRequest(
            "transactionId is required".into(),
        ));
    }
    let (original, role) = load_as_participant(pool, user, collaboration_id).await?;
    let now = Utc::now();
    let mut updated = original.clone();
    updated.record_payment(role, request.amount, transaction_id, now)?;

    let saved = persist(pool, &original, &updated).await?;
    info!(collaboration_id, transaction_id, "Payment recorded");
    Ok(to_view(saved, role, cancellation_penalty, now))
}

/// Admin: hands a disputed collaboration back to the brand for a decision.
#[instrument(skip(pool))]
pub async fn review_dispute(
    pool: &PgPool,
    collaboration_id: &str,
) -> Result<Collaboration, CollaborationError> {
    let original = load_any(pool, collaboration_id).await?;
    let mut updated = original.clone();
    updated.review_dispute(Utc::now())?;
    persist(pool, &original, &updated).await
}

/// Admin: approves or denies a refund request.
#[instrument(skip(pool))]
pub async fn resolve_refund(
    pool: &PgPool,
    collaboration_id: &str,
    approve: bool,
) -> Result<Collaboration, CollaborationError> {
    let original = load_any(pool, collaboration_id).await?;
    let mut updated = original.clone();
    updated.resolve_refund(approve, Utc::now())?;
    let saved = persist(pool, &original, &updated).await?;
    info!(collaboration_id, approve, "Refund resolved");
    Ok(saved)
}
