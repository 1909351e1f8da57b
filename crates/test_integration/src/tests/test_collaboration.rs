use crate::runner::context::test_context::TestContext;
use crate::test_constants::{ADMIN_EMAIL, BRAND_EMAIL, INFLUENCER_EMAIL};
use crate::test_helpers::{act, act_ok, get_collaboration, login, me, open_direct_offer};
use color_eyre::Result;
use common_services::api::collaboration::interfaces::CollaborationView;
use common_types::{
    Action, ActorRole, Collaboration, CollaborationStatus, PaymentStatus, StatusBucket, WorkStatus,
};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};

pub async fn test_negotiation_flow(context: &TestContext) -> Result<()> {
    // ARRANGE
    let brand_token = login(context, BRAND_EMAIL).await?;
    let influencer_token = login(context, INFLUENCER_EMAIL).await?;
    let influencer = me(context, &influencer_token).await?;

    // ACT: brand opens with 10000
    let opened =
        open_direct_offer(context, &brand_token, influencer.id, "Summer launch", 10_000).await?;
    let id = opened.collaboration.id.clone();

    // ASSERT
    assert_eq!(opened.collaboration.status, CollaborationStatus::BrandOffer);
    assert_eq!(opened.bucket, StatusBucket::Pending);
    assert_eq!(opened.viewer_role, ActorRole::Brand);
    assert!(opened.collaboration.collab_code.is_some());
    assert!(!opened.permitted_actions.contains(&Action::Accept));

    let own_counter = act(
        context,
        &brand_token,
        &id,
        json!({ "action": "counter", "amount": "9000" }),
    )
    .await?;
    assert_eq!(own_counter.status(), StatusCode::CONFLICT);

    // ACT: influencer counters with 12000
    let seen_by_influencer: CollaborationView =
        get_collaboration(context, &influencer_token, &id).await?.json().await?;
    let countered = act_ok(
        context,
        &influencer_token,
        &id,
        json!({ "action": "counter", "amount": "12000" }),
    )
    .await?;

    // ASSERT
    assert!(seen_by_influencer.permitted_actions.contains(&Action::Accept));
    assert!(seen_by_influencer.permitted_actions.contains(&Action::Counter));
    assert_eq!(
        countered.collaboration.status,
        CollaborationStatus::InfluencerCounterOffer
    );
    let offer = countered.collaboration.current_offer.clone();
    assert_eq!(offer.map(|o| o.amount), Some(Decimal::from(12_000)));

    // ACT: brand accepts
    let agreed = act_ok(context, &brand_token, &id, json!({ "action": "accept" })).await?;

    // ASSERT
    assert_eq!(agreed.collaboration.status, CollaborationStatus::AgreementReached);
    assert_eq!(agreed.collaboration.final_amount, Some(Decimal::from(12_000)));
    assert_eq!(agreed.collaboration.current_offer, None);
    assert_eq!(agreed.bucket, StatusBucket::InProgress);
    assert!(agreed.permitted_actions.contains(&Action::PayNow));

    let late_edit = context
        .http_client
        .patch(context.url(&format!("/collaborations/{id}")))
        .bearer_auth(&brand_token)
        .json(&json!({ "title": "Too late" }))
        .send()
        .await?;
    assert_eq!(late_edit.status(), StatusCode::CONFLICT);

    // ACT: payment
    let payment_url = context.url(&format!("/collaborations/{id}/payment"));
    let short_payment = context
        .http_client
        .post(&payment_url)
        .bearer_auth(&brand_token)
        .json(&json!({ "amount": "10000", "transactionId": "txn-short" }))
        .send()
        .await?;
    let payment = context
        .http_client
        .post(&payment_url)
        .bearer_auth(&brand_token)
        .json(&json!({ "amount": "12000", "transactionId": "txn-001" }))
        .send()
        .await?;
    let payment_status = payment.status();
    let paid: CollaborationView = payment.json().await?;

    // ASSERT
    assert_eq!(short_payment.status(), StatusCode::BAD_REQUEST);
    assert_eq!(payment_status, StatusCode::OK);
    assert_eq!(paid.collaboration.status, CollaborationStatus::InProgress);
    assert_eq!(paid.collaboration.payment_status, Some(PaymentStatus::Paid));
    assert_eq!(paid.collaboration.transaction_id.as_deref(), Some("txn-001"));

    // ACT: work
    let started = act_ok(context, &influencer_token, &id, json!({ "action": "startWork" })).await?;
    let submitted = act_ok(
        context,
        &influencer_token,
        &id,
        json!({ "action": "completeWork", "deliverableUrl": "https://example.com/reel" }),
    )
    .await?;
    let completed = act_ok(context, &brand_token, &id, json!({ "action": "markComplete" })).await?;

    // ASSERT
    assert_eq!(started.collaboration.work_status, Some(WorkStatus::Started));
    assert!(!started.permitted_actions.contains(&Action::Cancel));
    assert_eq!(submitted.collaboration.status, CollaborationStatus::WorkSubmitted);
    assert_eq!(
        submitted.collaboration.deliverable_url.as_deref(),
        Some("https://example.com/reel")
    );
    assert_eq!(completed.collaboration.status, CollaborationStatus::Completed);
    assert_eq!(completed.bucket, StatusBucket::Archived);

    let tabs: Value = context
        .http_client
        .get(context.url("/collaborations/tabs"))
        .bearer_auth(&influencer_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let archived = tabs["archived"].as_array().cloned().unwrap_or_default();
    assert!(archived.iter().any(|c| c["id"] == json!(id)));

    Ok(())
}

pub async fn test_reject_needs_reason(context: &TestContext) -> Result<()> {
    // ARRANGE
    let brand_token = login(context, BRAND_EMAIL).await?;
    let influencer_token = login(context, INFLUENCER_EMAIL).await?;
    let influencer = me(context, &influencer_token).await?;
    let opened =
        open_direct_offer(context, &brand_token, influencer.id, "Unboxing video", 5_000).await?;
    let id = opened.collaboration.id;

    // ACT
    let blank = act(
        context,
        &influencer_token,
        &id,
        json!({ "action": "reject", "reason": "   " }),
    )
    .await?;
    let rejected = act_ok(
        context,
        &influencer_token,
        &id,
        json!({ "action": "reject", "reason": "Not my niche" }),
    )
    .await?;

    // ASSERT
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    assert_eq!(rejected.collaboration.status, CollaborationStatus::Rejected);
    assert_eq!(rejected.collaboration.reason.as_deref(), Some("Not my niche"));
    assert_eq!(rejected.bucket, StatusBucket::Archived);
    assert!(rejected.permitted_actions.contains(&Action::Delete));

    Ok(())
}

pub async fn test_cancel_and_delete(context: &TestContext) -> Result<()> {
    // ARRANGE
    let brand_token = login(context, BRAND_EMAIL).await?;
    let influencer_token = login(context, INFLUENCER_EMAIL).await?;
    let admin_token = login(context, ADMIN_EMAIL).await?;
    let influencer = me(context, &influencer_token).await?;
    let opened =
        open_direct_offer(context, &brand_token, influencer.id, "Festive giveaway", 8_000).await?;
    let id = opened.collaboration.id.clone();
    let cancel_url = context.url(&format!("/collaborations/{id}/cancel"));

    // ASSERT: the penalty is shown before cancelling
    assert_eq!(opened.cancellation_penalty, Some(Decimal::from(500)));

    // ACT
    let early_delete = context
        .http_client
        .delete(context.url(&format!("/collaborations/{id}")))
        .bearer_auth(&brand_token)
        .send()
        .await?;
    let unacknowledged = context
        .http_client
        .post(&cancel_url)
        .bearer_auth(&brand_token)
        .json(&json!({ "reason": "Campaign postponed" }))
        .send()
        .await?;
    let cancelled: CollaborationView = context
        .http_client
        .post(&cancel_url)
        .bearer_auth(&brand_token)
        .json(&json!({ "reason": "Campaign postponed", "acknowledgePenalty": true }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let outsider = get_collaboration(context, &admin_token, &id).await?;

    // ASSERT
    assert_eq!(early_delete.status(), StatusCode::CONFLICT);
    assert_eq!(unacknowledged.status(), StatusCode::BAD_REQUEST);
    assert_eq!(cancelled.collaboration.status, CollaborationStatus::Rejected);
    assert_eq!(
        cancelled.collaboration.penalty_amount,
        Some(Decimal::from(500))
    );
    assert_eq!(cancelled.cancellation_penalty, None);
    assert_eq!(outsider.status(), StatusCode::NOT_FOUND);

    // ACT
    let deleted = context
        .http_client
        .delete(context.url(&format!("/collaborations/{id}")))
        .bearer_auth(&brand_token)
        .send()
        .await?;
    let gone = get_collaboration(context, &brand_token, &id).await?;

    // ASSERT
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    Ok(())
}

pub async fn test_cancel_after_payment(context: &TestContext) -> Result<()> {
    // ARRANGE
    let brand_token = login(context, BRAND_EMAIL).await?;
    let influencer_token = login(context, INFLUENCER_EMAIL).await?;
    let admin_token = login(context, ADMIN_EMAIL).await?;
    let influencer = me(context, &influencer_token).await?;
    let opened =
        open_direct_offer(context, &brand_token, influencer.id, "Store opening", 6_000).await?;
    let id = opened.collaboration.id.clone();
    act_ok(context, &influencer_token, &id, json!({ "action": "accept" })).await?;
    context
        .http_client
        .post(context.url(&format!("/collaborations/{id}/payment")))
        .bearer_auth(&brand_token)
        .json(&json!({ "amount": "6000", "transactionId": "txn-cancel" }))
        .send()
        .await?
        .error_for_status()?;

    // ACT
    let cancelled: CollaborationView = context
        .http_client
        .post(context.url(&format!("/collaborations/{id}/cancel")))
        .bearer_auth(&brand_token)
        .json(&json!({ "reason": "Store launch moved", "acknowledgePenalty": true }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let advance = context
        .http_client
        .post(context.url(&format!("/admin/collaborations/{id}/partial-payouts")))
        .bearer_auth(&admin_token)
        .json(&json!({ "amount": "1000" }))
        .send()
        .await?;

    // ASSERT
    assert_eq!(
        cancelled.collaboration.status,
        CollaborationStatus::RefundPendingAdminReview
    );
    assert_eq!(
        cancelled.collaboration.payment_status,
        Some(PaymentStatus::RefundRequested)
    );
    assert_eq!(
        cancelled.collaboration.reason.as_deref(),
        Some("Store launch moved")
    );
    assert!(!cancelled.permitted_actions.contains(&Action::Cancel));
    assert_eq!(advance.status(), StatusCode::CONFLICT);

    // ACT
    let refunded: Collaboration = context
        .http_client
        .post(context.url(&format!("/admin/collaborations/{id}/resolve-refund")))
        .bearer_auth(&admin_token)
        .json(&json!({ "approve": true }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    // ASSERT
    assert_eq!(refunded.status, CollaborationStatus::Rejected);
    assert_eq!(refunded.payment_status, Some(PaymentStatus::Refunded));

    Ok(())
}
