use crate::runner::context::test_context::TestContext;
use crate::test_constants::{ADMIN_EMAIL, BRAND_EMAIL, INFLUENCER_EMAIL};
use crate::test_helpers::{drive_to_completion, get_collaboration, login, me};
use color_eyre::Result;
use common_services::api::collaboration::interfaces::CollaborationView;
use common_services::api::upload::interfaces::UploadedFile;
use common_services::database::kyc::{KycStatus, KycSubmission};
use common_services::database::payout::{Payout, PayoutKind, PayoutStatus};
use common_types::{Action, PaymentStatus, PayoutBreakdown};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use rust_decimal::Decimal;
use serde_json::json;

const SCAN: &[u8] = b"%PDF-1.4 identity document scan";

async fn upload(context: &TestContext, token: &str, name: &str, mime: &str) -> Result<reqwest::Response> {
    let part = Part::bytes(SCAN.to_vec()).file_name(name.to_owned()).mime_str(mime)?;
    let response = context
        .http_client
        .post(context.url("/uploads"))
        .bearer_auth(token)
        .multipart(Form::new().part("file", part))
        .send()
        .await?;
    Ok(response)
}

pub async fn test_upload(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = login(context, INFLUENCER_EMAIL).await?;

    // ACT
    let rejected = upload(context, &token, "payload.exe", "application/octet-stream").await?;
    let response = upload(context, &token, "passport.pdf", "application/pdf").await?;
    let status = response.status();
    let uploaded: UploadedFile = response.json().await?;
    let served = context.http_client.get(&uploaded.url).send().await?;
    let served_status = served.status();
    let served_bytes = served.bytes().await?;

    // ASSERT
    assert_eq!(rejected.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(uploaded.original_name, "passport.pdf");
    assert_eq!(uploaded.content_type, "application/pdf");
    assert!(uploaded.file_name.ends_with(".pdf"));
    assert!(uploaded.url.contains("/files/"));
    assert_eq!(served_status, StatusCode::OK);
    assert_eq!(served_bytes.as_ref(), SCAN);

    Ok(())
}

pub async fn test_payout_flow(context: &TestContext) -> Result<()> {
    // ARRANGE
    let brand_token = login(context, BRAND_EMAIL).await?;
    let influencer_token = login(context, INFLUENCER_EMAIL).await?;
    let admin_token = login(context, ADMIN_EMAIL).await?;
    let influencer = me(context, &influencer_token).await?;
    let completed = drive_to_completion(
        context,
        &brand_token,
        &influencer_token,
        influencer.id,
        "Product review",
        12_000,
    )
    .await?;
    let id = completed.collaboration.id;
    let preview_url = context.url(&format!("/collaborations/{id}/payout-preview"));
    let payout_url = context.url(&format!("/collaborations/{id}/payout"));

    // ACT: preview, then an advance from the admin
    let brand_preview = context
        .http_client
        .get(&preview_url)
        .bearer_auth(&brand_token)
        .send()
        .await?;
    let preview: PayoutBreakdown = context
        .http_client
        .get(&preview_url)
        .bearer_auth(&influencer_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let too_large_advance = context
        .http_client
        .post(context.url(&format!("/admin/collaborations/{id}/partial-payouts")))
        .bearer_auth(&admin_token)
        .json(&json!({ "amount": "20000" }))
        .send()
        .await?;
    let advance: Payout = context
        .http_client
        .post(context.url(&format!("/admin/collaborations/{id}/partial-payouts")))
        .bearer_auth(&admin_token)
        .json(&json!({ "amount": "2000" }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let after_advance: PayoutBreakdown = context
        .http_client
        .get(&preview_url)
        .bearer_auth(&influencer_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    // ASSERT
    assert_eq!(brand_preview.status(), StatusCode::FORBIDDEN);
    assert_eq!(preview.commission, Decimal::from(1200));
    assert_eq!(preview.processing_charge, Decimal::from(240));
    assert_eq!(preview.gst, "259.2".parse::<Decimal>()?);
    assert_eq!(preview.net_amount, "10300.8".parse::<Decimal>()?);
    assert_eq!(too_large_advance.status(), StatusCode::BAD_REQUEST);
    assert_eq!(advance.kind, PayoutKind::Partial);
    assert_eq!(advance.status, PayoutStatus::Paid);
    assert_eq!(after_advance.prior_payouts, Decimal::from(2000));
    assert_eq!(after_advance.net_amount, "8300.8".parse::<Decimal>()?);

    // ACT: payout is refused until KYC is approved
    let without_kyc = context
        .http_client
        .post(&payout_url)
        .bearer_auth(&influencer_token)
        .send()
        .await?;
    assert_eq!(without_kyc.status(), StatusCode::FORBIDDEN);

    let document: UploadedFile = upload(context, &influencer_token, "aadhaar.pdf", "application/pdf")
        .await?
        .json()
        .await?;
    let selfie: UploadedFile = upload(context, &influencer_token, "selfie.png", "image/png")
        .await?
        .json()
        .await?;
    let submission: KycSubmission = context
        .http_client
        .post(context.url("/kyc"))
        .bearer_auth(&influencer_token)
        .json(&json!({
            "fullName": "Priya Sharma",
            "documentType": "aadhaar",
            "documentNumber": "1234 5678 9012",
            "documentUrl": document.url,
            "selfieUrl": selfie.url,
        }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let review_url = context.url(&format!("/admin/kyc/{}/review", submission.id));
    let pending: Vec<KycSubmission> = context
        .http_client
        .get(context.url("/admin/kyc"))
        .bearer_auth(&admin_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let rejection_without_note = context
        .http_client
        .post(&review_url)
        .bearer_auth(&admin_token)
        .json(&json!({ "approve": false }))
        .send()
        .await?;
    let approved: KycSubmission = context
        .http_client
        .post(&review_url)
        .bearer_auth(&admin_token)
        .json(&json!({ "approve": true }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    // ASSERT
    assert_eq!(submission.status, KycStatus::Pending);
    assert!(pending.iter().any(|s| s.id == submission.id));
    assert_eq!(rejection_without_note.status(), StatusCode::BAD_REQUEST);
    assert_eq!(approved.status, KycStatus::Approved);
    assert!(approved.reviewed_at.is_some());

    // ACT: request the payout, twice
    let requested = context
        .http_client
        .post(&payout_url)
        .bearer_auth(&influencer_token)
        .send()
        .await?;
    let requested_status = requested.status();
    let payout: Payout = requested.json().await?;
    let repeated = context
        .http_client
        .post(&payout_url)
        .bearer_auth(&influencer_token)
        .send()
        .await?;
    let view: CollaborationView = get_collaboration(context, &influencer_token, &id)
        .await?
        .json()
        .await?;

    // ASSERT
    assert_eq!(requested_status, StatusCode::CREATED);
    assert_eq!(payout.kind, PayoutKind::Final);
    assert_eq!(payout.status, PayoutStatus::Pending);
    assert_eq!(payout.net_amount, "8300.8".parse::<Decimal>()?);
    assert_eq!(repeated.status(), StatusCode::CONFLICT);
    assert_eq!(
        view.collaboration.payment_status,
        Some(PaymentStatus::PayoutRequested)
    );
    assert!(!view.permitted_actions.contains(&Action::RequestPayout));

    // ACT: the admin settles it
    let complete_url = context.url(&format!("/admin/payouts/{}/complete", payout.id));
    let settled: Payout = context
        .http_client
        .post(&complete_url)
        .bearer_auth(&admin_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let settled_twice = context
        .http_client
        .post(&complete_url)
        .bearer_auth(&admin_token)
        .send()
        .await?;
    let payouts: Vec<Payout> = context
        .http_client
        .get(context.url("/payouts"))
        .bearer_auth(&influencer_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let view: CollaborationView = get_collaboration(context, &influencer_token, &id)
        .await?
        .json()
        .await?;

    // ASSERT
    assert_eq!(settled.status, PayoutStatus::Paid);
    assert!(settled.paid_at.is_some());
    assert_eq!(settled_twice.status(), StatusCode::CONFLICT);
    assert_eq!(payouts.len(), 2);
    assert_eq!(view.collaboration.payment_status, Some(PaymentStatus::PaidOut));

    Ok(())
}
