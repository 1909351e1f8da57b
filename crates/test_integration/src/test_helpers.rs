use crate::runner::context::test_context::TestContext;
use crate::test_constants::PASSWORD;
use color_eyre::Result;
use color_eyre::eyre::{bail, eyre};
use common_services::api::auth::interfaces::{CreateUser, LoginUser, Tokens};
use common_services::api::collaboration::interfaces::CollaborationView;
use common_services::database::app_user::User;
use common_types::ActorRole;
use serde_json::{Value, json};

pub async fn register(
    context: &TestContext,
    email: &str,
    name: &str,
    marketplace_role: ActorRole,
) -> Result<reqwest::Response> {
    let response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            email: email.to_owned(),
            name: name.to_owned(),
            password: PASSWORD.to_owned(),
            marketplace_role,
        })
        .send()
        .await?;
    Ok(response)
}

pub async fn login(context: &TestContext, email: &str) -> Result<String> {
    let response = context
        .http_client
        .post(context.url("/auth/login"))
        .json(&LoginUser {
            email: email.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    if !response.status().is_success() {
        bail!("login for {email} failed with {}", response.status());
    }
    let tokens: Tokens = response.json().await?;
    Ok(tokens.access_token)
}

pub async fn me(context: &TestContext, token: &str) -> Result<User> {
    let user = context
        .http_client
        .get(context.url("/auth/me"))
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(user)
}

/// Runs a collaboration action and returns the raw response.
pub async fn act(
    context: &TestContext,
    token: &str,
    collaboration_id: &str,
    body: Value,
) -> Result<reqwest::Response> {
    let response = context
        .http_client
        .post(context.url(&format!("/collaborations/{collaboration_id}/actions")))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    Ok(response)
}

/// Runs an action that is expected to succeed.
pub async fn act_ok(
    context: &TestContext,
    token: &str,
    collaboration_id: &str,
    body: Value,
) -> Result<CollaborationView> {
    let response = act(context, token, collaboration_id, body).await?;
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await?;
        return Err(eyre!("action failed with {status}: {text}"));
    }
    Ok(response.json().await?)
}

pub async fn get_collaboration(
    context: &TestContext,
    token: &str,
    collaboration_id: &str,
) -> Result<reqwest::Response> {
    let response = context
        .http_client
        .get(context.url(&format!("/collaborations/{collaboration_id}")))
        .bearer_auth(token)
        .send()
        .await?;
    Ok(response)
}

/// A brand-initiated direct collaboration with an opening offer.
pub async fn open_direct_offer(
    context: &TestContext,
    brand_token: &str,
    influencer_id: i32,
    title: &str,
    amount: u32,
) -> Result<CollaborationView> {
    let response = context
        .http_client
        .post(context.url("/collaborations"))
        .bearer_auth(brand_token)
        .json(&json!({
            "kind": "direct_collaboration",
            "counterpartyId": influencer_id,
            "title": title,
            "description": "Two reels and a story",
            "amount": amount.to_string(),
        }))
        .send()
        .await?;
    let status = response.status();
    if status != reqwest::StatusCode::CREATED {
        let text = response.text().await?;
        return Err(eyre!("create failed with {status}: {text}"));
    }
    Ok(response.json().await?)
}

/// Negotiates, pays for and finishes a fresh collaboration. Returns the completed record.
pub async fn drive_to_completion(
    context: &TestContext,
    brand_token: &str,
    influencer_token: &str,
    influencer_id: i32,
    title: &str,
    amount: u32,
) -> Result<CollaborationView> {
    let opened = open_direct_offer(context, brand_token, influencer_id, title, amount).await?;
    let id = opened.collaboration.id;

    act_ok(context, influencer_token, &id, json!({ "action": "accept" })).await?;
    let response = context
        .http_client
        .post(context.url(&format!("/collaborations/{id}/payment")))
        .bearer_auth(brand_token)
        .json(&json!({ "amount": amount.to_string(), "transactionId": format!("txn-{id}") }))
        .send()
        .await?;
    if !response.status().is_success() {
        bail!("payment failed with {}", response.status());
    }
    act_ok(context, influencer_token, &id, json!({ "action": "startWork" })).await?;
    act_ok(context, influencer_token, &id, json!({ "action": "completeWork" })).await?;
    act_ok(context, brand_token, &id, json!({ "action": "markComplete" })).await
}
