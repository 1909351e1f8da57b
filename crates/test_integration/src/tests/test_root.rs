use crate::runner::context::test_context::TestContext;

pub async fn test_health_endpoint(context: &TestContext) -> color_eyre::Result<()> {
    // ARRANGE
    let url = context.url("/health");

    // ACT
    let response = context.http_client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    // ASSERT
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, "OK");

    Ok(())
}

pub async fn test_openapi_document(context: &TestContext) -> color_eyre::Result<()> {
    // ACT
    let response = context.http_client.get(context.url("/openapi.json")).send().await?;
    let status = response.status();
    let document: serde_json::Value = response.json().await?;

    // ASSERT
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(document["paths"]["/collaborations"].is_object());
    assert!(document["paths"]["/collaborations/{collaboration_id}/actions"].is_object());

    Ok(())
}
