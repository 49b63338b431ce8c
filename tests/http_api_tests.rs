//! HTTP round-trip tests driving the full router with `tower::ServiceExt`,
//! pinning the wire contract of the public intake endpoint.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use callboard::config::AppConfig;
use callboard::server::{AppState, create_app};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;

#[path = "test_utils/mod.rs"]
mod test_utils;

async fn test_app() -> Result<(Router, Arc<DatabaseConnection>)> {
    let db = test_utils::setup_test_db_arc().await?;
    let config = AppConfig {
        service_tokens: vec!["test-token".to_string()],
        ..Default::default()
    };

    let app = create_app(AppState {
        db: Arc::clone(&db),
        config: Arc::new(config),
    });

    Ok((app, db))
}

fn post_submission(body: Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri("/api/casting-submissions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_intake_round_trip_uses_camel_case_contract() -> Result<()> {
    let (app, db) = test_app().await?;
    let studio_id = test_utils::create_test_studio(&db, "North Light Casting").await?;
    test_utils::create_test_casting_code(&db, studio_id, "AB12CD", Default::default()).await?;

    let request = post_submission(json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "email": "ann@example.com",
        "phoneNumber": "+15550100",
        "code": "AB12CD",
        "createAccount": true
    }))?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-trace-id"));

    let body = body_json(response).await?;
    assert_eq!(body["success"], json!(true));
    assert!(body["submissionId"].is_string());
    assert_eq!(body["createAccount"], json!(true));
    assert_eq!(body["userData"]["firstName"], json!("Ann"));
    assert_eq!(body["userData"]["lastName"], json!("Lee"));
    assert_eq!(body["userData"]["email"], json!("ann@example.com"));
    assert_eq!(body["userData"]["phoneNumber"], json!("+15550100"));

    Ok(())
}

#[tokio::test]
async fn test_intake_validation_details_use_camel_case_keys() -> Result<()> {
    let (app, db) = test_app().await?;
    let studio_id = test_utils::create_test_studio(&db, "Studio").await?;
    test_utils::create_test_casting_code(&db, studio_id, "AB12CD", Default::default()).await?;

    let request = post_submission(json!({
        "firstName": "",
        "lastName": "Lee",
        "email": "not-an-email",
        "code": "AB12CD"
    }))?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );

    let body = body_json(response).await?;
    assert_eq!(body["code"], json!("VALIDATION_FAILED"));
    assert!(body["details"]["firstName"].is_string());
    assert!(body["details"]["email"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_intake_unknown_code_returns_problem_body() -> Result<()> {
    let (app, _db) = test_app().await?;

    let request = post_submission(json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "code": "NOSUCH"
    }))?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await?;
    assert_eq!(body["code"], json!("CASTING_CODE_NOT_FOUND"));

    Ok(())
}
