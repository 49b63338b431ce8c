//! # Tests for Handlers
//!
//! This module contains unit tests for API handlers, exercised against an
//! in-memory SQLite database.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set, Statement};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::auth::{StudioExtension, StudioId};
use crate::handlers::casting_codes::{self, QrCodeQuery};
use crate::handlers::{self, apply, feature_flags};
use crate::models::{casting_code, studio};
use crate::repositories::FeatureFlagRepository;
use crate::server::AppState;

async fn test_state() -> AppState {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory database connects");
    Migrator::up(&db, None).await.expect("migrations apply");

    let config = AppConfig {
        service_tokens: vec!["test-token".to_string()],
        ..Default::default()
    };

    AppState {
        db: Arc::new(db),
        config: Arc::new(config),
    }
}

async fn insert_studio(db: &DatabaseConnection, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    studio::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("studio inserts");
    id
}

async fn insert_code(db: &DatabaseConnection, studio_id: Uuid, code: &str, is_active: bool) {
    let now = Utc::now();
    casting_code::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code.to_string()),
        studio_id: Set(studio_id),
        project_id: Set(None),
        is_active: Set(is_active),
        expires_at: Set(None),
        survey_fields: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("casting code inserts");
}

#[tokio::test]
async fn test_root_handler_returns_service_info() {
    let axum::Json(info) = handlers::root().await;

    assert_eq!(info.service, "callboard");
    assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_healthz_reports_ok_with_live_database() {
    let state = test_state().await;

    let result = handlers::healthz(State(state)).await;

    let axum::Json(health) = result.expect("health check succeeds");
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_apply_info_resolves_code_and_studio() {
    let state = test_state().await;
    let studio_id = insert_studio(&state.db, "North Light Casting").await;
    insert_code(&state.db, studio_id, "AB12CD", true).await;

    let result = apply::get_apply_info(State(state), Path("AB12CD".to_string())).await;

    let axum::Json(info) = result.expect("apply info resolves");
    assert_eq!(info.code, "AB12CD");
    assert_eq!(info.studio_name, "North Light Casting");
    assert!(info.accepting_submissions);
    assert_eq!(info.project_name, None);
}

#[tokio::test]
async fn test_apply_info_reports_closed_codes() {
    let state = test_state().await;
    let studio_id = insert_studio(&state.db, "Studio").await;
    insert_code(&state.db, studio_id, "CLOSED", false).await;

    let result = apply::get_apply_info(State(state), Path("CLOSED".to_string())).await;

    let axum::Json(info) = result.expect("apply info resolves");
    assert!(!info.accepting_submissions);
}

#[tokio::test]
async fn test_apply_info_unknown_code_is_not_found() {
    let state = test_state().await;

    let error = apply::get_apply_info(State(state), Path("NOSUCH".to_string()))
        .await
        .expect_err("unknown code fails");

    assert_eq!(error.code, Box::from("CASTING_CODE_NOT_FOUND"));
}

#[tokio::test]
async fn test_qr_renders_for_owning_studio() {
    let state = test_state().await;
    let studio_id = insert_studio(&state.db, "Studio").await;
    insert_code(&state.db, studio_id, "AB12CD", true).await;

    let result = casting_codes::casting_code_qr(
        State(state),
        StudioExtension(StudioId(studio_id)),
        Query(QrCodeQuery {
            code: "AB12CD".to_string(),
            size: None,
        }),
    )
    .await;

    let axum::Json(response) = result.expect("QR renders");
    assert!(response.qr_data_url.starts_with("data:image/svg+xml;base64,"));
    assert!(response.apply_url.ends_with("/apply/AB12CD"));
}

#[tokio::test]
async fn test_qr_refuses_foreign_studio_code() {
    let state = test_state().await;
    let owner = insert_studio(&state.db, "Owner").await;
    let other = insert_studio(&state.db, "Other").await;
    insert_code(&state.db, owner, "AB12CD", true).await;

    let error = casting_codes::casting_code_qr(
        State(state),
        StudioExtension(StudioId(other)),
        Query(QrCodeQuery {
            code: "AB12CD".to_string(),
            size: None,
        }),
    )
    .await
    .expect_err("foreign code is refused");

    assert_eq!(error.status, axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_feature_flags_overlay_durable_rows_on_defaults() {
    let mut state = test_state().await;
    let mut config = (*state.config).clone();
    config
        .feature_flag_defaults
        .insert("casting_surveys".to_string(), false);
    config
        .feature_flag_defaults
        .insert("qr_downloads".to_string(), true);
    state.config = Arc::new(config);

    FeatureFlagRepository::new(state.db.clone())
        .set("casting_surveys", true)
        .await
        .expect("flag persists");

    let result = feature_flags::list_feature_flags(State(state)).await;

    let axum::Json(response) = result.expect("flags list");
    assert_eq!(response.flags.get("casting_surveys"), Some(&true));
    assert_eq!(response.flags.get("qr_downloads"), Some(&true));
}

#[tokio::test]
async fn test_feature_flags_serve_defaults_when_table_read_fails() {
    let mut state = test_state().await;
    let mut config = (*state.config).clone();
    config
        .feature_flag_defaults
        .insert("casting_surveys".to_string(), true);
    config
        .feature_flag_defaults
        .insert("qr_downloads".to_string(), false);
    state.config = Arc::new(config);

    // Break the table so the durable read errors.
    state
        .db
        .execute(Statement::from_string(
            state.db.get_database_backend(),
            "DROP TABLE feature_flags".to_string(),
        ))
        .await
        .expect("table drops");

    let result = feature_flags::list_feature_flags(State(state)).await;

    let axum::Json(response) = result.expect("defaults still served");
    assert_eq!(response.flags.get("casting_surveys"), Some(&true));
    assert_eq!(response.flags.get("qr_downloads"), Some(&false));
}
