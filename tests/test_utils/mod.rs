//! Test utilities for database testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations for testing purposes, plus fixture helpers for the core
//! entities.

use anyhow::Result;
use callboard::models::{casting_code, profile, project, studio};
use chrono::{DateTime, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set, Statement,
};
use std::sync::Arc;
use uuid::Uuid;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // SQLite does not enforce our Postgres foreign key semantics; disable FK
    // checks so fixtures can be inserted without the full relation graph.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Sets up an in-memory SQLite database and returns an Arc-wrapped connection.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(db))
}

/// Creates a studio fixture and returns its ID.
#[allow(dead_code)]
pub async fn create_test_studio(db: &DatabaseConnection, name: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let model = studio::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        created_at: Set(Utc::now().into()),
    };
    model.insert(db).await?;
    Ok(id)
}

/// Creates a project fixture owned by a studio and returns its ID.
#[allow(dead_code)]
pub async fn create_test_project(
    db: &DatabaseConnection,
    studio_id: Uuid,
    name: &str,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let model = project::ActiveModel {
        id: Set(id),
        studio_id: Set(studio_id),
        name: Set(name.to_string()),
        created_at: Set(Utc::now().into()),
    };
    model.insert(db).await?;
    Ok(id)
}

/// Options for casting code fixtures.
#[allow(dead_code)]
#[derive(Default)]
pub struct CastingCodeFixture {
    pub project_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
    pub survey_fields: Option<serde_json::Value>,
}

/// Creates a casting code fixture with a fixed code string.
#[allow(dead_code)]
pub async fn create_test_casting_code(
    db: &DatabaseConnection,
    studio_id: Uuid,
    code: &str,
    fixture: CastingCodeFixture,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let model = casting_code::ActiveModel {
        id: Set(id),
        code: Set(code.to_string()),
        studio_id: Set(studio_id),
        project_id: Set(fixture.project_id),
        is_active: Set(fixture.is_active.unwrap_or(true)),
        expires_at: Set(fixture.expires_at.map(Into::into)),
        survey_fields: Set(fixture.survey_fields),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    model.insert(db).await?;
    Ok(id)
}

/// Creates a profile fixture and returns its ID.
#[allow(dead_code)]
pub async fn create_test_profile(
    db: &DatabaseConnection,
    email: &str,
    phone: Option<&str>,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let model = profile::ActiveModel {
        id: Set(id),
        email: Set(email.to_string()),
        phone: Set(phone.map(str::to_string)),
        display_name: Set("Test Profile".to_string()),
        tenant_type: Set(profile::tenant_type::TALENT.to_string()),
        studio_id: Set(None),
        created_at: Set(Utc::now().into()),
    };
    model.insert(db).await?;
    Ok(id)
}
