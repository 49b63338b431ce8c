//! Casting code repository for database operations
//!
//! This module provides the CastingCodeRepository struct which encapsulates
//! SeaORM operations for the casting_codes table, including generation of
//! unique human-enterable codes.

use anyhow::{Result, anyhow};
use chrono::Utc;
use rand::Rng;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::casting_code::{self, Entity as CastingCode};

/// Alphabet for generated codes. Excludes 0/O, 1/I/L so codes survive being
/// read aloud or typed from a printout.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Attempts before giving up on finding an unused code.
const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Request data for creating a new casting code
#[derive(Debug, Clone, Default)]
pub struct CreateCastingCodeRequest {
    /// Optional project the code funnels applicants into
    pub project_id: Option<Uuid>,
    /// Optional expiry timestamp
    pub expires_at: Option<DateTimeWithTimeZone>,
    /// Optional survey-field schema applicants answer against
    pub survey_fields: Option<serde_json::Value>,
}

/// Repository for casting code database operations
#[derive(Debug, Clone)]
pub struct CastingCodeRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl CastingCodeRepository {
    /// Creates a new CastingCodeRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a casting code for a studio with a freshly generated unique code.
    pub async fn create(
        &self,
        studio_id: Uuid,
        request: CreateCastingCodeRequest,
        code_length: usize,
    ) -> Result<casting_code::Model> {
        let code = self.generate_unique_code(code_length).await?;
        let now = Utc::now();

        let model = casting_code::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code),
            studio_id: Set(studio_id),
            project_id: Set(request.project_id),
            is_active: Set(true),
            expires_at: Set(request.expires_at),
            survey_fields: Set(request.survey_fields),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(model.insert(self.db.as_ref()).await?)
    }

    /// Finds a casting code by its shareable code string, regardless of state.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<casting_code::Model>> {
        Ok(CastingCode::find()
            .filter(casting_code::Column::Code.eq(code))
            .one(self.db.as_ref())
            .await?)
    }

    /// Finds a casting code by ID, scoped to the owning studio.
    pub async fn get_for_studio(
        &self,
        id: Uuid,
        studio_id: Uuid,
    ) -> Result<Option<casting_code::Model>> {
        Ok(CastingCode::find_by_id(id)
            .filter(casting_code::Column::StudioId.eq(studio_id))
            .one(self.db.as_ref())
            .await?)
    }

    /// Lists all casting codes belonging to a studio, newest first.
    pub async fn list_for_studio(&self, studio_id: Uuid) -> Result<Vec<casting_code::Model>> {
        Ok(CastingCode::find()
            .filter(casting_code::Column::StudioId.eq(studio_id))
            .order_by_desc(casting_code::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    /// Toggles the active flag on a studio-owned code.
    ///
    /// Returns `None` when the code does not exist or belongs to another studio.
    pub async fn set_active(
        &self,
        id: Uuid,
        studio_id: Uuid,
        is_active: bool,
    ) -> Result<Option<casting_code::Model>> {
        let Some(code) = self.get_for_studio(id, studio_id).await? else {
            return Ok(None);
        };

        let mut active = code.into_active_model();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(self.db.as_ref()).await?))
    }

    async fn generate_unique_code(&self, length: usize) -> Result<String> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = generate_code(length);
            if self.find_by_code(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(anyhow!(
            "failed to generate a unique casting code after {} attempts",
            MAX_GENERATION_ATTEMPTS
        ))
    }
}

/// Generates a random code from the unambiguous alphabet.
fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Returns true when the code is active and not past its expiry.
pub fn is_usable(code: &casting_code::Model, now: DateTimeWithTimeZone) -> bool {
    if !code.is_active {
        return false;
    }

    match code.expires_at {
        Some(expires_at) => expires_at > now,
        None => true,
    }
}
