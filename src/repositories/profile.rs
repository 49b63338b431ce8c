//! Profile repository for database operations
//!
//! Profiles are issued by the external auth service; this repository only
//! reads them for the conversion flow.

use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::profile::{self, Entity as Profile};

/// Repository for profile database operations
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a profile by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<profile::Model>> {
        Ok(Profile::find_by_id(id).one(self.db.as_ref()).await?)
    }
}
