//! Studio repository for database operations

use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::studio::{self, Entity as Studio};

/// Repository for studio database operations
#[derive(Debug, Clone)]
pub struct StudioRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl StudioRepository {
    /// Creates a new StudioRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a studio by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<studio::Model>> {
        Ok(Studio::find_by_id(id).one(self.db.as_ref()).await?)
    }
}
