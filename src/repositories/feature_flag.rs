//! Feature flag repository for database operations
//!
//! Flags live in a durable table; configured defaults are only consulted for
//! keys the table does not know about.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::feature_flag::{self, Entity as FeatureFlag};

/// Repository for feature flag database operations
#[derive(Debug, Clone)]
pub struct FeatureFlagRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl FeatureFlagRepository {
    /// Creates a new FeatureFlagRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Returns the effective flag set: configured defaults overlaid with
    /// every durable row.
    pub async fn effective_flags(
        &self,
        defaults: &BTreeMap<String, bool>,
    ) -> Result<BTreeMap<String, bool>> {
        let mut flags = defaults.clone();

        for row in FeatureFlag::find().all(self.db.as_ref()).await? {
            flags.insert(row.key, row.enabled);
        }

        Ok(flags)
    }

    /// Creates or updates a durable flag row.
    pub async fn set(&self, key: &str, enabled: bool) -> Result<feature_flag::Model> {
        let now = Utc::now();

        match FeatureFlag::find_by_id(key).one(self.db.as_ref()).await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.enabled = Set(enabled);
                active.updated_at = Set(now.into());
                Ok(active.update(self.db.as_ref()).await?)
            }
            None => {
                let model = feature_flag::ActiveModel {
                    key: Set(key.to_string()),
                    enabled: Set(enabled),
                    updated_at: Set(now.into()),
                };
                Ok(model.insert(self.db.as_ref()).await?)
            }
        }
    }
}
