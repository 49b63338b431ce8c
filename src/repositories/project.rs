//! Project repository for database operations
//!
//! Covers the two join tables around projects: best-effort external-actor
//! associations and profile memberships back-filled on conversion.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::external_actor_project::{self, Entity as ExternalActorProject};
use crate::models::project::{self, Entity as Project};
use crate::models::project_member::{self, Entity as ProjectMember};

/// Repository for project, association, and membership database operations
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ProjectRepository {
    /// Creates a new ProjectRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a project by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<project::Model>> {
        Ok(Project::find_by_id(id).one(self.db.as_ref()).await?)
    }

    /// Links an external actor to a project, at most once per pair.
    ///
    /// Returns true when a new association row was created.
    pub async fn associate_external_actor(
        &self,
        external_actor_id: Uuid,
        project_id: Uuid,
    ) -> Result<bool> {
        let existing = ExternalActorProject::find()
            .filter(external_actor_project::Column::ExternalActorId.eq(external_actor_id))
            .filter(external_actor_project::Column::ProjectId.eq(project_id))
            .one(self.db.as_ref())
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        let association = external_actor_project::ActiveModel {
            id: Set(Uuid::new_v4()),
            external_actor_id: Set(external_actor_id),
            project_id: Set(project_id),
            created_at: Set(Utc::now().into()),
        };
        association.insert(self.db.as_ref()).await?;

        Ok(true)
    }

    /// Lists the project IDs an external actor is associated with.
    pub async fn project_ids_for_actor(&self, external_actor_id: Uuid) -> Result<Vec<Uuid>> {
        let associations = ExternalActorProject::find()
            .filter(external_actor_project::Column::ExternalActorId.eq(external_actor_id))
            .all(self.db.as_ref())
            .await?;

        Ok(associations.into_iter().map(|a| a.project_id).collect())
    }

    /// Adds a profile to a project unless it is already a member.
    ///
    /// Returns true when a new membership row was created.
    pub async fn ensure_member(
        &self,
        project_id: Uuid,
        profile_id: Uuid,
        source: &str,
    ) -> Result<bool> {
        let existing = ProjectMember::find()
            .filter(project_member::Column::ProjectId.eq(project_id))
            .filter(project_member::Column::ProfileId.eq(profile_id))
            .one(self.db.as_ref())
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        let membership = project_member::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            profile_id: Set(profile_id),
            source: Set(source.to_string()),
            created_at: Set(Utc::now().into()),
        };
        membership.insert(self.db.as_ref()).await?;

        Ok(true)
    }
}
