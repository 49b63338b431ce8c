//! # External Actor Conversion
//!
//! Promotes external-actor records to converted once the person behind them
//! registers a real profile. Matching runs as two separate queries (email,
//! then phone) because neither field is required on the actor side; the
//! union is deduplicated by record ID before conversion.

use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, not_found};
use crate::models::{external_actor, profile, project_member};
use crate::repositories::{
    ExternalActorRepository, ProfileRepository, ProjectRepository, SubmissionRepository,
};

/// One converted external-actor record in the summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    /// Converted external actor ID
    pub external_actor_id: Uuid,
    /// Studio that owned the record
    pub studio_id: Uuid,
    /// Projects the profile was newly added to
    pub joined_project_ids: Vec<Uuid>,
}

/// Summary returned from a conversion run.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSummary {
    /// Whether any record was converted
    pub converted: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Per-record details, omitted when nothing matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversions: Option<Vec<ConversionRecord>>,
}

/// Service converting matching external actors for a registered profile.
#[derive(Clone)]
pub struct ConversionService {
    profiles: ProfileRepository,
    actors: ExternalActorRepository,
    projects: ProjectRepository,
    submissions: SubmissionRepository,
}

impl ConversionService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            profiles: ProfileRepository::new(Arc::clone(&db)),
            actors: ExternalActorRepository::new(Arc::clone(&db)),
            projects: ProjectRepository::new(Arc::clone(&db)),
            submissions: SubmissionRepository::new(db),
        }
    }

    /// Converts every unconverted external actor matching the profile's email
    /// or phone. Zero matches is a non-error outcome.
    pub async fn convert_for_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<ConversionSummary, ApiError> {
        let profile = self
            .profiles
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| not_found("PROFILE_NOT_FOUND", "Profile not found"))?;

        let matches = self.collect_matches(&profile).await?;

        if matches.is_empty() {
            return Ok(ConversionSummary {
                converted: false,
                message: "No matching external actor records found".to_string(),
                conversions: None,
            });
        }

        let mut conversions = Vec::with_capacity(matches.len());
        for actor in matches {
            conversions.push(self.convert_actor(actor, &profile).await?);
        }

        info!(
            profile_id = %profile.id,
            converted = conversions.len(),
            "Converted external actor records"
        );

        Ok(ConversionSummary {
            converted: true,
            message: format!(
                "Converted {} external actor record(s)",
                conversions.len()
            ),
            conversions: Some(conversions),
        })
    }

    /// Two separate lookups, deduplicated by ID. The email query always runs;
    /// the phone query only runs when the profile has a phone on file.
    async fn collect_matches(
        &self,
        profile: &profile::Model,
    ) -> Result<Vec<external_actor::Model>, ApiError> {
        let mut seen = HashSet::new();
        let mut matches = Vec::new();

        for actor in self.actors.find_unconverted_by_email(&profile.email).await? {
            if seen.insert(actor.id) {
                matches.push(actor);
            }
        }

        if let Some(phone) = profile.phone.as_deref().filter(|p| !p.is_empty()) {
            for actor in self.actors.find_unconverted_by_phone(phone).await? {
                if seen.insert(actor.id) {
                    matches.push(actor);
                }
            }
        }

        Ok(matches)
    }

    async fn convert_actor(
        &self,
        actor: external_actor::Model,
        profile: &profile::Model,
    ) -> Result<ConversionRecord, ApiError> {
        let actor_id = actor.id;
        let studio_id = actor.studio_id;

        let actor = self.actors.mark_converted(actor, profile.id).await?;

        let converted_submissions = self
            .submissions
            .mark_converted_for_actor(actor.id)
            .await?;
        if converted_submissions > 0 {
            info!(
                external_actor_id = %actor.id,
                count = converted_submissions,
                "Marked pending submissions as converted"
            );
        }

        // Membership back-fill is enrichment; a failure on one project must
        // not abort the remaining conversions.
        let mut joined_project_ids = Vec::new();
        for project_id in self.projects.project_ids_for_actor(actor.id).await? {
            match self
                .projects
                .ensure_member(
                    project_id,
                    profile.id,
                    project_member::source::EXTERNAL_ACTOR_CONVERSION,
                )
                .await
            {
                Ok(true) => joined_project_ids.push(project_id),
                Ok(false) => {}
                Err(error) => {
                    warn!(
                        external_actor_id = %actor.id,
                        project_id = %project_id,
                        error = %error,
                        "Project membership back-fill failed"
                    );
                }
            }
        }

        Ok(ConversionRecord {
            external_actor_id: actor_id,
            studio_id,
            joined_project_ids,
        })
    }
}
