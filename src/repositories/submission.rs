//! Casting submission repository for database operations
//!
//! Persists submissions and their optional survey responses, and provides
//! studio-scoped review queries.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::casting_code;
use crate::models::casting_submission::{self, Entity as CastingSubmission, status};
use crate::models::submission_survey::{self, Entity as SubmissionSurvey};

/// Request data for recording a submission
#[derive(Debug, Clone)]
pub struct RecordSubmissionRequest {
    pub casting_code_id: Uuid,
    pub external_actor_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    /// Survey responses, persisted only when the code defines survey fields.
    pub survey_responses: Option<serde_json::Value>,
}

/// Repository for casting submission database operations
#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl SubmissionRepository {
    /// Creates a new SubmissionRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Records a pending submission, plus a linked survey row when responses
    /// were supplied.
    pub async fn record(
        &self,
        request: RecordSubmissionRequest,
    ) -> Result<casting_submission::Model> {
        let now = Utc::now();

        let submission = casting_submission::ActiveModel {
            id: Set(Uuid::new_v4()),
            casting_code_id: Set(request.casting_code_id),
            external_actor_id: Set(request.external_actor_id),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            email: Set(request.email),
            phone: Set(request.phone),
            message: Set(request.message),
            status: Set(status::PENDING.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let submission = submission.insert(self.db.as_ref()).await?;

        if let Some(responses) = request.survey_responses {
            let survey = submission_survey::ActiveModel {
                id: Set(Uuid::new_v4()),
                submission_id: Set(submission.id),
                responses: Set(responses),
                created_at: Set(now.into()),
            };
            survey.insert(self.db.as_ref()).await?;
        }

        Ok(submission)
    }

    /// Lists submissions for a studio, newest first, optionally filtered by
    /// status. Scoping goes through the owning casting code.
    pub async fn list_for_studio(
        &self,
        studio_id: Uuid,
        status_filter: Option<&str>,
    ) -> Result<Vec<casting_submission::Model>> {
        let mut query = CastingSubmission::find()
            .inner_join(casting_code::Entity)
            .filter(casting_code::Column::StudioId.eq(studio_id));

        if let Some(status) = status_filter {
            query = query.filter(casting_submission::Column::Status.eq(status));
        }

        Ok(query
            .order_by_desc(casting_submission::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    /// Finds a submission by ID, scoped to the owning studio.
    pub async fn get_for_studio(
        &self,
        id: Uuid,
        studio_id: Uuid,
    ) -> Result<Option<casting_submission::Model>> {
        Ok(CastingSubmission::find_by_id(id)
            .inner_join(casting_code::Entity)
            .filter(casting_code::Column::StudioId.eq(studio_id))
            .one(self.db.as_ref())
            .await?)
    }

    /// Updates the review status of a studio-owned submission.
    ///
    /// Returns `None` when the submission does not exist or belongs to
    /// another studio.
    pub async fn update_status_for_studio(
        &self,
        id: Uuid,
        studio_id: Uuid,
        new_status: &str,
    ) -> Result<Option<casting_submission::Model>> {
        let Some(submission) = self.get_for_studio(id, studio_id).await? else {
            return Ok(None);
        };

        let mut active = submission.into_active_model();
        active.status = Set(new_status.to_string());
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(self.db.as_ref()).await?))
    }

    /// Marks every pending submission from an external actor as converted.
    pub async fn mark_converted_for_actor(&self, external_actor_id: Uuid) -> Result<u64> {
        let pending = CastingSubmission::find()
            .filter(casting_submission::Column::ExternalActorId.eq(external_actor_id))
            .filter(casting_submission::Column::Status.eq(status::PENDING))
            .all(self.db.as_ref())
            .await?;

        let now = Utc::now();
        let mut updated = 0u64;
        for submission in pending {
            let mut active = submission.into_active_model();
            active.status = Set(status::CONVERTED.to_string());
            active.updated_at = Set(now.into());
            active.update(self.db.as_ref()).await?;
            updated += 1;
        }

        Ok(updated)
    }

    /// Finds the survey responses linked to a submission, if any.
    pub async fn find_survey(
        &self,
        submission_id: Uuid,
    ) -> Result<Option<submission_survey::Model>> {
        Ok(SubmissionSurvey::find()
            .filter(submission_survey::Column::SubmissionId.eq(submission_id))
            .limit(1)
            .one(self.db.as_ref())
            .await?)
    }
}
