//! # Common API Types
//!
//! Shared DTOs used across multiple API handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{casting_code, casting_submission};

/// Casting code representation returned to studio clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CastingCodeDto {
    /// Unique identifier (UUID)
    pub id: Uuid,
    /// Shareable human-enterable code
    #[schema(example = "AB12CD")]
    pub code: String,
    /// Project the code funnels applicants into, if any
    pub project_id: Option<Uuid>,
    /// Whether the code currently accepts submissions
    pub is_active: bool,
    /// Expiry timestamp, if any (ISO 8601)
    pub expires_at: Option<DateTime<Utc>>,
    /// Survey-field schema applicants answer against, if any
    pub survey_fields: Option<serde_json::Value>,
    /// Creation timestamp (ISO 8601)
    pub created_at: DateTime<Utc>,
}

impl From<casting_code::Model> for CastingCodeDto {
    fn from(model: casting_code::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            project_id: model.project_id,
            is_active: model.is_active,
            expires_at: model.expires_at.map(Into::into),
            survey_fields: model.survey_fields,
            created_at: model.created_at.into(),
        }
    }
}

/// Submission representation returned to studio clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDto {
    /// Unique identifier (UUID)
    pub id: Uuid,
    /// Casting code the submission came through
    pub casting_code_id: Uuid,
    /// External actor the submission resolved to
    pub external_actor_id: Uuid,
    /// Applicant first name
    pub first_name: String,
    /// Applicant last name
    pub last_name: String,
    /// Applicant email, if supplied
    pub email: Option<String>,
    /// Applicant phone, if supplied
    pub phone: Option<String>,
    /// Free-form message to the studio, if supplied
    pub message: Option<String>,
    /// Review status (pending|approved|rejected|converted)
    #[schema(example = "pending")]
    pub status: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: DateTime<Utc>,
}

impl From<casting_submission::Model> for SubmissionDto {
    fn from(model: casting_submission::Model) -> Self {
        Self {
            id: model.id,
            casting_code_id: model.casting_code_id,
            external_actor_id: model.external_actor_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            message: model.message,
            status: model.status,
            created_at: model.created_at.into(),
        }
    }
}

/// Applicant contact data echoed back from the intake endpoint so clients
/// can prefill a registration form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDataDto {
    /// Applicant first name
    pub first_name: String,
    /// Applicant last name
    pub last_name: String,
    /// Applicant email, if supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Applicant phone, if supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}
