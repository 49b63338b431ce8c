//! # Casting Submission Intake
//!
//! The request-scoped pipeline behind `POST /api/casting-submissions`:
//! validate the payload, resolve the casting code, match-or-create the
//! external actor, record the submission, then best-effort link the actor to
//! the code's project. Association failures are logged and swallowed; the
//! submission is already committed by that point.

use std::sync::Arc;
use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use sea_orm::DatabaseConnection;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, not_found, validation_error};
use crate::models::casting_code;
use crate::repositories::casting_code::is_usable;
use crate::repositories::external_actor::ActorIdentity;
use crate::repositories::submission::RecordSubmissionRequest;
use crate::repositories::{
    CastingCodeRepository, ExternalActorRepository, ProjectRepository, SubmissionRepository,
};

/// Maximum length accepted for the free-form message.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Maximum length accepted for each name field.
pub const MAX_NAME_LENGTH: usize = 100;

// Cheap shape check, not RFC 5322.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// A validated-enough intake request as accepted from the public endpoint.
#[derive(Debug, Clone)]
pub struct IntakeRequest {
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub create_account: bool,
    pub survey_responses: Option<serde_json::Value>,
}

/// Result of a successful intake run.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub submission_id: Uuid,
    pub external_actor_id: Uuid,
    /// Echoed back so the client can route the applicant to registration.
    pub create_account: bool,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Service running the intake pipeline for one submission request.
#[derive(Clone)]
pub struct IntakeService {
    codes: CastingCodeRepository,
    actors: ExternalActorRepository,
    submissions: SubmissionRepository,
    projects: ProjectRepository,
}

impl IntakeService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            codes: CastingCodeRepository::new(Arc::clone(&db)),
            actors: ExternalActorRepository::new(Arc::clone(&db)),
            submissions: SubmissionRepository::new(Arc::clone(&db)),
            projects: ProjectRepository::new(db),
        }
    }

    /// Runs the full pipeline. Validation and code-resolution failures return
    /// before any write happens.
    pub async fn submit(&self, request: IntakeRequest) -> Result<IntakeOutcome, ApiError> {
        let request = validate(request)?;

        let code = self
            .codes
            .find_by_code(&request.code)
            .await?
            .ok_or_else(|| not_found("CASTING_CODE_NOT_FOUND", "Casting code not found"))?;

        if !is_usable(&code, Utc::now().into()) {
            return Err(validation_error(
                "Casting code is no longer accepting submissions",
                json!({ "code": "Code is inactive or expired" }),
            ));
        }

        let actor = self
            .actors
            .upsert(
                code.studio_id,
                ActorIdentity {
                    first_name: request.first_name.clone(),
                    last_name: request.last_name.clone(),
                    email: request.email.clone(),
                    phone: request.phone.clone(),
                },
            )
            .await?;

        let submission = self
            .submissions
            .record(RecordSubmissionRequest {
                casting_code_id: code.id,
                external_actor_id: actor.id,
                first_name: request.first_name.clone(),
                last_name: request.last_name.clone(),
                email: request.email.clone(),
                phone: request.phone.clone(),
                message: request.message,
                survey_responses: survey_payload(&code, request.survey_responses),
            })
            .await?;

        info!(
            submission_id = %submission.id,
            external_actor_id = %actor.id,
            code = %code.code,
            "Recorded casting submission"
        );

        self.associate_project(&code, actor.id).await;

        Ok(IntakeOutcome {
            submission_id: submission.id,
            external_actor_id: actor.id,
            create_account: request.create_account,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
        })
    }

    /// Best-effort project linkage. The submission is committed before this
    /// runs, so failures are logged and swallowed.
    async fn associate_project(&self, code: &casting_code::Model, actor_id: Uuid) {
        let Some(project_id) = code.project_id else {
            return;
        };

        match self.projects.associate_external_actor(actor_id, project_id).await {
            Ok(created) => {
                if created {
                    info!(
                        external_actor_id = %actor_id,
                        project_id = %project_id,
                        "Associated external actor with project"
                    );
                }
            }
            Err(error) => {
                warn!(
                    external_actor_id = %actor_id,
                    project_id = %project_id,
                    error = %error,
                    "Project association failed; submission unaffected"
                );
            }
        }
    }
}

/// Validates the payload, normalizing empty optional strings to `None`.
fn validate(request: IntakeRequest) -> Result<IntakeRequest, ApiError> {
    let mut field_errors = serde_json::Map::new();

    let first_name = request.first_name.trim().to_string();
    let last_name = request.last_name.trim().to_string();

    if first_name.is_empty() {
        field_errors.insert("firstName".to_string(), json!("First name is required"));
    } else if first_name.chars().count() > MAX_NAME_LENGTH {
        field_errors.insert(
            "firstName".to_string(),
            json!(format!("First name exceeds {} characters", MAX_NAME_LENGTH)),
        );
    }
    if last_name.is_empty() {
        field_errors.insert("lastName".to_string(), json!("Last name is required"));
    } else if last_name.chars().count() > MAX_NAME_LENGTH {
        field_errors.insert(
            "lastName".to_string(),
            json!(format!("Last name exceeds {} characters", MAX_NAME_LENGTH)),
        );
    }
    if request.code.trim().is_empty() {
        field_errors.insert("code".to_string(), json!("Casting code is required"));
    }

    let email = normalize_optional(request.email);
    if let Some(email) = email.as_deref()
        && !EMAIL_RE.is_match(email)
    {
        field_errors.insert("email".to_string(), json!("Invalid email format"));
    }

    let message = normalize_optional(request.message);
    if let Some(message) = message.as_deref()
        && message.chars().count() > MAX_MESSAGE_LENGTH
    {
        field_errors.insert(
            "message".to_string(),
            json!(format!("Message exceeds {} characters", MAX_MESSAGE_LENGTH)),
        );
    }

    if !field_errors.is_empty() {
        return Err(validation_error(
            "Validation failed",
            serde_json::Value::Object(field_errors),
        ));
    }

    Ok(IntakeRequest {
        code: request.code.trim().to_string(),
        first_name,
        last_name,
        email,
        phone: normalize_optional(request.phone),
        message,
        create_account: request.create_account,
        survey_responses: request.survey_responses,
    })
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Survey responses are persisted only when the code defines survey fields
/// and the submitter supplied answers; absence of either is not an error.
fn survey_payload(
    code: &casting_code::Model,
    responses: Option<serde_json::Value>,
) -> Option<serde_json::Value> {
    match (&code.survey_fields, responses) {
        (Some(_), Some(responses)) if !responses.is_null() => Some(responses),
        _ => None,
    }
}
