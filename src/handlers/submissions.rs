//! # Casting Submission Handlers
//!
//! Public intake endpoint plus the studio-side review endpoints.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::StudioExtension;
use crate::error::{ApiError, not_found, validation_error};
use crate::handlers::types::{SubmissionDto, UserDataDto};
use crate::intake::{IntakeRequest, IntakeService};
use crate::models::casting_submission::status;
use crate::repositories::SubmissionRepository;
use crate::server::AppState;

/// Request payload for submitting a casting application
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCastingRequestDto {
    /// Applicant first name (required)
    #[schema(example = "Ann")]
    pub first_name: String,
    /// Applicant last name (required)
    #[schema(example = "Lee")]
    pub last_name: String,
    /// Applicant email (optional, validated when present)
    #[schema(example = "ann@example.com")]
    pub email: Option<String>,
    /// Applicant phone number (optional)
    pub phone_number: Option<String>,
    /// Free-form message to the studio (optional, bounded length)
    pub message: Option<String>,
    /// Casting code being applied against (required)
    #[schema(example = "AB12CD")]
    pub code: String,
    /// Whether the applicant wants to create a platform account afterwards
    #[serde(default)]
    pub create_account: bool,
    /// Answers to the code's survey fields, if any
    pub survey_responses: Option<serde_json::Value>,
}

/// Response payload for a recorded submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCastingResponseDto {
    /// Always true on the success path
    pub success: bool,
    /// Human-readable confirmation message
    pub message: String,
    /// Identifier of the recorded submission
    pub submission_id: Uuid,
    /// Echo of the createAccount request flag
    pub create_account: bool,
    /// Applicant contact data for prefilling a registration form
    pub user_data: UserDataDto,
}

/// Submit a casting application through a shareable code
#[utoipa::path(
    post,
    path = "/api/casting-submissions",
    request_body = SubmitCastingRequestDto,
    responses(
        (status = 200, description = "Submission recorded", body = SubmitCastingResponseDto),
        (status = 400, description = "Validation failed or code inactive/expired", body = ApiError),
        (status = 404, description = "Casting code not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "submissions"
)]
pub async fn submit_casting(
    State(state): State<AppState>,
    Json(request): Json<SubmitCastingRequestDto>,
) -> Result<Json<SubmitCastingResponseDto>, ApiError> {
    let service = IntakeService::new(state.db.clone());

    let outcome = service
        .submit(IntakeRequest {
            code: request.code,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone_number,
            message: request.message,
            create_account: request.create_account,
            survey_responses: request.survey_responses,
        })
        .await?;

    Ok(Json(SubmitCastingResponseDto {
        success: true,
        message: "Submission recorded".to_string(),
        submission_id: outcome.submission_id,
        create_account: outcome.create_account,
        user_data: UserDataDto {
            first_name: outcome.first_name,
            last_name: outcome.last_name,
            email: outcome.email,
            phone_number: outcome.phone,
        },
    }))
}

/// Query parameters for listing studio submissions
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSubmissionsQuery {
    /// Filter by review status (pending|approved|rejected|converted)
    pub status: Option<String>,
}

/// List submissions for the authenticated studio
#[utoipa::path(
    get,
    path = "/api/studio/submissions",
    security(("bearer_auth" = [])),
    params(ListSubmissionsQuery, crate::auth::StudioHeader),
    responses(
        (status = 200, description = "Submissions for the studio", body = [SubmissionDto]),
        (status = 400, description = "Invalid status filter or missing studio header", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(state): State<AppState>,
    StudioExtension(studio): StudioExtension,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<Json<Vec<SubmissionDto>>, ApiError> {
    if let Some(status_filter) = query.status.as_deref() {
        validate_status(status_filter)?;
    }

    let repository = SubmissionRepository::new(state.db.clone());
    let submissions = repository
        .list_for_studio(studio.0, query.status.as_deref())
        .await?;

    Ok(Json(submissions.into_iter().map(Into::into).collect()))
}

/// Request payload for reviewing a submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewSubmissionRequestDto {
    /// New review status (approved|rejected|pending)
    #[schema(example = "approved")]
    pub status: String,
}

/// Update the review status of a studio-owned submission
#[utoipa::path(
    patch,
    path = "/api/studio/submissions/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Submission ID"),
        crate::auth::StudioHeader
    ),
    request_body = ReviewSubmissionRequestDto,
    responses(
        (status = 200, description = "Submission updated", body = SubmissionDto),
        (status = 400, description = "Invalid status value", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Submission not found for this studio", body = ApiError)
    ),
    tag = "submissions"
)]
pub async fn review_submission(
    State(state): State<AppState>,
    StudioExtension(studio): StudioExtension,
    Path(id): Path<Uuid>,
    Json(request): Json<ReviewSubmissionRequestDto>,
) -> Result<Json<SubmissionDto>, ApiError> {
    validate_review_status(&request.status)?;

    let repository = SubmissionRepository::new(state.db.clone());
    let updated = repository
        .update_status_for_studio(id, studio.0, &request.status)
        .await?
        .ok_or_else(|| not_found("SUBMISSION_NOT_FOUND", "Submission not found"))?;

    Ok(Json(updated.into()))
}

fn validate_status(value: &str) -> Result<(), ApiError> {
    match value {
        status::PENDING | status::APPROVED | status::REJECTED | status::CONVERTED => Ok(()),
        _ => Err(validation_error(
            "Unknown submission status",
            json!({ "status": "Must be one of pending, approved, rejected, converted" }),
        )),
    }
}

/// Review can move a submission between pending/approved/rejected; the
/// converted status is reserved for the conversion flow.
fn validate_review_status(value: &str) -> Result<(), ApiError> {
    match value {
        status::PENDING | status::APPROVED | status::REJECTED => Ok(()),
        _ => Err(validation_error(
            "Unknown review status",
            json!({ "status": "Must be one of pending, approved, rejected" }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_status_accepts_known_values() {
        for value in ["pending", "approved", "rejected", "converted"] {
            assert!(validate_status(value).is_ok());
        }
        assert!(validate_status("archived").is_err());
    }

    #[test]
    fn test_review_status_excludes_converted() {
        assert!(validate_review_status("approved").is_ok());
        assert!(validate_review_status("converted").is_err());
    }
}
