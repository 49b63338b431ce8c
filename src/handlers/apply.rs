//! # Public Apply Handler
//!
//! Unauthenticated read backing the `{base}/apply/{code}` page: resolves a
//! shareable code into the studio/project info and survey schema the
//! application form needs.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, not_found};
use crate::repositories::{CastingCodeRepository, ProjectRepository, StudioRepository};
use crate::server::AppState;

/// Public information about a casting code for the application form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyInfoDto {
    /// Shareable code string
    #[schema(example = "AB12CD")]
    pub code: String,
    /// Whether the code currently accepts submissions
    pub accepting_submissions: bool,
    /// Name of the studio behind the code
    pub studio_name: String,
    /// Name of the project the code funnels into, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Survey-field schema the form should render, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_fields: Option<serde_json::Value>,
}

/// Resolve a casting code into the public application-form info
#[utoipa::path(
    get,
    path = "/api/apply/{code}",
    params(("code" = String, Path, description = "Shareable casting code")),
    responses(
        (status = 200, description = "Application form info", body = ApplyInfoDto),
        (status = 404, description = "Casting code not found", body = ApiError)
    ),
    tag = "apply"
)]
pub async fn get_apply_info(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApplyInfoDto>, ApiError> {
    let codes = CastingCodeRepository::new(state.db.clone());
    let code = codes
        .find_by_code(&code)
        .await?
        .ok_or_else(|| not_found("CASTING_CODE_NOT_FOUND", "Casting code not found"))?;

    let studio = StudioRepository::new(state.db.clone())
        .find_by_id(code.studio_id)
        .await?
        .ok_or_else(|| not_found("STUDIO_NOT_FOUND", "Studio not found"))?;

    let project_name = match code.project_id {
        Some(project_id) => ProjectRepository::new(state.db.clone())
            .find_by_id(project_id)
            .await?
            .map(|p| p.name),
        None => None,
    };

    let accepting_submissions =
        crate::repositories::casting_code::is_usable(&code, chrono::Utc::now().into());

    Ok(Json(ApplyInfoDto {
        code: code.code,
        accepting_submissions,
        studio_name: studio.name,
        project_name,
        survey_fields: code.survey_fields,
    }))
}
