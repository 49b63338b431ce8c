//! # Casting Code Handlers
//!
//! Studio-side management of shareable casting codes: creation, listing,
//! activation toggling, and QR rendering.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::StudioExtension;
use crate::error::{ApiError, forbidden, not_found, validation_error};
use crate::handlers::types::CastingCodeDto;
use crate::qr::{self, DEFAULT_QR_SIZE, QrError};
use crate::repositories::casting_code::CreateCastingCodeRequest;
use crate::repositories::{CastingCodeRepository, ProjectRepository};
use crate::server::AppState;

/// Request payload for creating a casting code
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCastingCodeRequestDto {
    /// Project the code should funnel applicants into (optional)
    pub project_id: Option<Uuid>,
    /// Expiry timestamp (optional, must be in the future)
    pub expires_at: Option<DateTime<Utc>>,
    /// Survey-field schema applicants answer against (optional)
    pub survey_fields: Option<serde_json::Value>,
}

/// Create a casting code for the authenticated studio
#[utoipa::path(
    post,
    path = "/api/studio/casting-codes",
    security(("bearer_auth" = [])),
    params(crate::auth::StudioHeader),
    request_body = CreateCastingCodeRequestDto,
    responses(
        (status = 201, description = "Casting code created", body = CastingCodeDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Project not found for this studio", body = ApiError)
    ),
    tag = "casting-codes"
)]
pub async fn create_casting_code(
    State(state): State<AppState>,
    StudioExtension(studio): StudioExtension,
    Json(request): Json<CreateCastingCodeRequestDto>,
) -> Result<(StatusCode, Json<CastingCodeDto>), ApiError> {
    if let Some(expires_at) = request.expires_at
        && expires_at <= Utc::now()
    {
        return Err(validation_error(
            "Expiry must be in the future",
            json!({ "expiresAt": "Timestamp is already in the past" }),
        ));
    }

    // A code may only funnel into a project the studio owns.
    if let Some(project_id) = request.project_id {
        let project = ProjectRepository::new(state.db.clone())
            .find_by_id(project_id)
            .await?
            .filter(|p| p.studio_id == studio.0);

        if project.is_none() {
            return Err(not_found("PROJECT_NOT_FOUND", "Project not found"));
        }
    }

    let repository = CastingCodeRepository::new(state.db.clone());
    let code = repository
        .create(
            studio.0,
            CreateCastingCodeRequest {
                project_id: request.project_id,
                expires_at: request.expires_at.map(Into::into),
                survey_fields: request.survey_fields,
            },
            state.config.casting_code_length,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(code.into())))
}

/// List casting codes for the authenticated studio
#[utoipa::path(
    get,
    path = "/api/studio/casting-codes",
    security(("bearer_auth" = [])),
    params(crate::auth::StudioHeader),
    responses(
        (status = 200, description = "Casting codes for the studio", body = [CastingCodeDto]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "casting-codes"
)]
pub async fn list_casting_codes(
    State(state): State<AppState>,
    StudioExtension(studio): StudioExtension,
) -> Result<Json<Vec<CastingCodeDto>>, ApiError> {
    let repository = CastingCodeRepository::new(state.db.clone());
    let codes = repository.list_for_studio(studio.0).await?;

    Ok(Json(codes.into_iter().map(Into::into).collect()))
}

/// Request payload for toggling a casting code
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCastingCodeRequestDto {
    /// New active state for the code
    pub is_active: bool,
}

/// Toggle the active flag on a studio-owned casting code
#[utoipa::path(
    patch,
    path = "/api/studio/casting-codes/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Casting code ID"),
        crate::auth::StudioHeader
    ),
    request_body = UpdateCastingCodeRequestDto,
    responses(
        (status = 200, description = "Casting code updated", body = CastingCodeDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Casting code not found for this studio", body = ApiError)
    ),
    tag = "casting-codes"
)]
pub async fn update_casting_code(
    State(state): State<AppState>,
    StudioExtension(studio): StudioExtension,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCastingCodeRequestDto>,
) -> Result<Json<CastingCodeDto>, ApiError> {
    let repository = CastingCodeRepository::new(state.db.clone());
    let updated = repository
        .set_active(id, studio.0, request.is_active)
        .await?
        .ok_or_else(|| not_found("CASTING_CODE_NOT_FOUND", "Casting code not found"))?;

    Ok(Json(updated.into()))
}

/// Query parameters for QR rendering
#[derive(Debug, Deserialize, IntoParams)]
pub struct QrCodeQuery {
    /// Shareable code string to render
    pub code: String,
    /// Edge length in pixels (default 256)
    pub size: Option<u32>,
}

/// Response payload for a rendered QR code
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponseDto {
    /// SVG image packaged as a data URL
    pub qr_data_url: String,
    /// Canonical public application URL encoded in the image
    #[schema(example = "https://callboard.example/apply/AB12CD")]
    pub apply_url: String,
}

/// Render a QR image for a studio-owned casting code
#[utoipa::path(
    get,
    path = "/api/studio/casting-codes/qrcode",
    security(("bearer_auth" = [])),
    params(QrCodeQuery, crate::auth::StudioHeader),
    responses(
        (status = 200, description = "QR image and application URL", body = QrCodeResponseDto),
        (status = 400, description = "Invalid size parameter", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Code belongs to another studio", body = ApiError),
        (status = 404, description = "Casting code not found", body = ApiError),
        (status = 500, description = "QR rendering failed", body = ApiError)
    ),
    tag = "casting-codes"
)]
pub async fn casting_code_qr(
    State(state): State<AppState>,
    StudioExtension(studio): StudioExtension,
    Query(query): Query<QrCodeQuery>,
) -> Result<Json<QrCodeResponseDto>, ApiError> {
    let repository = CastingCodeRepository::new(state.db.clone());
    let code = repository
        .find_by_code(&query.code)
        .await?
        .ok_or_else(|| not_found("CASTING_CODE_NOT_FOUND", "Casting code not found"))?;

    if code.studio_id != studio.0 {
        return Err(forbidden(Some("Casting code belongs to another studio")));
    }

    let apply_url = qr::apply_url(&state.config.public_base_url, &code.code);
    let size = query.size.unwrap_or(DEFAULT_QR_SIZE);

    let qr_data_url = qr::render_data_url(&apply_url, size).map_err(|error| match error {
        QrError::SizeOutOfRange(_) => {
            validation_error("Invalid QR size", json!({ "size": error.to_string() }))
        }
        QrError::Encode(_) => {
            tracing::error!(error = %error, code = %code.code, "QR rendering failed");
            ApiError::from(anyhow::Error::from(error))
        }
    })?;

    Ok(Json(QrCodeResponseDto {
        qr_data_url,
        apply_url,
    }))
}
