//! # External Actor Conversion Handler
//!
//! Triggered post-registration: converts any external-actor records matching
//! the authenticated profile's email or phone.

use axum::{extract::State, response::Json};

use crate::auth::ProfileExtension;
use crate::conversion::{ConversionService, ConversionSummary};
use crate::error::ApiError;
use crate::server::AppState;

/// Convert external actor records matching the authenticated profile
#[utoipa::path(
    get,
    path = "/api/auth/convert-external-actor",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Conversion summary (zero matches is not an error)", body = ConversionSummary),
        (status = 401, description = "Missing authentication or profile context", body = ApiError),
        (status = 404, description = "Profile not found", body = ApiError)
    ),
    tag = "conversion"
)]
pub async fn convert_external_actor(
    State(state): State<AppState>,
    ProfileExtension(profile): ProfileExtension,
) -> Result<Json<ConversionSummary>, ApiError> {
    let service = ConversionService::new(state.db.clone());
    let summary = service.convert_for_profile(profile.0).await?;

    Ok(Json(summary))
}
