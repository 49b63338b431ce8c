//! # Feature Flag Handler
//!
//! Serves the effective flag set: durable rows overlaid on configured
//! defaults. When the table cannot be read the defaults are served alone so
//! clients still get a usable answer.

use std::collections::BTreeMap;

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::repositories::FeatureFlagRepository;
use crate::server::AppState;

/// Feature flag listing response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeatureFlagsResponseDto {
    /// Flag name to enabled state
    pub flags: BTreeMap<String, bool>,
}

/// List the effective feature flags
#[utoipa::path(
    get,
    path = "/api/feature-flags",
    responses(
        (status = 200, description = "Effective feature flags", body = FeatureFlagsResponseDto)
    ),
    tag = "feature-flags"
)]
pub async fn list_feature_flags(
    State(state): State<AppState>,
) -> Result<Json<FeatureFlagsResponseDto>, ApiError> {
    let repository = FeatureFlagRepository::new(state.db.clone());

    let flags = match repository
        .effective_flags(&state.config.feature_flag_defaults)
        .await
    {
        Ok(flags) => flags,
        Err(error) => {
            tracing::warn!(error = %error, "Falling back to configured feature-flag defaults");
            state.config.feature_flag_defaults.clone()
        }
    };

    Ok(Json(FeatureFlagsResponseDto { flags }))
}
