//! # Authentication and Authorization
//!
//! Session issuance lives in the external auth service; requests arrive with
//! a gateway bearer token plus identity headers. This module validates the
//! bearer token (constant-time) and exposes typed extractors for the studio
//! tenancy header (`X-Studio-Id`) and the authenticated profile header
//! (`X-Profile-Id`).

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ApiError, unauthorized, unauthorized_with_trace_id, validation_error};
use crate::server::AppState;
use crate::telemetry::TraceContext;

/// Studio ID wrapper for type safety
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudioId(pub Uuid);

/// Profile ID wrapper for type safety
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileId(pub Uuid);

/// Marker type for requests that passed bearer authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceAuth;

/// Extractor for the studio tenancy context
#[derive(Debug, Clone)]
pub struct StudioExtension(pub StudioId);

/// Extractor for the authenticated profile context
#[derive(Debug, Clone)]
pub struct ProfileExtension(pub ProfileId);

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Authentication middleware validating the gateway bearer token and parsing
/// whatever identity headers are present.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = request.headers().clone();

    // Extract trace_id from request context for consistent error responses
    let trace_id = request
        .extensions()
        .get::<TraceContext>()
        .map(|ctx| ctx.trace_id.clone());

    let token = extract_bearer_token_with_trace_id(&headers, trace_id)?;
    validate_token(&config, token)?;

    let mut request = request;
    request.extensions_mut().insert(ServiceAuth);

    if let Some(studio) = extract_header_uuid(&headers, "X-Studio-Id")? {
        tracing::info!(studio_id = %studio, "Authenticated studio request");
        request
            .extensions_mut()
            .insert(StudioExtension(StudioId(studio)));
    }

    if let Some(profile) = extract_header_uuid(&headers, "X-Profile-Id")? {
        request
            .extensions_mut()
            .insert(ProfileExtension(ProfileId(profile)));
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token_with_trace_id(
    headers: &HeaderMap,
    trace_id: Option<String>,
) -> Result<&str, ApiError> {
    let with_trace = |message: &str, trace_id: &Option<String>| match trace_id {
        Some(trace_id) => unauthorized_with_trace_id(Some(message), trace_id.clone()),
        None => unauthorized(Some(message)),
    };

    headers
        .get(AUTHORIZATION)
        .ok_or_else(|| with_trace("Missing Authorization header", &trace_id))
        .and_then(|value| {
            value
                .to_str()
                .map_err(|_| with_trace("Invalid Authorization header", &trace_id))
        })
        .and_then(|header| {
            header
                .strip_prefix("Bearer ")
                .ok_or_else(|| with_trace("Authorization header must use Bearer scheme", &trace_id))
        })
}

fn validate_token(config: &AppConfig, token: &str) -> Result<(), ApiError> {
    let is_valid = config
        .service_tokens
        .iter()
        .any(|configured| ConstantTimeEq::ct_eq(token.as_bytes(), configured.as_bytes()).into());

    if is_valid {
        Ok(())
    } else {
        Err(unauthorized(Some("Invalid bearer token")))
    }
}

fn extract_header_uuid(headers: &HeaderMap, name: &'static str) -> Result<Option<Uuid>, ApiError> {
    let Some(header_value) = headers.get(name) else {
        return Ok(None);
    };

    let value = header_value.to_str().map_err(|_| {
        validation_error(
            "Invalid identity header",
            serde_json::json!({ name: "Header must be valid UTF-8" }),
        )
    })?;

    value.parse::<Uuid>().map(Some).map_err(|_| {
        validation_error(
            "Invalid identity header",
            serde_json::json!({ name: "Must be a valid UUID" }),
        )
    })
}

/// OpenAPI header parameter for X-Studio-Id
#[derive(Debug, Serialize, Deserialize, IntoParams, utoipa::ToSchema)]
#[into_params(parameter_in = Header)]
pub struct StudioHeader {
    /// Studio identifier (UUID) that scopes the request to a studio tenant
    #[serde(rename = "X-Studio-Id")]
    #[param(rename = "X-Studio-Id", value_type = String)]
    pub studio_id: String,
}

impl<S> FromRequestParts<S> for StudioExtension
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<StudioExtension>()
            .cloned()
            .ok_or_else(|| {
                validation_error(
                    "Studio context missing",
                    serde_json::json!({ "X-Studio-Id": "Required header is missing" }),
                )
            })
    }
}

impl<S> FromRequestParts<S> for ProfileExtension
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ProfileExtension>()
            .cloned()
            .ok_or_else(|| unauthorized(Some("Authenticated profile context required")))
    }
}

impl<S> FromRequestParts<S> for ServiceAuth
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ServiceAuth>()
            .copied()
            .ok_or_else(|| unauthorized(Some("Service authentication required")))
    }
}
