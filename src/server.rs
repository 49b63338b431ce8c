//! # Server Configuration
//!
//! This module contains the server setup and configuration for the Callboard API.

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_middleware;
use crate::config::AppConfig;
use crate::handlers;
use crate::telemetry::{TraceContext, with_trace_context};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/auth/convert-external-actor",
            get(handlers::convert::convert_external_actor),
        )
        .route(
            "/api/studio/casting-codes",
            post(handlers::casting_codes::create_casting_code)
                .get(handlers::casting_codes::list_casting_codes),
        )
        .route(
            "/api/studio/casting-codes/qrcode",
            get(handlers::casting_codes::casting_code_qr),
        )
        .route(
            "/api/studio/casting-codes/{id}",
            patch(handlers::casting_codes::update_casting_code),
        )
        .route(
            "/api/studio/submissions",
            get(handlers::submissions::list_submissions),
        )
        .route(
            "/api/studio/submissions/{id}",
            patch(handlers::submissions::review_submission),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route(
            "/api/casting-submissions",
            post(handlers::submissions::submit_casting),
        )
        .route("/api/apply/{code}", get(handlers::apply::get_apply_info))
        .route(
            "/api/feature-flags",
            get(handlers::feature_flags::list_feature_flags),
        )
        .merge(protected)
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Assigns every request a trace ID (honoring an inbound `X-Trace-Id`) and
/// makes it available through task-local storage and the response headers.
async fn trace_context_middleware(mut request: Request, next: Next) -> Response {
    let trace_id = request
        .headers()
        .get("x-trace-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let context = TraceContext {
        trace_id: trace_id.clone(),
    };
    request.extensions_mut().insert(context.clone());

    let mut response = with_trace_context(context, next.run(request)).await;

    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert("x-trace-id", value);
    }

    response
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(config),
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::submissions::submit_casting,
        crate::handlers::submissions::list_submissions,
        crate::handlers::submissions::review_submission,
        crate::handlers::casting_codes::create_casting_code,
        crate::handlers::casting_codes::list_casting_codes,
        crate::handlers::casting_codes::update_casting_code,
        crate::handlers::casting_codes::casting_code_qr,
        crate::handlers::apply::get_apply_info,
        crate::handlers::convert::convert_external_actor,
        crate::handlers::feature_flags::list_feature_flags,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::handlers::HealthResponse,
            crate::handlers::types::CastingCodeDto,
            crate::handlers::types::SubmissionDto,
            crate::handlers::types::UserDataDto,
            crate::handlers::submissions::SubmitCastingRequestDto,
            crate::handlers::submissions::SubmitCastingResponseDto,
            crate::handlers::submissions::ReviewSubmissionRequestDto,
            crate::handlers::casting_codes::CreateCastingCodeRequestDto,
            crate::handlers::casting_codes::UpdateCastingCodeRequestDto,
            crate::handlers::casting_codes::QrCodeResponseDto,
            crate::handlers::apply::ApplyInfoDto,
            crate::handlers::feature_flags::FeatureFlagsResponseDto,
            crate::conversion::ConversionSummary,
            crate::conversion::ConversionRecord,
            crate::error::ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Callboard API",
        description = "Casting-code intake and external-actor reconciliation API",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
