mod profiles;
mod scrape;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use spdb_core::{AppConfig, Platform};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Submissions with less HTML than this are rejected before extraction.
    pub min_html_len: usize,
    pub max_body_bytes: usize,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        Self {
            pool,
            min_html_len: config.min_html_len,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

/// Error envelope shared by every endpoint.
///
/// `success` is always `false`; `errors` carries the individual validation
/// problems and is omitted when there are none.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub meta: ResponseMeta,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
            errors: Vec::new(),
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "payload_too_large" => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    success: bool,
    status: &'static str,
    database: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    #[serde(flatten)]
    data: HealthData,
    meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
struct IndexResponse {
    name: &'static str,
    version: &'static str,
    endpoints: IndexEndpoints,
    supported_platforms: Vec<Platform>,
}

#[derive(Debug, Serialize)]
struct IndexEndpoints {
    health: &'static str,
    scrape_profile: &'static str,
    get_profiles: &'static str,
    supported_platforms: &'static str,
}

pub(super) fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(50).clamp(1, 200)
}

pub(super) fn map_db_error(request_id: String, error: &spdb_db::DbError) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::new(request_id, "internal_error", "database query failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/scrape-profile", post(scrape::scrape_profile))
        .route("/api/profiles/{platform}", get(profiles::list_profiles))
        .route(
            "/api/supported-platforms",
            get(profiles::supported_platforms),
        )
}

pub fn build_app(state: AppState) -> Router {
    let max_body_bytes = state.max_body_bytes;

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .merge(api_router())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
        .with_state(state)
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: "Social Profile Database API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: IndexEndpoints {
            health: "GET /health",
            scrape_profile: "POST /api/scrape-profile",
            get_profiles: "GET /api/profiles/{platform}",
            supported_platforms: "GET /api/supported-platforms",
        },
        supported_platforms: spdb_extract::supported_platforms().to_vec(),
    })
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match spdb_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                data: HealthData {
                    success: true,
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    data: HealthData {
                        success: false,
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

async fn not_found(Extension(req_id): Extension<RequestId>) -> ApiError {
    ApiError::new(req_id.0, "not_found", "Endpoint not found")
}
