mod image_search;
mod restaurants;
mod search;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use dinescout_core::{AppConfig, QueryError, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SEARCH_RADIUS};
use dinescout_db::{DbError, RestaurantStore};
use dinescout_vision::{ImageClassifier, VisionError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

/// Request-independent settings the handlers read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApiSettings {
    pub default_search_radius: f64,
    pub max_upload_bytes: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            default_search_radius: DEFAULT_SEARCH_RADIUS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ApiSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            default_search_radius: config.default_search_radius,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RestaurantStore>,
    /// `None` when no classifier is configured; image search then answers 503.
    pub classifier: Option<Arc<dyn ImageClassifier>>,
    pub settings: ApiSettings,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    success: bool,
    pub code: String,
    pub message: String,
    pub request_id: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
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
            request_id: request_id.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "payload_too_large" => StatusCode::PAYLOAD_TOO_LARGE,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: String, error: &DbError) -> ApiError {
    tracing::error!(error = %error, "restaurant store query failed");
    ApiError::new(request_id, "internal_error", "failed to fetch restaurants")
}

pub(super) fn map_query_error(request_id: String, error: &QueryError) -> ApiError {
    tracing::debug!(error = %error, "rejected search parameters");
    ApiError::new(request_id, "validation_error", error.to_string())
}

pub(super) fn map_vision_error(request_id: String, error: &VisionError) -> ApiError {
    tracing::error!(error = %error, "image classification failed");
    ApiError::new(request_id, "upstream_error", "image analysis failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    let body_limit = state.settings.max_upload_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/restaurants", get(restaurants::list_restaurants))
        .route("/restaurants/{id}", get(restaurants::get_restaurant))
        .route("/restaurants-by-cuisine", get(search::search_by_cuisine))
        .route("/location", get(search::search_by_location))
        .route("/search-by-image", post(image_search::search_by_image))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
