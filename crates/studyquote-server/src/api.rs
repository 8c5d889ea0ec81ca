//! HTTP API for the StudyQuote pricing service.
//!
//! Every request is independent; handlers only read the immutable
//! [`AppState`] and call the pure functions in `studyquote_pricing`.
//!
//! # Endpoints
//!
//! - `POST /pricing/estimate` - Recommended price for a task
//! - `POST /pricing/validate` - Classify a proposed price against the estimate
//! - `POST /pricing/review` - Submission gate (proceed or confirm)
//! - `GET /pricing/tables` - Rate tables and calculator metadata
//! - `GET /portal` - Portal presentation details
//! - `GET /health` - Liveness and uptime
//!
//! # Example
//!
//! ```no_run
//! use studyquote_server::{create_router, AppState, Config};
//!
//! # async fn example() {
//! let router = create_router(AppState::new(Config::default()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5050").await.unwrap();
//! axum::serve(listener, router).await.unwrap();
//! # }
//! ```

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studyquote_pricing::{self as pricing, BudgetCheck, PricingParams, RateSheet, Review};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::portal::{Portal, PortalInfo};
use crate::Config;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response body for `POST /pricing/estimate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    /// The recommended price.
    pub estimated_price: i64,
}

/// Request body for `POST /pricing/validate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    /// The price the user proposes.
    pub user_price: f64,
    /// Task parameters the estimate is computed from.
    #[serde(flatten)]
    pub params: PricingParams,
}

/// Request body for `POST /pricing/review`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// The price the user proposes.
    pub user_price: f64,
    /// Skip validation; set when the user already confirmed their price.
    #[serde(default)]
    pub force: bool,
    /// Task parameters the estimate is computed from.
    #[serde(flatten)]
    pub params: PricingParams,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// The portal this process serves.
    pub portal: Portal,
    /// When the server started.
    pub started_at: DateTime<Utc>,
    /// Seconds since start.
    pub uptime_seconds: i64,
}

/// Error response body returned on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Description of the error.
    pub error: String,
}

// ============================================================================
// Application State
// ============================================================================

/// Shared, read-only application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// When this state was created.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates a new `AppState` with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            started_at: Utc::now(),
        }
    }
}

// ============================================================================
// API Error Type
// ============================================================================

/// Internal error type for API handlers.
#[derive(Debug)]
enum ApiError {
    /// The request body could not be decoded.
    InvalidBody(JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
        };

        warn!(status = %status, error = %message, "Rejected request");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the HTTP router with all API endpoints.
///
/// # Returns
///
/// An axum `Router` configured with:
/// - Pricing routes under `/pricing`
/// - `/portal` and `/health`
/// - CORS middleware (any origin, for the browser portals)
/// - Tracing middleware for request logging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pricing_routes = Router::new()
        .route("/estimate", post(handle_estimate))
        .route("/validate", post(handle_validate))
        .route("/review", post(handle_review))
        .route("/tables", get(handle_tables));

    Router::new()
        .nest("/pricing", pricing_routes)
        .route("/portal", get(handle_portal))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for `POST /pricing/estimate`.
async fn handle_estimate(
    payload: Result<Json<PricingParams>, JsonRejection>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let Json(params) = payload?;

    let estimated_price = pricing::estimate(&params);

    info!(
        level = %params.level,
        category = %params.category,
        urgency = %params.urgency,
        estimated_price,
        "Estimate computed"
    );

    Ok(Json(EstimateResponse { estimated_price }))
}

/// Handler for `POST /pricing/validate`.
async fn handle_validate(
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<BudgetCheck>, ApiError> {
    let Json(request) = payload?;

    let estimate = pricing::estimate(&request.params);
    let check = pricing::validate(request.user_price, estimate);

    info!(
        user_price = request.user_price,
        estimate,
        status = %check.status,
        "Budget validated"
    );

    Ok(Json(check))
}

/// Handler for `POST /pricing/review`.
///
/// Re-checks a price server-side before an order is created.
async fn handle_review(
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<Review>, ApiError> {
    let Json(request) = payload?;

    let estimate = pricing::estimate(&request.params);
    let review = pricing::review(request.user_price, estimate, request.force);

    info!(
        user_price = request.user_price,
        estimate,
        force = request.force,
        decision = ?review,
        "Submission reviewed"
    );

    Ok(Json(review))
}

/// Handler for `GET /pricing/tables`.
async fn handle_tables() -> Json<RateSheet> {
    Json(RateSheet::builtin())
}

/// Handler for `GET /portal`.
async fn handle_portal(State(state): State<Arc<AppState>>) -> Json<PortalInfo> {
    Json(state.config.portal.info())
}

/// Handler for `GET /health`.
async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let uptime = Utc::now() - state.started_at;
    Json(HealthResponse {
        status: "ok".to_string(),
        portal: state.config.portal,
        started_at: state.started_at,
        uptime_seconds: uptime.num_seconds(),
    })
}

// ============================================================================
// Tests
// ============================================================================
