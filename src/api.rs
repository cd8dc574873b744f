// 🌐 REST API - axum router over the SWIFT service
// Maps service errors to the client-facing status/message pairs

use crate::error::SwiftError;
use crate::model::{CountrySwiftCodes, NewSwiftCode, SwiftCodeDetails};
use crate::service::SwiftService;
use crate::validator::ValidationError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

pub const MSG_CREATED: &str = "SWIFT code added successfully.";
pub const MSG_DELETED: &str = "SWIFT code deleted successfully.";
pub const MSG_ALREADY_EXISTS: &str = "SWIFT code already exists.";
pub const MSG_NOT_FOUND: &str = "SWIFT code not found";
pub const MSG_VALIDATION_FAILED: &str = "Validation failed.";

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: SwiftService,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ValidationError>,
}

// ============================================================================
// Error mapping
// ============================================================================

/// Service error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub SwiftError);

impl From<SwiftError> for ApiError {
    fn from(err: SwiftError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self.0 {
            SwiftError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, MSG_VALIDATION_FAILED, errors)
            }
            SwiftError::DuplicateKey(_) => (StatusCode::BAD_REQUEST, MSG_ALREADY_EXISTS, vec![]),
            SwiftError::NotFound(_) => (StatusCode::NOT_FOUND, MSG_NOT_FOUND, vec![]),
            other => {
                error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    vec![],
                )
            }
        };

        let body = ErrorResponse {
            message: message.to_string(),
            errors,
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /v1/swift-codes/:swift_code - Details, plus branches for a headquarters
async fn get_swift_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<SwiftCodeDetails>, ApiError> {
    let details = state.service.get_by_code(&swift_code)?;
    Ok(Json(details))
}

/// GET /v1/swift-codes/country/:country_iso2 - All codes for a country
async fn get_swift_codes_by_country(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> Result<Json<CountrySwiftCodes>, ApiError> {
    let listing = state.service.list_by_country(&country_iso2)?;
    Ok(Json(listing))
}

/// POST /v1/swift-codes - Create a code
async fn create_swift_code(
    State(state): State<AppState>,
    Json(input): Json<NewSwiftCode>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.service.create(&input)?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new(MSG_CREATED))))
}

/// DELETE /v1/swift-codes/:swift_code - Remove a code
async fn delete_swift_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.service.delete(&swift_code)?;
    Ok(Json(MessageResponse::new(MSG_DELETED)))
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(service: SwiftService) -> Router {
    let state = AppState { service };

    let api_routes = Router::new()
        .route("/swift-codes", post(create_swift_code))
        .route(
            "/swift-codes/:swift_code",
            get(get_swift_code).delete(delete_swift_code),
        )
        .route(
            "/swift-codes/country/:country_iso2",
            get(get_swift_codes_by_country),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .nest("/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
