use crate::controller::{ControlError, LightController};
use crate::light::{LightStateRequest, ValidationError};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};


/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<LightController>,
}

/// Uniform response envelope; the HTTP status always mirrors `code`.
///
/// This is the only place wire-format output is constructed, which keeps the
/// controller serialization-agnostic.
#[derive(Serialize)]
struct ApiResponse {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

fn envelope(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ApiResponse {
        code: status.as_u16(),
        message: message.into(),
        data: None,
    };
    (status, Json(body)).into_response()
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/light/state", post(update_light_state))
        .route("/health", get(health))
        .with_state(Arc::new(state))
}

/// GET /health - liveness probe
async fn health() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// POST /light/state - push a desired state to the configured light
async fn update_light_state(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: LightStateRequest =
        serde_json::from_slice(&body).map_err(|_| AppError::MalformedPayload)?;

    request.validate()?;

    state.controller.apply(&request).await.map_err(|e| {
        error!(error = %e, target_id = %state.controller.target_id(), "Failed to apply light state");
        AppError::from(e)
    })?;

    info!(
        target_id = %state.controller.target_id(),
        on = request.on,
        "Successfully updated light state"
    );

    Ok(envelope(StatusCode::OK, "Successfully updated light state"))
}

/// Application error types
enum AppError {
    MalformedPayload,
    Validation(ValidationError),
    Control(ControlError),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<ControlError> for AppError {
    fn from(e: ControlError) -> Self {
        AppError::Control(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MalformedPayload => {
                (StatusCode::BAD_REQUEST, "Invalid JSON payload".to_string())
            }
            AppError::Validation(ValidationError::OutOfRangeMirek(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid mirek value".to_string())
            }
            AppError::Validation(ValidationError::OutOfRangeBrightness(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid brightness value".to_string())
            }
            // An unresolved target stems from misconfiguration, not caller
            // input, so it is reported as a server-side condition
            AppError::Control(ControlError::TargetNotFound(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Target light not found".to_string(),
            ),
            AppError::Control(ControlError::GatewayUnavailable(cause)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to list lights. Error: {}", cause),
            ),
            AppError::Control(ControlError::UpdateFailed(cause)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update light state. Error: {}", cause),
            ),
        };
        envelope(status, message)
    }
}
