//! REST API for the inference pipeline.
//!
//! - `GET /` welcome message
//! - `GET /health` loaded model summary
//! - `POST /predict` run one prediction

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use creditscore_core::{CreditScoreError, CreditScorer, RawPayload};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;
use uuid::Uuid;

/// Header carrying the per-request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const WELCOME: &str = "Bienvenue sur la plateforme!";
const NOT_AN_OBJECT: &str = "Le corps de la requête doit être un objet JSON.";
const INTERNAL: &str = "Erreur interne du service.";

/// Shared application state.
pub struct AppState {
    pub scorer: CreditScorer,
}

impl AppState {
    pub fn new(scorer: CreditScorer) -> Self {
        Self { scorer }
    }
}

/// Builds the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn welcome() -> Json<Value> {
    Json(json!({ "Message": WELCOME }))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model: String,
    features: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.scorer.adapter().describe(),
        features: state.scorer.schema().len(),
    })
}

// The body is read as JSON whatever the declared content type.
async fn predict(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();

    let response = match parse_payload(&body) {
        Ok(payload) => match state.scorer.predict(&payload) {
            Ok(result) => (StatusCode::OK, Json(result)).into_response(),
            Err(e) => ApiError::Prediction(e).into_response_for(request_id),
        },
        Err(e) => e.into_response_for(request_id),
    };

    with_request_id(response, request_id)
}

fn parse_payload(body: &[u8]) -> Result<RawPayload, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::NotAnObject),
    }
}

fn with_request_id(mut response: Response, request_id: Uuid) -> Response {
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Failure of a `/predict` request.
#[derive(Debug)]
pub enum ApiError {
    /// The body is not a JSON object.
    NotAnObject,
    /// The pipeline rejected or failed the request.
    Prediction(CreditScoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotAnObject => StatusCode::BAD_REQUEST,
            ApiError::Prediction(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_response_for(self, request_id: Uuid) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotAnObject => json!({ "error": NOT_AN_OBJECT, "kind": "invalid_body" }),
            ApiError::Prediction(CreditScoreError::Validation(e)) => json!({
                "error": e.to_string(),
                "field": e.field(),
                "kind": e.kind(),
            }),
            ApiError::Prediction(e) => {
                error!(event = "request_failed", request_id = %request_id, error = %e);
                json!({ "error": INTERNAL, "kind": "internal" })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4();
        with_request_id(self.into_response_for(request_id), request_id)
    }
}
