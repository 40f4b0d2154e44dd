//! Request handlers and the error → response mapping.

use crate::error::Error;
use crate::predictor::IngestOutcome;
use crate::sessions::{SessionRegistry, DEFAULT_SESSION};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::MissingInput | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Error::Classification(_)
            | Error::Configuration(_)
            | Error::Io(_)
            | Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Pull the sample out of `{"ecg_value": <number>}`. Absent or null is missing input.
fn sample_from(body: &Value) -> Result<f64, Error> {
    match body.get("ecg_value") {
        None | Some(Value::Null) => Err(Error::MissingInput),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| Error::InvalidInput("ECG value must be a number".into())),
    }
}

/// Optional `session_id`; anything but a string is rejected rather than defaulted.
fn session_from(body: &Value) -> Result<String, Error> {
    match body.get("session_id") {
        None | Some(Value::Null) => Ok(DEFAULT_SESSION.to_string()),
        Some(Value::String(id)) => Ok(id.clone()),
        Some(_) => Err(Error::InvalidInput("session_id must be a string".into())),
    }
}

pub async fn health_handler(State(registry): State<Arc<SessionRegistry>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: registry.len(),
    })
}

/// `POST /predict`. Inference runs on the blocking pool; the session lock is
/// held for the whole push-scale-classify sequence.
pub async fn predict_handler(
    State(registry): State<Arc<SessionRegistry>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<IngestOutcome>, Error> {
    let Json(body) = payload.map_err(|e| Error::InvalidInput(e.body_text()))?;
    let sample = sample_from(&body)?;
    let session = session_from(&body)?;

    let outcome = tokio::task::spawn_blocking(move || registry.ingest(&session, sample))
        .await
        .map_err(|e| Error::Classification(format!("inference task failed: {}", e)))??;
    Ok(Json(outcome))
}

pub async fn create_session_handler(
    State(registry): State<Arc<SessionRegistry>>,
) -> Result<impl IntoResponse, Error> {
    let session_id = registry.create()?;
    Ok((StatusCode::CREATED, Json(SessionCreated { session_id })))
}

pub async fn delete_session_handler(
    State(registry): State<Arc<SessionRegistry>>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    registry.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
