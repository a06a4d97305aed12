// src/web/api.rs
// REST API handlers

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::ClassifyError;
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Classify and dispatch a request. Always 200; the outcome carries its own status.
pub async fn process(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    Json(state.dispatcher.dispatch(&req.query).await)
}

/// Extract a structured device command without dispatching it
pub async fn extract(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    match state.extractor.extract(&req.query).await {
        Ok(command) => (StatusCode::OK, Json(json!(command))),
        Err(e @ ClassifyError::EmptyInput) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": e.to_string()})),
        ),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"status": "error", "message": e.to_string()})),
        ),
    }
}

pub async fn list_devices(State(state): State<AppState>) -> impl IntoResponse {
    let Some(backend) = state.devices.as_ref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "error", "message": "device backend not configured"})),
        );
    };

    match backend.list_devices().await {
        Ok(devices) => (StatusCode::OK, Json(json!(devices))),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({"status": "error", "message": e.to_user_string()})),
        ),
    }
}
