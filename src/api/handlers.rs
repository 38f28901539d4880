use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{debug, error, info, instrument};

use super::error::ApiError;
use super::state::AppState;
use crate::bulk::{Batch, BulkRequest, dispatch};

pub const INVALID_SYNTAX_MESSAGE: &str = "email address syntax is invalid";

/// `GET /v1/:email/verification`
#[instrument(skip_all, fields(email = %email))]
pub async fn verify_single(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Response, ApiError> {
    if !state.config.sender.is_configured() {
        return Err(ApiError::Internal(
            "FROM_EMAIL and HELO_NAME must be set".to_string(),
        ));
    }

    let verifier = Arc::clone(&state.verifier);
    let result = tokio::task::spawn_blocking(move || verifier.verify(&email))
        .await
        .map_err(|err| ApiError::Internal(format!("verification task failed: {err}")))?
        .map_err(|err| {
            info!(error = %err, "verification failed");
            ApiError::Verification(err.to_string())
        })?;

    if !result.syntax.valid {
        return Ok(INVALID_SYNTAX_MESSAGE.into_response());
    }
    debug!(reachable = ?result.reachable, "verification finished");
    Ok(Json(result).into_response())
}

/// `POST /v1/bulk`
#[instrument(skip_all)]
pub async fn verify_bulk(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let request: BulkRequest = serde_json::from_slice(&body).map_err(|err| {
        debug!(error = %err, "undecodable bulk request");
        ApiError::BadRequest("Invalid request format".to_string())
    })?;
    let batch = Batch::new(request.emails, state.config.max_batch)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    info!(count = batch.len(), "bulk verification requested");
    let outcomes = dispatch(batch, Arc::clone(&state.verifier)).await;

    let payload = serde_json::to_vec(&outcomes).map_err(|err| {
        error!(error = %err, "cannot serialize bulk outcomes");
        ApiError::Internal("Failed to format response".to_string())
    })?;
    Ok(([(CONTENT_TYPE, "application/json")], payload).into_response())
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
