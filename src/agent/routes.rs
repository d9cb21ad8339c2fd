//! Internal HTTP surface of an agent instance
//!
//! The router forwards `/api/<op>` here as `/<op>`. Unknown paths and
//! methods answer 404 `Not found`. Bodies are decoded as JSON whatever their
//! content type and are never size-limited here.

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use crate::review::{HistoryResponse, ReviewRequest, ReviewResponse, SuggestionRequest, SuggestionResponse};
use super::ReviewAgent;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Build the request router for one agent
pub fn router(agent: Arc<ReviewAgent>) -> Router {
    Router::new()
        .route("/review", post(handle_review).fallback(not_found))
        .route("/history", get(handle_history).fallback(not_found))
        .route("/suggestions", post(handle_suggestions).fallback(not_found))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .with_state(agent)
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Decode a JSON body; invalid JSON or a missing field is a 400
fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: format!("Invalid request body: {}", e) }),
        )
    })
}

pub async fn handle_review(
    State(agent): State<Arc<ReviewAgent>>,
    body: Bytes,
) -> Result<Json<ReviewResponse>, ApiError> {
    let request: ReviewRequest = decode(&body)?;

    let record = agent.submit_review(request).await.map_err(|e| {
        tracing::error!("Review on agent '{}' failed: {}", agent.name(), e);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() }))
    })?;

    Ok(Json(ReviewResponse { feedback: record.feedback }))
}

pub async fn handle_history(State(agent): State<Arc<ReviewAgent>>) -> Json<HistoryResponse> {
    Json(HistoryResponse { history: agent.history().await })
}

pub async fn handle_suggestions(
    State(agent): State<Arc<ReviewAgent>>,
    body: Bytes,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let request: SuggestionRequest = decode(&body)?;
    let suggestions = agent.suggestions(&request.pattern).await;
    Ok(Json(SuggestionResponse { suggestions }))
}
