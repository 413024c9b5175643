//! HTTP endpoint in front of the dispatcher.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{Dispatcher, Result, SearchError};

/// Query parameters for `/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query.
    pub q: Option<String>,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Builds the router serving `/search` and `/health`.
pub fn create_router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/health", get(health))
        .with_state(dispatcher)
}

async fn search(
    State(dispatcher): State<Arc<Dispatcher>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    match dispatcher.perform_search(&query).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Serves the router on `addr` until the process is stopped.
pub async fn serve(addr: SocketAddr, dispatcher: Arc<Dispatcher>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SearchError::Other(format!("Failed to bind {}: {}", addr, e)))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, create_router(dispatcher))
        .await
        .map_err(|e| SearchError::Other(format!("Server error: {}", e)))
}
