//! Root and health endpoints (no authentication).

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "API de Controle de Estoque" }))
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub ws_clients: usize,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = state.db.health_check().await;
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        ws_clients: state.hub.client_count().await,
        version: env!("CARGO_PKG_VERSION"),
    })
}
