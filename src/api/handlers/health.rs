//! Liveness endpoint.

use crate::api::state::AppState;
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// `GET /health` — unauthenticated liveness probe.
#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": state.clock.utc(),
    }))
}
