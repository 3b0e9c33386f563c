use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client;
use crate::state::AppState;

/// GET /health
/// Returns a status object with the service version and active backends.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobtrack-api",
        "model": llm_client::MODEL,
        "sessions": state.sessions.backend(),
        "ranker": state.ranker.backend(),
    }))
}
