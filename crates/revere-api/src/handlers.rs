use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn status() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn version(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "version": state.build_version.as_ref() }))
}
