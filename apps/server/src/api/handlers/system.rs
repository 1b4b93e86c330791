//! Health endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{state::AppState, Result};

/// Liveness/readiness probe; verifies the database is reachable.
pub async fn health(State(state): State<AppState>) -> Result<Response> {
    sqlx::query("SELECT 1").execute(&state.db_pool).await?;

    Ok((StatusCode::OK, Json(json!({ "status": "ok" }))).into_response())
}
