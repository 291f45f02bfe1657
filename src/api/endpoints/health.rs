//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub session_active: bool,
    pub version: &'static str,
}

/// `GET /api/health`: liveness check.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        session_active: ctx.core.is_active(),
        version: crate::config::APP_VERSION,
    })
}
