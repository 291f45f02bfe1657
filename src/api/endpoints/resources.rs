//! Resource links endpoint.
//!
//! `GET /api/resources`: doctor search, CDC, education, video and chatbot
//! links for the active profile's illness.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::resources::ResourceLinks;

pub async fn links(State(ctx): State<ApiContext>) -> Result<Json<ResourceLinks>, ApiError> {
    Ok(Json(ctx.core.resource_links()?))
}
