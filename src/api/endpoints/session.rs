//! Session endpoints.
//!
//! - `GET /api/illnesses`: chronic-illness picklist
//! - `POST /api/session/register`: start a session
//! - `POST /api/session/logout`: end it
//! - `GET /api/session`: active profile summary

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{resolve_illness, ChronicCondition};
use crate::session::{RegistrationConfirmation, SessionSummary};

pub const LOGOUT_MESSAGE: &str = "You have successfully logged out.";

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// One of the picklist labels, e.g. "Heart Disease" or "Other".
    pub chronic_illness: String,
    /// Free-text condition, used only with "Other".
    #[serde(default)]
    pub other_condition: Option<String>,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
    pub message: &'static str,
}

/// `GET /api/illnesses`
pub async fn illnesses() -> Json<Vec<&'static str>> {
    Json(ChronicCondition::ALL.iter().map(|c| c.as_str()).collect())
}

/// Boundary checks shared by the JSON and form registration routes.
pub(crate) fn register_with(
    ctx: &ApiContext,
    req: &RegisterRequest,
) -> Result<RegistrationConfirmation, ApiError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username is required".into()));
    }
    let condition = ChronicCondition::from_str(req.chronic_illness.trim())?;
    let illness = resolve_illness(condition, req.other_condition.as_deref());

    Ok(ctx.core.register(username, &req.password, &illness)?)
}

/// `POST /api/session/register`
pub async fn register(
    State(ctx): State<ApiContext>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegistrationConfirmation>, ApiError> {
    let Json(req) = payload?;
    register_with(&ctx, &req).map(Json)
}

/// `POST /api/session/logout`: succeeds with or without a session.
pub async fn logout(State(ctx): State<ApiContext>) -> Result<Json<LogoutResponse>, ApiError> {
    let logged_out = ctx.core.logout()?;
    Ok(Json(LogoutResponse {
        logged_out,
        message: LOGOUT_MESSAGE,
    }))
}

/// `GET /api/session`
pub async fn current(State(ctx): State<ApiContext>) -> Result<Json<SessionSummary>, ApiError> {
    Ok(Json(ctx.core.summary()?))
}
