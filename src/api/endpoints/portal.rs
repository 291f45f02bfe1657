//! HTML portal routes.
//!
//! - `GET /`: registration form, or the portal once a session exists
//! - `POST /register`, `POST /record`, `POST /logout`: form posts that
//!   redirect back to `/` with a notice code

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use crate::api::endpoints::session::{register_with, RegisterRequest, LOGOUT_MESSAGE};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::journal::RECORD_SUCCESS_MESSAGE;
use crate::models::Severity;
use crate::portal::{render_portal_page, render_registration_page};
use crate::session::registration_message;

#[derive(Debug, Default, Deserialize)]
pub struct PortalQuery {
    /// Show the chart and suggestion.
    #[serde(default)]
    pub graph: bool,
    /// One of `registered`, `recorded`, `logged_out`.
    #[serde(default)]
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordForm {
    #[serde(default)]
    pub symptom: String,
    pub severity: String,
    #[serde(default)]
    pub notes: String,
}

/// `GET /`
pub async fn index(
    State(ctx): State<ApiContext>,
    query: Result<Query<PortalQuery>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    let Query(query) = query?;
    let Some(mut view) = ctx.core.portal_view(query.graph)? else {
        let notice = (query.notice.as_deref() == Some("logged_out")).then_some(LOGOUT_MESSAGE);
        return Ok(Html(render_registration_page(notice)));
    };

    view.notice = match query.notice.as_deref() {
        Some("registered") => Some(registration_message(
            &view.summary.username,
            &view.summary.chronic_illness,
        )),
        Some("recorded") => Some(RECORD_SUCCESS_MESSAGE.to_string()),
        _ => None,
    };

    Ok(Html(render_portal_page(&view, &ctx.theme)))
}

/// `POST /register`
pub async fn register(
    State(ctx): State<ApiContext>,
    form: Result<Form<RegisterRequest>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(req) = form?;
    register_with(&ctx, &req)?;
    Ok(Redirect::to("/?notice=registered"))
}

/// `POST /record`: severity arrives as text and is parsed here.
pub async fn record(
    State(ctx): State<ApiContext>,
    form: Result<Form<RecordForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    let raw: i32 = form.severity.trim().parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "Severity must be a whole number, got {:?}",
            form.severity
        ))
    })?;
    let severity = Severity::bounded(raw)?;
    ctx.core.submit_entry(&form.symptom, severity, &form.notes)?;
    Ok(Redirect::to("/?notice=recorded"))
}

/// `POST /logout`
pub async fn logout(State(ctx): State<ApiContext>) -> Result<Redirect, ApiError> {
    ctx.core.logout()?;
    Ok(Redirect::to("/?notice=logged_out"))
}
