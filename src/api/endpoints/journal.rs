//! Journal endpoints.
//!
//! - `POST /api/journal/record`: record a symptom entry
//! - `GET /api/journal/log`: entries in insertion order
//! - `GET /api/journal/series`: entries in date order
//! - `GET /api/journal/graph`: chart geometry or a no-data notice
//! - `GET /api/journal/graph.svg`: chart as SVG
//! - `GET /api/journal/suggestion`: trend suggestion

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chart::GraphOutcome;
use crate::journal::{RecordConfirmation, SeriesPoint, SymptomInput};
use crate::models::{Severity, SymptomEntry};
use crate::trend::Suggestion;

/// `POST /api/journal/record`: record a new symptom.
///
/// Severity is range-checked here; symptom and notes pass through as-is.
/// A body that does not parse (e.g. a fractional severity) is a 400.
pub async fn record(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SymptomInput>, JsonRejection>,
) -> Result<Json<RecordConfirmation>, ApiError> {
    let Json(input) = payload?;
    let severity = Severity::bounded(input.severity)?;
    let confirmation = ctx.core.submit_entry(&input.symptom, severity, &input.notes)?;
    Ok(Json(confirmation))
}

#[derive(Serialize)]
pub struct LogResponse {
    pub entries: Vec<SymptomEntry>,
}

/// `GET /api/journal/log`
pub async fn log(State(ctx): State<ApiContext>) -> Result<Json<LogResponse>, ApiError> {
    Ok(Json(LogResponse {
        entries: ctx.core.log_table()?,
    }))
}

#[derive(Serialize)]
pub struct SeriesResponse {
    pub series: Vec<SeriesPoint>,
}

/// `GET /api/journal/series`
pub async fn series(State(ctx): State<ApiContext>) -> Result<Json<SeriesResponse>, ApiError> {
    Ok(Json(SeriesResponse {
        series: ctx.core.chronological_series()?,
    }))
}

/// `GET /api/journal/graph`
pub async fn graph(State(ctx): State<ApiContext>) -> Result<Json<GraphOutcome>, ApiError> {
    Ok(Json(ctx.core.request_graph()?))
}

/// `GET /api/journal/graph.svg`: 404 `NO_DATA` while the log is empty.
pub async fn graph_svg(State(ctx): State<ApiContext>) -> Result<Response, ApiError> {
    match ctx.core.request_graph()? {
        GraphOutcome::Chart(chart) => Ok((
            [(header::CONTENT_TYPE, "image/svg+xml")],
            chart.to_svg(&ctx.theme),
        )
            .into_response()),
        GraphOutcome::NoData(notice) => Err(ApiError::NoData(notice.message)),
    }
}

/// `GET /api/journal/suggestion`
pub async fn suggestion(State(ctx): State<ApiContext>) -> Result<Json<Suggestion>, ApiError> {
    Ok(Json(ctx.core.request_suggestion()?))
}
