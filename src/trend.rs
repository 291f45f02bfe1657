//! Trend engine: turns the chronological severity series into a suggestion.
//!
//! Only the most recent consecutive change is classified. Earlier history
//! does not influence the result, even when it disagrees with the last step.

use serde::{Deserialize, Serialize};

use crate::journal::{SeriesPoint, SymptomLog};
use crate::models::TrendCategory;

/// A last delta strictly above this is a rapid increase.
pub const RAPID_INCREASE_THRESHOLD: i32 = 2;

pub const MSG_INSUFFICIENT_DATA: &str = "Insufficient data to generate suggestions.";
pub const MSG_RAPID_INCREASE: &str =
    "It's a good idea to consult a doctor. Your symptoms are increasing rather rapidly.";
pub const MSG_IMPROVING: &str = "You're doing great! Keep maintaining your current routine.";
pub const MSG_STABLE: &str = "Your symptoms are stable. Continue to monitor and record.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: TrendCategory,
    pub message: String,
    /// The delta that drove the classification, absent for insufficient data.
    pub last_delta: Option<i32>,
}

impl TrendCategory {
    pub fn message(&self) -> &'static str {
        match self {
            TrendCategory::InsufficientData => MSG_INSUFFICIENT_DATA,
            TrendCategory::RapidIncrease => MSG_RAPID_INCREASE,
            TrendCategory::Improving => MSG_IMPROVING,
            TrendCategory::Stable => MSG_STABLE,
        }
    }
}

/// First difference of severities along the series.
pub fn severity_deltas(series: &[SeriesPoint]) -> Vec<i32> {
    series
        .windows(2)
        .map(|pair| pair[1].severity.value().saturating_sub(pair[0].severity.value()))
        .collect()
}

pub fn classify_delta(delta: i32) -> TrendCategory {
    if delta > RAPID_INCREASE_THRESHOLD {
        TrendCategory::RapidIncrease
    } else if delta < 0 {
        TrendCategory::Improving
    } else {
        TrendCategory::Stable
    }
}

/// Classifies an already-sorted series.
pub fn suggest_from_series(series: &[SeriesPoint]) -> Suggestion {
    if series.len() < 2 {
        return Suggestion {
            category: TrendCategory::InsufficientData,
            message: MSG_INSUFFICIENT_DATA.to_string(),
            last_delta: None,
        };
    }

    // len >= 2, so there is at least one delta
    let last_delta = severity_deltas(series).last().copied();
    let category = last_delta
        .map(classify_delta)
        .unwrap_or(TrendCategory::InsufficientData);

    Suggestion {
        category,
        message: category.message().to_string(),
        last_delta,
    }
}

/// Suggestion for the current state of a log.
pub fn suggest(log: &SymptomLog) -> Suggestion {
    let suggestion = suggest_from_series(&log.chronological_series());
    tracing::debug!(
        category = suggestion.category.as_str(),
        last_delta = ?suggestion.last_delta,
        entries = log.len(),
        "Trend classified"
    );
    suggestion
}
