//! Symptom journal: the append-only log and its chronological view.
//!
//! The log keeps insertion order (that is what the log table shows).
//! Charting and trend analysis work on the date-sorted series instead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::models::{Severity, SymptomEntry};

pub const RECORD_SUCCESS_MESSAGE: &str = "Symptom entry logged successfully!";

// ═══════════════════════════════════════════
// View types: serialised to clients
// ═══════════════════════════════════════════

/// Raw input for recording a symptom, as submitted by the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomInput {
    #[serde(default)]
    pub symptom: String,
    pub severity: i32,
    #[serde(default)]
    pub notes: String,
}

/// Confirmation returned after an append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordConfirmation {
    pub date: NaiveDate,
    pub entry_count: usize,
    pub message: String,
}

/// One point of the chronological series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub severity: Severity,
    pub symptom: String,
}

// ═══════════════════════════════════════════
// SymptomLog: append-only store
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomLog {
    entries: Vec<SymptomEntry>,
}

impl SymptomLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends without validation, dedup or ordering checks.
    pub fn append(&mut self, entry: SymptomEntry) {
        self.entries.push(entry);
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[SymptomEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted ascending by date. Same-day entries keep their
    /// insertion order.
    pub fn chronological_series(&self) -> Vec<SeriesPoint> {
        to_chronological_series(&self.entries)
    }
}

// ═══════════════════════════════════════════
// Journal operations
// ═══════════════════════════════════════════

/// Stable date sort over a snapshot of entries.
pub fn to_chronological_series(entries: &[SymptomEntry]) -> Vec<SeriesPoint> {
    let mut series: Vec<SeriesPoint> = entries
        .iter()
        .map(|e| SeriesPoint {
            date: e.date,
            severity: e.severity,
            symptom: e.symptom.clone(),
        })
        .collect();
    // slice::sort_by_key is stable
    series.sort_by_key(|p| p.date);
    series
}

/// Stamps a new entry with the clock's current day and appends it.
pub fn record_symptom(
    log: &mut SymptomLog,
    clock: &dyn Clock,
    symptom: &str,
    severity: Severity,
    notes: &str,
) -> RecordConfirmation {
    let date = clock.today();
    if !severity.is_in_range() {
        tracing::warn!(severity = severity.value(), "Recording severity outside the 1-10 scale");
    }
    log.append(SymptomEntry::new(date, symptom, severity, notes));

    tracing::debug!(%date, severity = severity.value(), entries = log.len(), "Symptom recorded");

    RecordConfirmation {
        date,
        entry_count: log.len(),
        message: RECORD_SUCCESS_MESSAGE.to_string(),
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
