use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive range the input boundary accepts for severity.
pub const SEVERITY_MIN: i32 = 1;
pub const SEVERITY_MAX: i32 = 10;

/// Symptom severity score.
///
/// The engine treats any integer as a valid severity; range checks belong
/// to the input boundary via [`Severity::bounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(i32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeverityError {
    #[error("Severity must be between 1 and 10, got {0}")]
    OutOfRange(i32),
}

impl Severity {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Range-checked constructor used where raw user input enters.
    pub fn bounded(value: i32) -> Result<Self, SeverityError> {
        if (SEVERITY_MIN..=SEVERITY_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SeverityError::OutOfRange(value))
        }
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_in_range(self) -> bool {
        (SEVERITY_MIN..=SEVERITY_MAX).contains(&self.0)
    }
}

impl From<i32> for Severity {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logged symptom. Day precision only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub date: NaiveDate,
    pub symptom: String,
    pub severity: Severity,
    pub notes: String,
}

impl SymptomEntry {
    pub fn new(
        date: NaiveDate,
        symptom: impl Into<String>,
        severity: impl Into<Severity>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date,
            symptom: symptom.into(),
            severity: severity.into(),
            notes: notes.into(),
        }
    }
}
