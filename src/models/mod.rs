//! Domain types shared by the journal, trend engine and API layer.

pub mod enums;
pub mod profile;
pub mod symptom;

pub use enums::{ChronicCondition, InvalidEnum, TrendCategory};
pub use profile::{resolve_illness, UserProfile};
pub use symptom::{Severity, SeverityError, SymptomEntry, SEVERITY_MAX, SEVERITY_MIN};
