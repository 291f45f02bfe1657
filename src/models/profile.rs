use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::ChronicCondition;

/// Profile of the registered user. The password is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub chronic_illness: String,
    pub registered_on: NaiveDate,
}

/// Illness string stored on the profile.
///
/// `Other` takes the free-text condition, or an empty string when none
/// was given.
pub fn resolve_illness(condition: ChronicCondition, other: Option<&str>) -> String {
    match condition {
        ChronicCondition::Other => other.map(str::trim).unwrap_or_default().to_string(),
        named => named.as_str().to_string(),
    }
}
