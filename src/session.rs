//! The single volatile user session: profile plus symptom log.
//!
//! A session is created at registration and dropped at logout. Nothing in
//! it outlives the process.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::journal::SymptomLog;
use crate::models::UserProfile;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub profile: UserProfile,
    pub log: SymptomLog,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            log: SymptomLog::new(),
            started_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id.to_string(),
            username: self.profile.username.clone(),
            chronic_illness: self.profile.chronic_illness.clone(),
            portal_title: portal_title(&self.profile.username),
            registered_on: self.profile.registered_on,
            entry_count: self.log.len(),
            started_at: self.started_at.to_rfc3339(),
        }
    }
}

/// Serialisable view of the active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub username: String,
    pub chronic_illness: String,
    pub portal_title: String,
    pub registered_on: NaiveDate,
    pub entry_count: usize,
    pub started_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationConfirmation {
    pub session_id: String,
    pub username: String,
    pub chronic_illness: String,
    pub message: String,
}

pub fn registration_message(username: &str, illness: &str) -> String {
    format!("You have successfully created your portal, {username}! You have {illness}.")
}

pub fn portal_title(username: &str) -> String {
    format!("{username}'s Health Portal")
}
