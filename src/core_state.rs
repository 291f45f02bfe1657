//! Transport-agnostic application state.
//!
//! `CoreState` owns the one active [`Session`] and the clock, and exposes
//! the journal operations the HTTP layer and the portal page call into.
//! The session sits behind an `RwLock` so graph and suggestion reads can
//! run side by side while appends, registration and logout take the write
//! path.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::chart::{self, ChartLayout, GraphOutcome};
use crate::clock::{Clock, SystemClock};
use crate::journal::{self, RecordConfirmation, SeriesPoint};
use crate::models::{Severity, SymptomEntry, UserProfile};
use crate::portal::PortalView;
use crate::resources::{self, ResourceLinks};
use crate::session::{registration_message, RegistrationConfirmation, Session, SessionSummary};
use crate::trend::{self, Suggestion};

// ═══════════════════════════════════════════════════════════
// CoreState: shared by the API router and the portal page
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    /// Active session. `None` before registration and after logout.
    session: RwLock<Option<Session>>,
    clock: Arc<dyn Clock>,
    pub chart_layout: ChartLayout,
}

impl CoreState {
    /// Create a new CoreState on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            session: RwLock::new(None),
            clock,
            chart_layout: ChartLayout::default(),
        }
    }

    // ── Session access ──────────────────────────────────────

    pub fn read_session(
        &self,
    ) -> Result<RwLockReadGuard<'_, Option<Session>>, CoreError> {
        self.session.read().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn write_session(
        &self,
    ) -> Result<RwLockWriteGuard<'_, Option<Session>>, CoreError> {
        self.session.write().map_err(|_| CoreError::LockPoisoned)
    }

    /// Check if a session is active.
    pub fn is_active(&self) -> bool {
        self.session
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    fn with_session<T>(&self, f: impl FnOnce(&Session) -> T) -> Result<T, CoreError> {
        let guard = self.read_session()?;
        let session = guard.as_ref().ok_or(CoreError::NoActiveSession)?;
        Ok(f(session))
    }

    fn with_session_mut<T>(&self, f: impl FnOnce(&mut Session) -> T) -> Result<T, CoreError> {
        let mut guard = self.write_session()?;
        let session = guard.as_mut().ok_or(CoreError::NoActiveSession)?;
        Ok(f(session))
    }

    // ── Session lifecycle ───────────────────────────────────

    /// Start a fresh session, replacing any existing one.
    ///
    /// The password is accepted for form parity and discarded.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        chronic_illness: &str,
    ) -> Result<RegistrationConfirmation, CoreError> {
        let profile = UserProfile {
            username: username.to_string(),
            chronic_illness: chronic_illness.to_string(),
            registered_on: self.clock.today(),
        };
        let session = Session::new(profile);
        let confirmation = RegistrationConfirmation {
            session_id: session.id.to_string(),
            username: username.to_string(),
            chronic_illness: chronic_illness.to_string(),
            message: registration_message(username, chronic_illness),
        };

        let mut guard = self.write_session()?;
        if guard.is_some() {
            tracing::info!("Replacing active session on re-registration");
        }
        *guard = Some(session);

        tracing::info!(
            session_id = %confirmation.session_id,
            password_supplied = !password.is_empty(),
            "Session registered"
        );
        Ok(confirmation)
    }

    /// Drop the session and its log. Returns whether one was active.
    pub fn logout(&self) -> Result<bool, CoreError> {
        let mut guard = self.write_session()?;
        let was_active = guard.take().is_some();
        tracing::info!(was_active, "Session cleared");
        Ok(was_active)
    }

    pub fn summary(&self) -> Result<SessionSummary, CoreError> {
        self.with_session(Session::summary)
    }

    // ── Journal operations ──────────────────────────────────

    pub fn submit_entry(
        &self,
        symptom: &str,
        severity: Severity,
        notes: &str,
    ) -> Result<RecordConfirmation, CoreError> {
        let clock = Arc::clone(&self.clock);
        self.with_session_mut(|s| {
            journal::record_symptom(&mut s.log, clock.as_ref(), symptom, severity, notes)
        })
    }

    /// Raw entries in insertion order, as shown in the log table.
    pub fn log_table(&self) -> Result<Vec<SymptomEntry>, CoreError> {
        self.with_session(|s| s.log.entries().to_vec())
    }

    pub fn chronological_series(&self) -> Result<Vec<SeriesPoint>, CoreError> {
        self.with_session(|s| s.log.chronological_series())
    }

    pub fn request_graph(&self) -> Result<GraphOutcome, CoreError> {
        let layout = self.chart_layout;
        self.with_session(|s| chart::render_graph(&s.log, &layout))
    }

    pub fn request_suggestion(&self) -> Result<Suggestion, CoreError> {
        self.with_session(|s| trend::suggest(&s.log))
    }

    pub fn resource_links(&self) -> Result<ResourceLinks, CoreError> {
        self.with_session(|s| resources::resource_links(&s.profile.chronic_illness))
    }

    /// Everything the portal page shows, read under a single lock so the
    /// table, chart and suggestion describe the same log.
    ///
    /// `None` when no session is active.
    pub fn portal_view(&self, with_graph: bool) -> Result<Option<PortalView>, CoreError> {
        let guard = self.read_session()?;
        let Some(session) = guard.as_ref() else {
            return Ok(None);
        };

        let (graph, suggestion) = if with_graph {
            (
                Some(chart::render_graph(&session.log, &self.chart_layout)),
                Some(trend::suggest(&session.log)),
            )
        } else {
            (None, None)
        };

        Ok(Some(PortalView {
            summary: session.summary(),
            entries: session.log.entries().to_vec(),
            graph,
            suggestion,
            resources: resources::resource_links(&session.profile.chronic_illness),
            notice: None,
        }))
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No active session")]
    NoActiveSession,
    #[error("Internal lock error")]
    LockPoisoned,
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::TrendCategory;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state_on(date: NaiveDate) -> (CoreState, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(date));
        let state = CoreState::with_clock(clock.clone());
        (state, clock)
    }

    #[test]
    fn operations_require_session() {
        let state = CoreState::new();
        assert!(!state.is_active());
        assert!(matches!(
            state.submit_entry("Headache", Severity::new(3), ""),
            Err(CoreError::NoActiveSession)
        ));
        assert!(matches!(state.request_graph(), Err(CoreError::NoActiveSession)));
        assert!(matches!(state.request_suggestion(), Err(CoreError::NoActiveSession)));
    }

    #[test]
    fn register_creates_empty_session() {
        let (state, _) = state_on(day(2024, 1, 1));
        let confirmation = state.register("sam", "secret", "Asthma").unwrap();

        assert!(state.is_active());
        assert_eq!(
            confirmation.message,
            "You have successfully created your portal, sam! You have Asthma."
        );
        assert!(state.log_table().unwrap().is_empty());
        assert_eq!(state.summary().unwrap().registered_on, day(2024, 1, 1));
    }

    #[test]
    fn reregistering_replaces_log() {
        let (state, _) = state_on(day(2024, 1, 1));
        state.register("sam", "", "Asthma").unwrap();
        state.submit_entry("Cough", Severity::new(4), "").unwrap();

        state.register("alex", "", "IBS").unwrap();
        assert!(state.log_table().unwrap().is_empty());
        assert_eq!(state.summary().unwrap().username, "alex");
    }

    #[test]
    fn logout_clears_everything() {
        let (state, _) = state_on(day(2024, 1, 1));
        state.register("sam", "", "Asthma").unwrap();
        state.submit_entry("Cough", Severity::new(4), "").unwrap();

        assert!(state.logout().unwrap());
        assert!(!state.is_active());
        assert!(matches!(state.log_table(), Err(CoreError::NoActiveSession)));
        // second logout is a no-op
        assert!(!state.logout().unwrap());
    }

    #[test]
    fn three_day_rise_recommends_doctor() {
        let (state, clock) = state_on(day(2024, 1, 1));
        state.register("sam", "", "Migraines").unwrap();
        for severity in [3, 5, 9] {
            state.submit_entry("Migraine", Severity::new(severity), "").unwrap();
            clock.advance_days(1);
        }

        let series = state.chronological_series().unwrap();
        let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 3)]);

        let suggestion = state.request_suggestion().unwrap();
        assert_eq!(suggestion.category, TrendCategory::RapidIncrease);
        assert_eq!(suggestion.last_delta, Some(4));
        assert!(suggestion.message.contains("consult a doctor"));
    }

    #[test]
    fn table_keeps_insertion_order_while_series_sorts() {
        let (state, clock) = state_on(day(2024, 1, 3));
        state.register("sam", "", "Diabetes").unwrap();
        state.submit_entry("Fatigue", Severity::new(4), "").unwrap();
        clock.set(day(2024, 1, 1));
        state.submit_entry("Thirst", Severity::new(2), "").unwrap();

        let table = state.log_table().unwrap();
        assert_eq!(table[0].date, day(2024, 1, 3));

        let series = state.chronological_series().unwrap();
        assert_eq!(series[0].date, day(2024, 1, 1));
        assert_eq!(series[0].severity.value(), 2);

        let suggestion = state.request_suggestion().unwrap();
        assert_eq!(suggestion.category, TrendCategory::Stable);
    }

    #[test]
    fn graph_is_notice_until_first_entry() {
        let (state, _) = state_on(day(2024, 1, 1));
        state.register("sam", "", "Asthma").unwrap();
        assert!(matches!(state.request_graph().unwrap(), GraphOutcome::NoData(_)));

        state.submit_entry("Wheezing", Severity::new(5), "").unwrap();
        assert!(matches!(state.request_graph().unwrap(), GraphOutcome::Chart(_)));
    }

    #[test]
    fn portal_view_absent_without_session() {
        let state = CoreState::new();
        assert!(state.portal_view(true).unwrap().is_none());
    }

    #[test]
    fn portal_view_skips_graph_unless_asked() {
        let (state, _) = state_on(day(2024, 1, 1));
        state.register("sam", "", "Asthma").unwrap();
        state.submit_entry("Wheezing", Severity::new(5), "").unwrap();

        let view = state.portal_view(false).unwrap().unwrap();
        assert!(view.graph.is_none());
        assert!(view.suggestion.is_none());
        assert_eq!(view.entries.len(), 1);
        assert!(view.resources.cdc_search.ends_with("query=Asthma"));
    }

    #[test]
    fn portal_view_chart_table_and_suggestion_agree() {
        let (state, clock) = state_on(day(2024, 1, 1));
        state.register("sam", "", "Migraines").unwrap();
        for severity in [3, 5, 9] {
            state.submit_entry("Migraine", Severity::new(severity), "").unwrap();
            clock.advance_days(1);
        }

        let view = state.portal_view(true).unwrap().unwrap();
        let Some(GraphOutcome::Chart(chart)) = &view.graph else {
            panic!("expected a chart");
        };
        assert_eq!(chart.points.len(), view.entries.len());
        assert_eq!(view.summary.entry_count, view.entries.len());
        assert_eq!(
            view.suggestion.as_ref().map(|s| s.category),
            Some(TrendCategory::RapidIncrease)
        );
    }

    #[test]
    fn portal_view_is_consistent_under_concurrent_appends() {
        let (state, _) = state_on(day(2024, 1, 1));
        state.register("sam", "", "Migraines").unwrap();
        let state = Arc::new(state);

        let writer = {
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for i in 0..500 {
                    state
                        .submit_entry("Migraine", Severity::new(i % 10 + 1), "")
                        .unwrap();
                }
            })
        };

        for _ in 0..500 {
            let view = state.portal_view(true).unwrap().unwrap();
            let charted = match &view.graph {
                Some(GraphOutcome::Chart(chart)) => chart.points.len(),
                _ => 0,
            };
            assert_eq!(charted, view.entries.len());
            assert_eq!(view.summary.entry_count, view.entries.len());
            let series = journal::to_chronological_series(&view.entries);
            let expected = trend::suggest_from_series(&series);
            assert_eq!(view.suggestion, Some(expected));
        }

        writer.join().unwrap();
    }

    #[test]
    fn resource_links_use_profile_illness() {
        let (state, _) = state_on(day(2024, 1, 1));
        state.register("sam", "", "Heart Disease").unwrap();
        let links = state.resource_links().unwrap();
        assert!(links.cdc_search.ends_with("query=Heart%20Disease"));
    }
}
