//! Source of "today" for new journal entries.
//!
//! Entries are stamped at day precision, so the clock only hands out
//! calendar dates. Tests swap in a [`FixedClock`].

use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDate};

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for deterministic dates.
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        if let Ok(mut current) = self.date.lock() {
            *current = date;
        }
    }

    pub fn advance_days(&self, days: i64) {
        if let Ok(mut current) = self.date.lock() {
            *current += Duration::days(days);
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
            .lock()
            .map(|d| *d)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}
