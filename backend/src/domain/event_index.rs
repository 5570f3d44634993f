//! Marked-date index backing the calendar's dot indicators.
//!
//! The index is populated independently of the medication store and is only
//! consulted when rendering calendar cells. It is not kept in sync with the
//! schedule filter.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Set of calendar dates that should render a dot indicator
#[derive(Clone, Default)]
pub struct EventIndex {
    dates: Arc<Mutex<HashSet<NaiveDate>>>,
}

impl EventIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a date as having an event
    pub fn mark(&self, date: NaiveDate) {
        self.dates.lock().unwrap().insert(date);
    }

    /// Remove a date's event marker
    pub fn unmark(&self, date: NaiveDate) {
        self.dates.lock().unwrap().remove(&date);
    }

    /// Whether a dot indicator should render for this date
    pub fn has_event_on(&self, date: NaiveDate) -> bool {
        self.dates.lock().unwrap().contains(&date)
    }

    /// Remove all markers
    pub fn clear(&self) {
        self.dates.lock().unwrap().clear();
    }
}
