//! Time grid generation -- the day-invariant list of bookable times.
//!
//! A grid covers every `step_minutes`-spaced instant whose hour lies in
//! `[start_hour, end_hour)`. The default configuration (08:00-22:00 every 30
//! minutes) yields 28 labels, `08:00` through `21:30`.

use chrono::{NaiveTime, Timelike};

use crate::config::BusinessHours;

/// Format a time of day as a zero-padded `HH:MM` label, dropping seconds.
pub fn time_label(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Truncate a time of day to the minute.
///
/// Two times truncate to the same value iff their `HH:MM` labels are equal.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Ordered bookable times for one business day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    times: Vec<NaiveTime>,
}

impl TimeGrid {
    /// Build the grid for the given business hours.
    ///
    /// Hours at or past 24 are skipped; minutes run `0, step, 2*step, ...`
    /// while below 60, so a step that does not divide 60 simply leaves a
    /// shorter last interval in each hour.
    pub fn new(hours: &BusinessHours) -> Self {
        let step = hours.step_minutes.max(1);
        let mut times = Vec::new();
        for h in hours.start_hour..hours.end_hour.min(24) {
            for m in (0..60).step_by(step as usize) {
                if let Some(t) = NaiveTime::from_hms_opt(h, m, 0) {
                    times.push(t);
                }
            }
        }
        Self { times }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        self.times.iter().copied()
    }

    pub fn labels(&self) -> Vec<String> {
        self.iter().map(time_label).collect()
    }
}

/// Generate the `HH:MM` labels for one business day.
pub fn generate_time_grid(hours: &BusinessHours) -> Vec<String> {
    TimeGrid::new(hours).labels()
}
