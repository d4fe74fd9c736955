//! Core domain types for walklog.
//!
//! This module defines:
//! - The per-day record and its time-ordered entries
//! - Incoming submissions
//! - Submission outcomes and the summary report

use crate::time::TimeOfDay;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Daily Record
// ============================================================================

/// Steps walked since the previous entry, keyed by the time they were reported
///
/// Iteration order is insertion order. The last entry is always the most
/// recently accepted one and is the reference point for the next calorie
/// increment.
pub type Entries = IndexMap<TimeOfDay, u64>;

/// Everything recorded for one calendar day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub cumulative_calories: f64,
    pub entries: Entries,
}

impl DailyRecord {
    /// A fresh record with no entries and no calories
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            cumulative_calories: 0.0,
            entries: Entries::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently inserted entry
    pub fn last_entry(&self) -> Option<(TimeOfDay, u64)> {
        self.entries.last().map(|(time, steps)| (*time, *steps))
    }

    /// The chronologically latest time recorded
    pub fn max_time(&self) -> Option<TimeOfDay> {
        self.entries.keys().max().copied()
    }

    /// Insert the zero-step baseline entry used as the starting point of the
    /// first calorie computation of the day. Does nothing if entries exist.
    pub fn bootstrap(&mut self, now: TimeOfDay) -> bool {
        if !self.is_empty() {
            return false;
        }
        self.entries.insert(now, 0);
        true
    }

    /// Append an accepted entry at the end of the insertion order
    pub(crate) fn push_entry(&mut self, time: TimeOfDay, steps: u64) {
        self.entries.insert(time, steps);
    }
}

// ============================================================================
// Submission Types
// ============================================================================

/// One (time, steps) package as received from the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub time: String,
    pub steps: u64,
}

impl Submission {
    pub fn new(time: impl Into<String>, steps: u64) -> Self {
        Self {
            time: time.into(),
            steps,
        }
    }
}

/// Why a submission was not folded into the record
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Missing time or a zero step count
    Malformed,
    /// Time string is not HH:MM:SS
    InvalidTime(String),
    /// Time is not after the latest recorded time
    NotAdvancing { latest: TimeOfDay },
    /// Time equals the previous entry, so no time has elapsed
    NoElapsedTime,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Malformed => {
                write!(f, "submission needs a time and a non-zero step count")
            }
            RejectReason::InvalidTime(raw) => {
                write!(f, "invalid time '{}', expected HH:MM:SS", raw)
            }
            RejectReason::NotAdvancing { latest } => {
                write!(f, "time must be later than the last recorded time {}", latest)
            }
            RejectReason::NoElapsedTime => {
                write!(f, "no time has elapsed since the previous entry")
            }
        }
    }
}

/// Result of processing one submission
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionOutcome {
    Accepted { calories: f64 },
    Rejected(RejectReason),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }
}

// ============================================================================
// Report
// ============================================================================

/// Summary of a day after a submission was processed
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub date: NaiveDate,
    /// `None` when the report only views the stored record
    pub outcome: Option<SubmissionOutcome>,
    pub latest_time: Option<TimeOfDay>,
    pub total_steps: u64,
    pub distance_km: f64,
    pub calories: f64,
    pub message: String,
    /// The formatted multi-line summary
    pub summary: String,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary)
    }
}
