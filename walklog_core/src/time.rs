//! Time-of-day parsing and elapsed time computation.
//!
//! All times are wall-clock times within a single day at whole-second
//! resolution. Midnight wraparound is not handled.

use crate::{Error, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Textual format of a time of day, both on input and in stored records.
pub const TIME_FORMAT: &str = "%H:%M:%S";

const SECONDS_PER_HOUR: f64 = 3600.0;

/// A wall-clock time of day, serialized as "HH:MM:SS".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build a time from hour, minute and second components
    pub fn from_hms(hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, min, sec).map(Self)
    }

    /// Wrap a chrono time, dropping any sub-second part
    pub fn from_naive(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }

    pub fn seconds_since_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

/// Parse a "HH:MM:SS" string into a time of day
pub fn parse_time(s: &str) -> Result<TimeOfDay> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .map(TimeOfDay::from_naive)
        .map_err(|_| Error::TimeFormat(s.to_string()))
}

/// Absolute difference between two times of day, in fractional hours
pub fn hours_between(a: TimeOfDay, b: TimeOfDay) -> f64 {
    let a = a.seconds_since_midnight();
    let b = b.seconds_since_midnight();
    f64::from(a.abs_diff(b)) / SECONDS_PER_HOUR
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_time(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        parse_time(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}
