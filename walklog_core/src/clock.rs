//! Wall clock access, injectable for tests.

use chrono::{Local, NaiveDateTime};

/// Source of the current local date and time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The system's local time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
