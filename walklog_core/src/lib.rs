#![forbid(unsafe_code)]

//! Core domain model and business logic for walklog.
//!
//! This crate provides:
//! - Domain types (daily records, submissions, reports)
//! - Time-of-day parsing and elapsed time
//! - Submission validation
//! - Distance and calorie estimation
//! - Per-day persistence
//! - The submission tracker tying these together

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod time;
pub mod clock;
pub mod validation;
pub mod metrics;
pub mod store;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use time::{hours_between, parse_time, TimeOfDay};
pub use clock::{Clock, FixedClock, SystemClock};
pub use metrics::MetricsEngine;
pub use store::{DayStore, JsonDayStore, MemoryDayStore};
pub use session::Tracker;
