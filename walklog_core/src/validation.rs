//! Submission checks applied before anything is folded into a record.

use crate::time::{hours_between, TimeOfDay};
use crate::{DailyRecord, Submission};

/// A submission is well formed when it carries a time and a truthy step count.
///
/// A step count of zero counts as missing, so "no steps since last time"
/// submissions are rejected.
pub fn is_well_formed_submission(submission: &Submission) -> bool {
    !submission.time.is_empty() && submission.steps != 0
}

/// True if the record is empty or `time` is strictly after every recorded time
pub fn is_time_advancing(time: TimeOfDay, record: &DailyRecord) -> bool {
    match record.max_time() {
        Some(latest) => time > latest,
        None => true,
    }
}

/// True if some time has passed between the last inserted entry and `time`
///
/// The calorie formula divides by this interval, so a zero interval must be
/// rejected before the metrics engine runs.
pub fn has_elapsed_time(time: TimeOfDay, record: &DailyRecord) -> bool {
    match record.last_entry() {
        Some((previous, _)) => hours_between(time, previous) > 0.0,
        None => false,
    }
}
