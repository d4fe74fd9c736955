//! Submission processing.
//!
//! One submission runs through a fixed sequence:
//!
//! 1. **Load** the day's record (empty if nothing is stored)
//! 2. **Bootstrap** an empty record with a zero-step entry at the current time
//! 3. **Validate** the submission against the record
//! 4. **Accumulate** calories and append the entry, if valid
//! 5. **Report** the day's totals, whether or not the submission was accepted
//! 6. **Persist** the record, whether or not it changed
//!
//! While the record holds only one entry, a submission is accepted
//! regardless of how its time compares to that entry. This lets the first
//! real submission of the day carry a time earlier than the bootstrap entry.

use crate::clock::{Clock, SystemClock};
use crate::metrics::MetricsEngine;
use crate::store::DayStore;
use crate::time::{parse_time, TimeOfDay};
use crate::validation::{has_elapsed_time, is_time_advancing, is_well_formed_submission};
use crate::{
    Config, DailyRecord, RejectReason, Report, Result, Submission, SubmissionOutcome,
};
use chrono::NaiveDate;

/// Folds submissions into per-day records held by a [`DayStore`]
pub struct Tracker<S, C = SystemClock> {
    store: S,
    clock: C,
    metrics: MetricsEngine,
}

impl<S: DayStore> Tracker<S, SystemClock> {
    /// Tracker using the system's local time
    pub fn with_system_clock(store: S, config: &Config) -> Self {
        Self::new(store, SystemClock, config)
    }
}

impl<S: DayStore, C: Clock> Tracker<S, C> {
    pub fn new(store: S, clock: C, config: &Config) -> Self {
        Self {
            store,
            clock,
            metrics: MetricsEngine::new(config),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn metrics(&self) -> &MetricsEngine {
        &self.metrics
    }

    /// Today's date according to the clock
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    /// Process a submission for today's record
    pub fn submit_today(&mut self, submission: &Submission) -> Result<Report> {
        let today = self.today();
        self.submit(today, submission)
    }

    /// Process a submission for the record of `date`
    ///
    /// Rejected submissions are not errors: the returned report carries the
    /// rejection and the unchanged totals. Errors come only from the store.
    pub fn submit(&mut self, date: NaiveDate, submission: &Submission) -> Result<Report> {
        let mut record = self.store.load(date)?;

        let now = TimeOfDay::from_naive(self.clock.now().time());
        if record.bootstrap(now) {
            tracing::info!("Started record for {} with a baseline at {}", date, now);
        }

        let outcome = self.accumulate(&mut record, submission);
        match &outcome {
            SubmissionOutcome::Accepted { calories } => tracing::info!(
                "Accepted {} steps at {} (+{:.2} kcal)",
                submission.steps,
                submission.time,
                calories
            ),
            SubmissionOutcome::Rejected(reason) => tracing::warn!(
                "Rejected submission ({:?}, {}): {}",
                submission.time,
                submission.steps,
                reason
            ),
        }

        let report = self.report(&record, Some(outcome));
        self.store.save(date, &record)?;
        Ok(report)
    }

    /// Report on the stored record of `date` without changing it
    ///
    /// Returns `None` if nothing has been recorded for that day.
    pub fn summary(&self, date: NaiveDate) -> Result<Option<Report>> {
        if !self.store.contains(date)? {
            return Ok(None);
        }
        let record = self.store.load(date)?;
        Ok(Some(self.report(&record, None)))
    }

    fn accumulate(&self, record: &mut DailyRecord, submission: &Submission) -> SubmissionOutcome {
        match self.validate(record, submission) {
            Ok(time) => {
                let distance = self.metrics.distance_km(submission.steps);
                match self.metrics.calories_for_submission(record, distance, time) {
                    Ok(calories) => {
                        record.cumulative_calories += calories;
                        record.push_entry(time, submission.steps);
                        SubmissionOutcome::Accepted { calories }
                    }
                    Err(e) => {
                        tracing::warn!("Calorie computation failed: {}", e);
                        SubmissionOutcome::Rejected(RejectReason::NoElapsedTime)
                    }
                }
            }
            Err(reason) => SubmissionOutcome::Rejected(reason),
        }
    }

    /// Parse and check a submission against the bootstrapped record
    fn validate(
        &self,
        record: &DailyRecord,
        submission: &Submission,
    ) -> std::result::Result<TimeOfDay, RejectReason> {
        if !is_well_formed_submission(submission) {
            return Err(RejectReason::Malformed);
        }

        let time = parse_time(&submission.time).map_err(|e| {
            tracing::debug!("{}", e);
            RejectReason::InvalidTime(submission.time.clone())
        })?;

        let only_baseline = record.entries.len() == 1;
        if !only_baseline && !is_time_advancing(time, record) {
            if let Some(latest) = record.max_time() {
                return Err(RejectReason::NotAdvancing { latest });
            }
        }

        if !has_elapsed_time(time, record) {
            return Err(RejectReason::NoElapsedTime);
        }

        Ok(time)
    }

    fn report(&self, record: &DailyRecord, outcome: Option<SubmissionOutcome>) -> Report {
        let total_steps = self.metrics.total_steps(record);
        let distance_km = self.metrics.distance_km(total_steps);
        Report {
            date: record.date,
            outcome,
            latest_time: record.last_entry().map(|(time, _)| time),
            total_steps,
            distance_km,
            calories: record.cumulative_calories,
            message: self.metrics.message_for(distance_km).to_string(),
            summary: self.metrics.format_summary(record.cumulative_calories, record),
        }
    }
}
