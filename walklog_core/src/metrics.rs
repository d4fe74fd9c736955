//! Distance and calorie estimation.
//!
//! Calories are accumulated incrementally: each accepted submission adds the
//! energy spent walking its distance over the interval since the previous
//! entry, at the mean speed over that interval.

use crate::config::{BodyConfig, CalorieConfig, Config, GoalsConfig};
use crate::time::{hours_between, TimeOfDay};
use crate::{DailyRecord, Error, Result};

const METERS_PER_KM: f64 = 1000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Converts steps to distance and calories using fixed personal parameters
#[derive(Clone, Debug)]
pub struct MetricsEngine {
    body: BodyConfig,
    calories: CalorieConfig,
    goals: GoalsConfig,
}

impl MetricsEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            body: config.body.clone(),
            calories: config.calories.clone(),
            goals: config.goals.clone(),
        }
    }

    /// Sum of all step counts in the record, saturating at `u64::MAX`
    pub fn total_steps(&self, record: &DailyRecord) -> u64 {
        record
            .entries
            .values()
            .fold(0u64, |total, steps| total.saturating_add(*steps))
    }

    /// Distance in kilometres for a number of steps
    pub fn distance_km(&self, steps: u64) -> f64 {
        steps as f64 * self.body.step_length_m / METERS_PER_KM
    }

    /// Calories burned walking `distance_km` between the last inserted entry
    /// and `time`
    ///
    /// `record` must not yet contain the new entry.
    pub fn calories_for_submission(
        &self,
        record: &DailyRecord,
        distance_km: f64,
        time: TimeOfDay,
    ) -> Result<f64> {
        let (previous, _) = record
            .last_entry()
            .ok_or_else(|| Error::Metrics("no previous entry to measure from".into()))?;

        let elapsed_hours = hours_between(time, previous);
        if elapsed_hours == 0.0 {
            return Err(Error::Metrics(format!(
                "no time elapsed between {} and {}",
                previous, time
            )));
        }

        let mean_speed_kmh = distance_km / elapsed_hours;
        let coefficient =
            self.calories.k1 + self.calories.k2 * mean_speed_kmh.powi(2) / self.body.height_cm;
        let calories = self.body.weight_kg * coefficient * elapsed_hours * MINUTES_PER_HOUR;

        tracing::debug!(
            "{:.3} km over {:.3} h ({:.2} km/h): {:.2} kcal",
            distance_km,
            elapsed_hours,
            mean_speed_kmh,
            calories
        );
        Ok(calories)
    }

    /// Motivational message for the day's total distance
    pub fn message_for(&self, distance_km: f64) -> &str {
        self.goals.message_for(distance_km)
    }

    /// Human readable summary of the day
    pub fn format_summary(&self, total_calories: f64, record: &DailyRecord) -> String {
        let steps = self.total_steps(record);
        let distance = self.distance_km(steps);
        let latest = record
            .last_entry()
            .map(|(time, _)| time.to_string())
            .unwrap_or_else(|| "--:--:--".into());

        format!(
            "Time: {}.\n\
             Today you have walked {} steps.\n\
             The walked distance is {:.2} km.\n\
             You spent {:.2} kilocalories\n\
             {}",
            latest,
            steps,
            distance,
            total_calories,
            self.message_for(distance)
        )
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
