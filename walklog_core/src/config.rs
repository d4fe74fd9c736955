//! Configuration file support for walklog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/walklog/config.toml`.
//! Every section is optional; missing values fall back to the defaults below.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub body: BodyConfig,

    #[serde(default)]
    pub calories: CalorieConfig,

    #[serde(default)]
    pub goals: GoalsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Anthropometric inputs
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BodyConfig {
    #[serde(default = "default_weight_kg")]
    pub weight_kg: f64,

    #[serde(default = "default_height_cm")]
    pub height_cm: f64,

    #[serde(default = "default_step_length_m")]
    pub step_length_m: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            weight_kg: default_weight_kg(),
            height_cm: default_height_cm(),
            step_length_m: default_step_length_m(),
        }
    }
}

/// Coefficients of the walking calorie formula
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalorieConfig {
    #[serde(default = "default_k1")]
    pub k1: f64,

    #[serde(default = "default_k2")]
    pub k2: f64,
}

impl Default for CalorieConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            k2: default_k2(),
        }
    }
}

/// A motivational message shown once the day's distance reaches `min_km`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DistanceTier {
    pub min_km: f64,
    pub message: String,
}

/// Distance tiers for the summary message
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoalsConfig {
    /// Shown when no tier threshold is reached
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    #[serde(default = "default_tiers")]
    pub tiers: Vec<DistanceTier>,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            fallback_message: default_fallback_message(),
            tiers: default_tiers(),
        }
    }
}

impl GoalsConfig {
    /// Message for the highest tier whose threshold `distance_km` reaches
    pub fn message_for(&self, distance_km: f64) -> &str {
        self.tiers
            .iter()
            .filter(|tier| distance_km >= tier.min_km)
            .max_by(|a, b| a.min_km.total_cmp(&b.min_km))
            .map(|tier| tier.message.as_str())
            .unwrap_or(&self.fallback_message)
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(".local/share")
    });
    base.join("walklog")
}

fn default_weight_kg() -> f64 {
    75.0
}

fn default_height_cm() -> f64 {
    175.0
}

fn default_step_length_m() -> f64 {
    0.65
}

fn default_k1() -> f64 {
    0.035
}

fn default_k2() -> f64 {
    0.029
}

fn default_tiers() -> Vec<DistanceTier> {
    vec![
        DistanceTier {
            min_km: 6.5,
            message: "Great result! The goal has been achieved.".into(),
        },
        DistanceTier {
            min_km: 3.9,
            message: "Not bad! It was a productive day.".into(),
        },
        DistanceTier {
            min_km: 2.0,
            message: "It's not enough, but we'll catch up tomorrow!".into(),
        },
    ]
}

fn default_fallback_message() -> String {
    "Lying down is also useful. The main thing is participation, not victory!".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
        base.join("walklog").join("config.toml")
    }

    /// Check that the measurements make the formulas well defined
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("body.weight_kg", self.body.weight_kg),
            ("body.height_cm", self.body.height_cm),
            ("body.step_length_m", self.body.step_length_m),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if let Some(tier) = self.goals.tiers.iter().find(|t| !t.min_km.is_finite()) {
            return Err(Error::Config(format!(
                "goal tier '{}' has a non-finite threshold",
                tier.message
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
