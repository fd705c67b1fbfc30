//! # Simulation Configuration
//!
//! One validated [`SimulationConfig`] drives a whole run. It is built once
//! (defaults, file, then overrides), validated, and shared read-only by every
//! player simulation.
//!
//! ## Usage
//! ```rust
//! use injury_core::config::SimulationConfig;
//!
//! let config = SimulationConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.season_length_days(), 34 * 7);
//! ```

mod overrides;

pub use overrides::{
    apply_overrides, parse_override, OverrideOutcome, OverrideReport, OVERRIDE_KEYS,
};

use std::fs;
use std::path::Path;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, SimulationError};
use crate::schedule::DAYS_PER_WEEK;

/// Every season starts on this weekday so that day index 0 is a Monday.
pub const SEASON_START_WEEKDAY: Weekday = Weekday::Mon;

/// Longest accepted season. Keeps day counts inside `u32` and the end date
/// inside chrono's calendar.
pub const MAX_WEEKS: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of 7-day weeks (one match per week)
    pub weeks: u32,
    /// Must be a Monday
    pub start_date: NaiveDate,
    /// Weekly hazard before resilience scaling
    pub base_hazard: f64,
    /// Hazard added per attended training day
    pub training_weight: f64,
    /// Hazard added per minute played
    pub minutes_weight: f64,
    pub min_absence_days: u32,
    pub max_absence_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            weeks: 34,
            start_date: NaiveDate::from_ymd_opt(2025, 11, 24).unwrap_or(NaiveDate::MIN),
            base_hazard: 0.05,
            training_weight: 0.005,
            minutes_weight: 0.001,
            min_absence_days: 1,
            max_absence_days: 15,
        }
    }
}

impl SimulationConfig {
    /// Lighter load weights and shorter absences
    pub fn low_risk() -> Self {
        let mut cfg = Self::default();
        cfg.base_hazard = 0.02;
        cfg.training_weight = 0.002;
        cfg.minutes_weight = 0.0005;
        cfg.max_absence_days = 10;
        cfg
    }

    /// Congested-calendar style: double weights, stock absence range
    pub fn high_risk() -> Self {
        let mut cfg = Self::default();
        cfg.base_hazard = 0.1;
        cfg.training_weight = 0.01;
        cfg.minutes_weight = 0.002;
        cfg
    }

    /// Saturates at `u32::MAX` for configs that would fail [`validate`](Self::validate).
    pub fn season_length_days(&self) -> u32 {
        self.weeks.checked_mul(DAYS_PER_WEEK).unwrap_or(u32::MAX)
    }

    /// First day after the season, `None` when it falls outside the calendar.
    pub fn season_end(&self) -> Option<NaiveDate> {
        let days = self.weeks.checked_mul(DAYS_PER_WEEK)?;
        self.start_date.checked_add_days(Days::new(u64::from(days)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.weeks == 0 || self.weeks > MAX_WEEKS || self.season_end().is_none() {
            return Err(SimulationError::InvalidSeasonLength { weeks: self.weeks });
        }
        if self.start_date.weekday() != SEASON_START_WEEKDAY {
            return Err(SimulationError::InvalidStartDate {
                date: self.start_date.to_string(),
                weekday: self.start_date.weekday().to_string(),
            });
        }
        if self.min_absence_days > self.max_absence_days {
            return Err(SimulationError::InvalidAbsenceRange {
                min: self.min_absence_days,
                max: self.max_absence_days,
            });
        }

        for (name, value) in [
            ("base_hazard", self.base_hazard),
            ("training_weight", self.training_weight),
            ("minutes_weight", self.minutes_weight),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimulationError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::from(e).into())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::from(e).into())
    }

    /// Load from a `.yaml`/`.yml` or `.json` file. The result is not validated.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(ConfigError::from)?;
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();

        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text),
            "json" => Self::from_json_str(&text),
            _ => Err(ConfigError::UnsupportedFormat { path: path.display().to_string() }.into()),
        }
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::from(e).into())
    }
}

// ========== Tests ==========
