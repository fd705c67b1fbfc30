//! `key=value` overrides applied on top of a loaded config.
//!
//! A value that does not parse keeps the previous setting and is reported;
//! the caller still has to run [`SimulationConfig::validate`] afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::SimulationConfig;

pub const OVERRIDE_KEYS: [&str; 7] = [
    "weeks",
    "start_date",
    "base_hazard",
    "training_weight",
    "minutes_weight",
    "min_absence_days",
    "max_absence_days",
];

#[derive(Debug, Clone, PartialEq)]
pub enum OverrideOutcome {
    Applied { key: String, value: String },
    /// Blank value, setting left as is
    Unchanged { key: String },
    /// Unparseable value, previous setting kept
    Rejected { key: String, value: String, kept: String },
    UnknownKey { key: String },
}

impl fmt::Display for OverrideOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideOutcome::Applied { key, value } => write!(f, "{} = {}", key, value),
            OverrideOutcome::Unchanged { key } => write!(f, "{} unchanged", key),
            OverrideOutcome::Rejected { key, value, kept } => {
                write!(f, "invalid value {:?} for {}, keeping {}", value, key, kept)
            }
            OverrideOutcome::UnknownKey { key } => write!(f, "unknown setting {}", key),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideReport {
    pub outcomes: Vec<OverrideOutcome>,
}

impl OverrideReport {
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, OverrideOutcome::Applied { .. })).count()
    }

    pub fn has_problems(&self) -> bool {
        self.outcomes.iter().any(|o| {
            matches!(o, OverrideOutcome::Rejected { .. } | OverrideOutcome::UnknownKey { .. })
        })
    }
}

/// Split `key=value`. Whitespace around both halves is dropped.
pub fn parse_override(arg: &str) -> Option<(String, String)> {
    let (key, value) = arg.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Apply overrides in order; later entries win.
pub fn apply_overrides(config: &mut SimulationConfig, overrides: &[(String, String)]) -> OverrideReport {
    let mut report = OverrideReport::default();

    for (key, value) in overrides {
        let outcome = if value.trim().is_empty() {
            OverrideOutcome::Unchanged { key: key.clone() }
        } else {
            match key.as_str() {
                "weeks" => set_field(&mut config.weeks, key, value),
                "start_date" => set_field(&mut config.start_date, key, value),
                "base_hazard" => set_field(&mut config.base_hazard, key, value),
                "training_weight" => set_field(&mut config.training_weight, key, value),
                "minutes_weight" => set_field(&mut config.minutes_weight, key, value),
                "min_absence_days" => set_field(&mut config.min_absence_days, key, value),
                "max_absence_days" => set_field(&mut config.max_absence_days, key, value),
                _ => OverrideOutcome::UnknownKey { key: key.clone() },
            }
        };

        match &outcome {
            OverrideOutcome::Applied { .. } => log::debug!("config override: {}", outcome),
            OverrideOutcome::Unchanged { .. } => {}
            _ => log::warn!("config override: {}", outcome),
        }
        report.outcomes.push(outcome);
    }

    report
}

trait OverrideValue: Sized + fmt::Display {
    fn parse_value(raw: &str) -> Option<Self>;
}

macro_rules! from_str_value {
    ($($ty:ty),*) => {
        $(impl OverrideValue for $ty {
            fn parse_value(raw: &str) -> Option<Self> {
                <$ty as FromStr>::from_str(raw.trim()).ok()
            }
        })*
    };
}

from_str_value!(u32, f64);

impl OverrideValue for NaiveDate {
    fn parse_value(raw: &str) -> Option<Self> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
    }
}

fn set_field<T: OverrideValue>(field: &mut T, key: &str, raw: &str) -> OverrideOutcome {
    match T::parse_value(raw) {
        Some(parsed) => {
            *field = parsed;
            OverrideOutcome::Applied { key: key.to_string(), value: field.to_string() }
        }
        None => OverrideOutcome::Rejected {
            key: key.to_string(),
            value: raw.to_string(),
            kept: field.to_string(),
        },
    }
}
