use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, SimulationError};

/// Immutable per-player parameters for a season run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Unique within a roster
    pub name: String,
    /// Scales the base hazard inversely (lower = more fragile)
    pub resilience: f64,
    /// Mean of the minutes distribution when selected
    pub avg_minutes: f64,
    /// Chance of being picked for a given match, in [0, 1]
    pub selection_probability: f64,
}

impl PlayerProfile {
    pub fn new(
        name: impl Into<String>,
        resilience: f64,
        avg_minutes: f64,
        selection_probability: f64,
    ) -> Self {
        Self { name: name.into(), resilience, avg_minutes, selection_probability }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.resilience.is_finite() && self.resilience > 0.0) {
            return Err(SimulationError::InvalidResilience {
                player: self.name.clone(),
                value: self.resilience,
            });
        }
        if !(0.0..=1.0).contains(&self.selection_probability) {
            return Err(SimulationError::InvalidSelectionProbability {
                player: self.name.clone(),
                value: self.selection_probability,
            });
        }
        if !(self.avg_minutes.is_finite() && self.avg_minutes >= 0.0) {
            return Err(SimulationError::InvalidAverageMinutes {
                player: self.name.clone(),
                value: self.avg_minutes,
            });
        }
        Ok(())
    }
}

/// Checks every profile plus roster-level rules (non-empty, unique names).
pub fn validate_roster(roster: &[PlayerProfile]) -> Result<()> {
    if roster.is_empty() {
        return Err(SimulationError::EmptyRoster);
    }

    let mut seen = HashSet::with_capacity(roster.len());
    for profile in roster {
        profile.validate()?;
        if !seen.insert(profile.name.as_str()) {
            return Err(SimulationError::DuplicatePlayer(profile.name.clone()));
        }
    }
    Ok(())
}

/// Read a roster list from a `.yaml`/`.yml` or `.json` file. Not validated.
pub fn load_roster(path: &Path) -> Result<Vec<PlayerProfile>> {
    let text = fs::read_to_string(path).map_err(ConfigError::from)?;
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();

    let roster = match extension.to_ascii_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&text).map_err(ConfigError::from)?,
        "json" => serde_json::from_str(&text).map_err(ConfigError::from)?,
        _ => return Err(ConfigError::UnsupportedFormat { path: path.display().to_string() }.into()),
    };
    Ok(roster)
}

/// Stock 18-man squad: 11 starters followed by 7 substitutes.
pub fn default_roster() -> Vec<PlayerProfile> {
    [
        // Starters
        ("Martín Silva", 1.2, 90.0, 0.98),
        ("Javier González", 1.1, 85.0, 0.95),
        ("Andrés López", 1.0, 80.0, 0.90),
        ("Ricardo Pérez", 0.9, 75.0, 0.88),
        ("Carlos Romero", 1.0, 88.0, 0.92),
        ("Pablo Díaz", 1.05, 80.0, 0.91),
        ("Miguel Torres", 1.1, 70.0, 0.85),
        ("Sebastián Castro", 1.0, 80.0, 0.90),
        ("Nicolás Vargas", 0.95, 90.0, 0.96),
        ("Diego Herrera", 1.0, 85.0, 0.90),
        ("Juan Méndez", 1.0, 80.0, 0.90),
        // Substitutes
        ("Luis Soto", 0.9, 30.0, 0.60),
        ("Emilio Guzmán", 1.2, 45.0, 0.70),
        ("Alejandro Ruiz", 0.8, 20.0, 0.50),
        ("Esteban Ríos", 1.0, 35.0, 0.65),
        ("Roberto Peña", 0.95, 40.0, 0.75),
        ("Fernando Vidal", 1.1, 50.0, 0.80),
        ("Gabriel Rojas", 1.0, 5.0, 0.10), // backup keeper
    ]
    .into_iter()
    .map(|(name, resilience, minutes, probability)| {
        PlayerProfile::new(name, resilience, minutes, probability)
    })
    .collect()
}
