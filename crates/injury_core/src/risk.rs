//! # Injury Risk Model
//!
//! Exponential hazard model evaluated once per week:
//!
//! ```text
//! λ = base / resilience + training_days * w_training + minutes * w_minutes
//! P(injury in one week) = 1 - e^(-λ)
//! ```
//!
//! λ is the rate of an exponential time-to-injury; the weekly probability is
//! the chance of at least one event inside a one-week window.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub hazard_rate: f64,
    pub weekly_probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskModel {
    base_hazard: f64,
    training_weight: f64,
    minutes_weight: f64,
}

impl RiskModel {
    pub fn new(base_hazard: f64, training_weight: f64, minutes_weight: f64) -> Self {
        Self { base_hazard, training_weight, minutes_weight }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.base_hazard, config.training_weight, config.minutes_weight)
    }

    /// Weekly hazard for a player's load.
    ///
    /// Fails when `resilience <= 0` since the base term is undefined there.
    pub fn hazard_rate(&self, resilience: f64, training_load: u32, minutes_played: u32) -> Result<f64> {
        if !(resilience.is_finite() && resilience > 0.0) {
            return Err(SimulationError::InvalidParameter { name: "resilience", value: resilience });
        }

        Ok(self.base_hazard / resilience
            + f64::from(training_load) * self.training_weight
            + f64::from(minutes_played) * self.minutes_weight)
    }

    pub fn compute_risk(
        &self,
        resilience: f64,
        training_load: u32,
        minutes_played: u32,
    ) -> Result<RiskAssessment> {
        let hazard_rate = self.hazard_rate(resilience, training_load, minutes_played)?;
        let weekly_probability = weekly_probability(hazard_rate)?;
        Ok(RiskAssessment { hazard_rate, weekly_probability })
    }
}

/// `1 - e^(-λ)` over a one-week window.
///
/// The result lies in `[0, 1)` for every hazard up to about 36.7. Larger
/// hazards round to exactly `1.0` in f64; that value is accepted and means a
/// certain injury, so the accepted range is the closed `[0, 1]`.
///
/// A negative or non-finite λ, or a result outside `[0, 1]`, is a modelling
/// defect and is reported as [`SimulationError::Consistency`].
pub fn weekly_probability(hazard_rate: f64) -> Result<f64> {
    if !(hazard_rate.is_finite() && hazard_rate >= 0.0) {
        return Err(SimulationError::Consistency(format!(
            "hazard rate must be finite and non-negative, got {}",
            hazard_rate
        )));
    }

    let probability = -(-hazard_rate).exp_m1();
    if !(0.0..=1.0).contains(&probability) {
        return Err(SimulationError::Consistency(format!(
            "weekly probability {} out of range for hazard {}",
            probability, hazard_rate
        )));
    }
    Ok(probability)
}

/// Round to 4 decimal places for the injury history.
pub fn round_hazard(hazard_rate: f64) -> f64 {
    (hazard_rate * 10_000.0).round() / 10_000.0
}
