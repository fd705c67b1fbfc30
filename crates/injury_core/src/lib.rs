//! # injury_core - Seeded Squad Injury-Risk Season Simulation
//!
//! Simulates a football season day by day for every player of a squad:
//! training attendance, match selection and minutes, a weekly injury check
//! from an exponential hazard model, and recovery periods.
//!
//! ## Features
//! - Deterministic: same seed, config and roster give the same season
//! - Per-player random streams, so parallel runs match sequential ones
//! - YAML/JSON configuration with presets and `key=value` overrides
//! - JSON API for embedding in other tools
//!
//! ## Example
//! ```rust
//! use injury_core::{default_roster, SeasonRunner, SimulationConfig};
//!
//! let config = SimulationConfig::default();
//! let output = SeasonRunner::new(&config, 42).run(&default_roster()).unwrap();
//! assert_eq!(output.results.len(), 18);
//! ```

pub mod absence;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod risk;
pub mod runner;
pub mod schedule;
pub mod simulator;
pub mod stats;

pub use absence::{sample_absence_days, AbsenceSampler};
pub use api::{simulate_season, simulate_season_json, SeasonRequest, SeasonResponse};
pub use config::{apply_overrides, parse_override, OverrideOutcome, OverrideReport, SimulationConfig};
pub use error::{ConfigError, Result, SimulationError};
pub use models::{
    default_roster, format_minutes_hms, load_roster, validate_roster, InjuryEvent, PlayerProfile,
    PlayerSeason, PlayerSeasonResult, TaggedWeeklyLog, WeeklyLog,
};
pub use risk::{weekly_probability, RiskAssessment, RiskModel};
pub use runner::{run as run_season, SeasonOutput, SeasonRunner};
pub use simulator::{simulate_player, PlayerSeasonSimulator};
pub use stats::{PlayerRef, SquadStats};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON API schema version
pub const SCHEMA_VERSION: u8 = 1;
