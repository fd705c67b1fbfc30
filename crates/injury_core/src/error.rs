use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid resilience for {player}: {value} (must be > 0)")]
    InvalidResilience { player: String, value: f64 },

    #[error("Invalid selection probability for {player}: {value} (must be within [0, 1])")]
    InvalidSelectionProbability { player: String, value: f64 },

    #[error("Invalid average minutes for {player}: {value}")]
    InvalidAverageMinutes { player: String, value: f64 },

    #[error("Invalid absence range: min {min} > max {max}")]
    InvalidAbsenceRange { min: u32, max: u32 },

    #[error("Invalid season length: {weeks} weeks")]
    InvalidSeasonLength { weeks: u32 },

    #[error("Season must start on a Monday, got {date} ({weekday})")]
    InvalidStartDate { date: String, weekday: String },

    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Empty roster")]
    EmptyRoster,

    #[error("Duplicate player name: {0}")]
    DuplicatePlayer(String),

    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error("Consistency error: {0}")]
    Consistency(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimulationError {
    /// Whether the caller can fix the input and try again.
    ///
    /// Consistency failures point at a modelling defect and are never
    /// recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SimulationError::Consistency(_) | SimulationError::Distribution(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: String },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
