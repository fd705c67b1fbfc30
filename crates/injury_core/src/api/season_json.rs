// Season simulation JSON API
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::models::{default_roster, PlayerProfile, PlayerSeasonResult, TaggedWeeklyLog};
use crate::runner::SeasonRunner;
use crate::stats::SquadStats;
use crate::SCHEMA_VERSION;

/// Season request. Missing config or roster fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonRequest {
    pub schema_version: u8,
    pub seed: u64,
    #[serde(default)]
    pub config: Option<SimulationConfig>,
    #[serde(default)]
    pub roster: Option<Vec<PlayerProfile>>,
    #[serde(default)]
    pub parallel: bool,
}

impl SeasonRequest {
    pub fn new(seed: u64) -> Self {
        Self { schema_version: SCHEMA_VERSION, seed, config: None, roster: None, parallel: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub config: SimulationConfig,
    pub results: Vec<PlayerSeasonResult>,
    pub weekly_logs: Vec<TaggedWeeklyLog>,
    pub squad: SquadStats,
}

/// Typed entry point behind [`simulate_season_json`].
pub fn simulate_season(request: SeasonRequest) -> Result<SeasonResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimulationError::SchemaVersion {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let config = request.config.unwrap_or_default();
    let roster = request.roster.unwrap_or_else(default_roster);

    let output = SeasonRunner::new(&config, request.seed).parallel(request.parallel).run(&roster)?;
    let squad = SquadStats::from_results(&output.results);

    Ok(SeasonResponse {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        config,
        results: output.results,
        weekly_logs: output.weekly_logs,
        squad,
    })
}

/// Run a season from a JSON request and return the JSON response.
pub fn simulate_season_json(request_json: &str) -> Result<String> {
    let request: SeasonRequest = serde_json::from_str(request_json)?;
    let response = simulate_season(request)?;
    Ok(serde_json::to_string(&response)?)
}
