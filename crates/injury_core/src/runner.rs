//! SeasonRunner - runs every roster entry through the season simulator.
//!
//! Each player gets its own `ChaCha8Rng`: same master seed, one ChaCha stream
//! per roster index. Results therefore do not depend on execution order, and
//! sequential and parallel runs produce identical output.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::models::{validate_roster, PlayerProfile, PlayerSeason, PlayerSeasonResult, TaggedWeeklyLog};
use crate::simulator::simulate_player;

/// Aggregated output of a full squad run, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonOutput {
    pub results: Vec<PlayerSeasonResult>,
    pub weekly_logs: Vec<TaggedWeeklyLog>,
}

impl SeasonOutput {
    fn from_seasons(seasons: Vec<PlayerSeason>) -> Self {
        let mut output = SeasonOutput {
            results: Vec::with_capacity(seasons.len()),
            weekly_logs: Vec::with_capacity(seasons.iter().map(|s| s.weekly_logs.len()).sum()),
        };
        for season in seasons {
            output.weekly_logs.extend(season.tagged_logs());
            output.results.push(season.result);
        }
        output
    }

    /// Weekly logs belonging to one player, in week order.
    pub fn logs_for<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a TaggedWeeklyLog> + 'a {
        self.weekly_logs.iter().filter(move |log| log.player == player)
    }
}

pub struct SeasonRunner<'a> {
    config: &'a SimulationConfig,
    seed: u64,
    parallel: bool,
}

impl<'a> SeasonRunner<'a> {
    pub fn new(config: &'a SimulationConfig, seed: u64) -> Self {
        Self { config, seed, parallel: false }
    }

    /// Spread players over the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random source for the player at `index` in the roster.
    pub fn player_rng(&self, index: usize) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(index as u64);
        rng
    }

    pub fn run(&self, roster: &[PlayerProfile]) -> Result<SeasonOutput> {
        self.run_with_progress(roster, |_, _, _| {})
    }

    /// Like [`run`](Self::run), calling `progress(done, total, player)` after
    /// each player finishes. In parallel mode callbacks arrive in completion
    /// order.
    pub fn run_with_progress<F>(&self, roster: &[PlayerProfile], progress: F) -> Result<SeasonOutput>
    where
        F: Fn(usize, usize, &str) + Sync,
    {
        self.config.validate()?;
        validate_roster(roster)?;

        log::info!(
            "Simulating {} players over {} weeks (seed {}, parallel: {})",
            roster.len(),
            self.config.weeks,
            self.seed,
            self.parallel
        );

        let total = roster.len();
        let done = AtomicUsize::new(0);
        let simulate = |(index, profile): (usize, &PlayerProfile)| -> Result<PlayerSeason> {
            let season = simulate_player(self.config, profile, self.player_rng(index))?;
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!(
                "Simulated player {}/{}: {} ({} injuries, {} days out)",
                finished,
                total,
                profile.name,
                season.result.total_injuries,
                season.result.total_absence_days
            );
            progress(finished, total, &profile.name);
            Ok(season)
        };

        let seasons: Vec<PlayerSeason> = if self.parallel {
            roster.par_iter().enumerate().map(simulate).collect::<Result<_>>()?
        } else {
            roster.iter().enumerate().map(simulate).collect::<Result<_>>()?
        };

        let output = SeasonOutput::from_seasons(seasons);
        log::info!(
            "Season complete: {} injuries across {} players",
            output.results.iter().map(|r| r.total_injuries).sum::<u32>(),
            output.results.len()
        );
        Ok(output)
    }
}

/// Run the whole roster sequentially with a fixed seed.
pub fn run(roster: &[PlayerProfile], config: &SimulationConfig, seed: u64) -> Result<SeasonOutput> {
    SeasonRunner::new(config, seed).run(roster)
}
