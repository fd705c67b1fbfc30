//! # Player Season Simulator
//!
//! Day-by-day state machine for one player across a season.
//!
//! ## Day rules (first match wins)
//! 1. **Recovering** - absence counter > 0: count it down, nothing else
//!    happens, even on a match day.
//! 2. **Training** (Mon-Fri) - attended with probability 0.95.
//! 3. **Match** (Sun) - selection draw, minutes ~ N(avg, 10) clamped to
//!    [0, 90], then the weekly injury check.
//! 4. **Rest** (Sat) - nothing.
//!
//! A [`WeeklyLog`] is emitted when each 7-day week closes. The simulator owns
//! its random source, so one instance per player keeps parallel runs
//! reproducible.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::absence::AbsenceSampler;
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::models::{
    format_minutes_hms, InjuryEvent, PlayerProfile, PlayerSeason, PlayerSeasonResult, WeeklyLog,
};
use crate::risk::{round_hazard, RiskModel};
use crate::schedule::{DayKind, DayState, DAYS_PER_WEEK};

pub const TRAINING_ATTENDANCE_PROBABILITY: f64 = 0.95;
pub const MINUTES_STD_DEV: f64 = 10.0;
pub const MAX_MATCH_MINUTES: f64 = 90.0;

#[derive(Debug, Default)]
struct SeasonTotals {
    active_days: u32,
    absence_days: u32,
    minutes: u32,
    training_days: u32,
    matches_played: u32,
    injuries: Vec<InjuryEvent>,
}

/// Counters for the week in progress; dropped once the log is emitted.
#[derive(Debug, Default)]
struct WeekTally {
    training_days: u32,
    match_minutes: u32,
    injury: Option<(NaiveDate, u32)>,
}

pub struct PlayerSeasonSimulator<'a, R: Rng> {
    config: &'a SimulationConfig,
    profile: &'a PlayerProfile,
    risk: RiskModel,
    absence: AbsenceSampler,
    minutes_dist: Normal<f64>,
    rng: R,
    current_date: NaiveDate,
    absence_remaining: u32,
    totals: SeasonTotals,
}

impl<'a, R: Rng> PlayerSeasonSimulator<'a, R> {
    pub fn new(config: &'a SimulationConfig, profile: &'a PlayerProfile, rng: R) -> Result<Self> {
        config.validate()?;
        profile.validate()?;

        let minutes_dist = Normal::new(profile.avg_minutes, MINUTES_STD_DEV)
            .map_err(|e| SimulationError::Distribution(e.to_string()))?;

        Ok(Self {
            config,
            profile,
            risk: RiskModel::from_config(config),
            absence: AbsenceSampler::from_config(config)?,
            minutes_dist,
            rng,
            current_date: config.start_date,
            absence_remaining: 0,
            totals: SeasonTotals::default(),
        })
    }

    /// Simulate every week and assemble the season summary.
    pub fn run(mut self) -> Result<PlayerSeason> {
        let mut weekly_logs = Vec::with_capacity(self.config.weeks as usize);
        for week in 1..=self.config.weeks {
            weekly_logs.push(self.simulate_week(week)?);
        }

        let result = self.finish()?;
        Ok(PlayerSeason { result, weekly_logs })
    }

    fn simulate_week(&mut self, week: u32) -> Result<WeeklyLog> {
        let week_start = self.current_date;
        let mut tally = WeekTally::default();

        for day_index in 0..DAYS_PER_WEEK {
            let state = self.step_day(week, day_index, &mut tally)?;
            if state.is_active() {
                self.totals.active_days += 1;
            }
            self.current_date += Duration::days(1);
        }

        self.totals.training_days += tally.training_days;

        Ok(WeeklyLog {
            week,
            week_start,
            training_days: tally.training_days,
            match_minutes: tally.match_minutes,
            injured: tally.injury.is_some(),
            absence_days: tally.injury.map_or(0, |(_, days)| days),
            injury_date: tally.injury.map(|(date, _)| date),
        })
    }

    fn step_day(&mut self, week: u32, day_index: u32, tally: &mut WeekTally) -> Result<DayState> {
        if self.absence_remaining > 0 {
            self.absence_remaining -= 1;
            return Ok(DayState::Recovering);
        }

        match DayKind::for_day_index(day_index) {
            DayKind::Training => {
                let attended = self.rng.gen_bool(TRAINING_ATTENDANCE_PROBABILITY);
                if attended {
                    tally.training_days += 1;
                }
                Ok(DayState::Training { attended })
            }
            DayKind::Match => {
                let minutes = self.sample_match_minutes();
                tally.match_minutes = minutes;
                self.totals.minutes += minutes;
                if minutes > 0 {
                    self.totals.matches_played += 1;
                }

                self.evaluate_injury(week, minutes, tally)?;
                Ok(DayState::Match { minutes })
            }
            DayKind::Rest => Ok(DayState::Rest),
        }
    }

    fn sample_match_minutes(&mut self) -> u32 {
        if !self.rng.gen_bool(self.profile.selection_probability) {
            return 0;
        }

        let raw = self.minutes_dist.sample(&mut self.rng);
        raw.clamp(0.0, MAX_MATCH_MINUTES).round() as u32
    }

    /// Weekly injury check, run on match day after minutes are known.
    fn evaluate_injury(&mut self, week: u32, minutes: u32, tally: &mut WeekTally) -> Result<()> {
        let risk = self.risk.compute_risk(self.profile.resilience, tally.training_days, minutes)?;

        let roll: f64 = self.rng.gen();
        if roll >= risk.weekly_probability {
            return Ok(());
        }

        let absence_days = self.absence.sample(&mut self.rng);
        self.absence_remaining = absence_days;
        self.totals.absence_days += absence_days;
        tally.injury = Some((self.current_date, absence_days));

        log::trace!(
            "{} injured in week {} ({}), out {} days, hazard {:.4}",
            self.profile.name,
            week,
            self.current_date,
            absence_days,
            risk.hazard_rate
        );

        self.totals.injuries.push(InjuryEvent {
            week,
            date: self.current_date,
            absence_days,
            hazard_rate: round_hazard(risk.hazard_rate),
        });
        Ok(())
    }

    fn finish(self) -> Result<PlayerSeasonResult> {
        let totals = self.totals;
        let season_days = i64::from(self.config.season_length_days());
        let rest_days =
            season_days - i64::from(totals.active_days) - i64::from(totals.absence_days);

        if rest_days < 0 {
            return Err(SimulationError::Consistency(format!(
                "{}: negative rest days ({} season, {} active, {} absent)",
                self.profile.name, season_days, totals.active_days, totals.absence_days
            )));
        }

        Ok(PlayerSeasonResult {
            player: self.profile.name.clone(),
            resilience: self.profile.resilience,
            total_injuries: totals.injuries.len() as u32,
            total_absence_days: totals.absence_days,
            total_minutes: totals.minutes,
            minutes_hms: format_minutes_hms(totals.minutes),
            total_training_days: totals.training_days,
            total_active_days: totals.active_days,
            total_rest_days: rest_days as u32,
            matches_played: totals.matches_played,
            absence_overhang_days: self.absence_remaining,
            injuries: totals.injuries,
        })
    }
}

/// Run one player's season with the given random source.
pub fn simulate_player<R: Rng>(
    config: &SimulationConfig,
    profile: &PlayerProfile,
    rng: R,
) -> Result<PlayerSeason> {
    PlayerSeasonSimulator::new(config, profile, rng)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config_with_weeks(weeks: u32) -> SimulationConfig {
        SimulationConfig { weeks, ..SimulationConfig::default() }
    }

    fn starter() -> PlayerProfile {
        PlayerProfile::new("Carlos Romero", 1.0, 88.0, 0.92)
    }

    #[test]
    fn test_season_shape() {
        let config = SimulationConfig::default();
        let season = simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(42)).unwrap();

        assert_eq!(season.weekly_logs.len(), 34);
        for (i, log) in season.weekly_logs.iter().enumerate() {
            assert_eq!(log.week, i as u32 + 1);
            assert_eq!(log.week_start, config.start_date + Duration::weeks(i as i64));
            assert!(log.training_days <= 5);
            assert!(log.match_minutes <= 90);
            assert_eq!(log.injured, log.injury_date.is_some());
            if !log.injured {
                assert_eq!(log.absence_days, 0);
            }
        }
    }

    #[test]
    fn test_day_accounting_invariant() {
        let config = SimulationConfig::default();
        for seed in 0..50 {
            let season =
                simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(seed)).unwrap();
            assert_eq!(
                season.result.accounted_days(),
                config.season_length_days(),
                "seed {}",
                seed
            );
        }
    }

    #[test]
    fn test_totals_match_weekly_logs() {
        let config = SimulationConfig::high_risk();
        let season = simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(9)).unwrap();
        let result = &season.result;

        let training: u32 = season.weekly_logs.iter().map(|l| l.training_days).sum();
        let minutes: u32 = season.weekly_logs.iter().map(|l| l.match_minutes).sum();
        let absence: u32 = season.weekly_logs.iter().map(|l| l.absence_days).sum();
        let injured_weeks = season.weekly_logs.iter().filter(|l| l.injured).count() as u32;

        assert_eq!(result.total_training_days, training);
        assert_eq!(result.total_minutes, minutes);
        assert_eq!(result.total_absence_days, absence);
        assert_eq!(result.total_injuries, injured_weeks);
        assert_eq!(result.injuries.len() as u32, result.total_injuries);
        assert_eq!(result.minutes_hms, format_minutes_hms(minutes));
        assert_eq!(result.total_active_days, training + result.matches_played);
    }

    #[test]
    fn test_injury_events_line_up_with_logs() {
        let config = SimulationConfig::high_risk();
        let season = simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(3)).unwrap();

        for event in &season.result.injuries {
            let log = &season.weekly_logs[(event.week - 1) as usize];
            assert!(log.injured);
            assert_eq!(log.injury_date, Some(event.date));
            assert_eq!(log.absence_days, event.absence_days);
            // injuries only happen on match day
            assert_eq!(event.date, log.week_start + Duration::days(6));
            assert!((1..=15).contains(&event.absence_days));
            assert_eq!(event.hazard_rate, round_hazard(event.hazard_rate));
        }
    }

    #[test]
    fn test_never_selected_player() {
        let config = SimulationConfig::default();
        let bench = PlayerProfile::new("Bench", 1.0, 80.0, 0.0);

        for seed in 0..20 {
            let season = simulate_player(&config, &bench, ChaCha8Rng::seed_from_u64(seed)).unwrap();
            assert_eq!(season.result.total_minutes, 0);
            assert_eq!(season.result.matches_played, 0);
            assert!(season.weekly_logs.iter().all(|l| l.match_minutes == 0));
            assert_eq!(season.result.total_active_days, season.result.total_training_days);
        }
    }

    #[test]
    fn test_zero_hazard_never_injures() {
        let config = SimulationConfig {
            base_hazard: 0.0,
            training_weight: 0.0,
            minutes_weight: 0.0,
            ..SimulationConfig::default()
        };
        let season = simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(5)).unwrap();

        assert_eq!(season.result.total_injuries, 0);
        assert_eq!(season.result.total_absence_days, 0);
        assert_eq!(season.result.absence_overhang_days, 0);
    }

    #[test]
    fn test_certain_injury_blocks_following_days() {
        // hazard so large every evaluated match ends in injury
        let config = SimulationConfig {
            weeks: 6,
            base_hazard: 50.0,
            min_absence_days: 7,
            max_absence_days: 7,
            ..SimulationConfig::default()
        };
        let season = simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(11)).unwrap();
        let logs = &season.weekly_logs;

        // Week 1 injury covers Mon..Sun of week 2, including its match day.
        assert!(logs[0].injured);
        assert_eq!(logs[1].training_days, 0);
        assert_eq!(logs[1].match_minutes, 0);
        assert!(!logs[1].injured);
        assert!(logs[2].injured);
        assert_eq!(season.result.total_injuries, 3);
        assert_eq!(season.result.total_absence_days, 21);
        // last injury (week 5) runs through week 6 and ends with the season
        assert_eq!(season.result.absence_overhang_days, 0);
        assert_eq!(season.result.accounted_days(), 42);
    }

    #[test]
    fn test_short_absence_ends_mid_week() {
        // every evaluated match injures; 3 days out covers Mon..Wed of week 2
        let config = SimulationConfig {
            weeks: 3,
            base_hazard: 50.0,
            min_absence_days: 3,
            max_absence_days: 3,
            ..SimulationConfig::default()
        };

        for seed in 0..20 {
            let season =
                simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(seed)).unwrap();
            let logs = &season.weekly_logs;

            assert!(logs[0].injured);
            // only Thu and Fri are left to train
            assert!(logs[1].training_days <= 2, "seed {}", seed);
            // back for Sunday: the match is played and evaluated again
            assert!(logs[1].injured, "seed {}", seed);
            assert_eq!(logs[1].injury_date, Some(logs[1].week_start + Duration::days(6)));

            let second = &season.result.injuries[1];
            let expected = RiskModel::from_config(&config)
                .hazard_rate(1.0, logs[1].training_days, logs[1].match_minutes)
                .unwrap();
            assert_eq!(second.hazard_rate, round_hazard(expected));

            assert!(logs[2].training_days <= 2 && logs[2].injured);
            assert_eq!(season.result.total_injuries, 3);
            assert_eq!(season.result.total_absence_days, 9);
            assert_eq!(season.result.absence_overhang_days, 3);
            assert_eq!(season.result.accounted_days(), 21);
        }
    }

    #[test]
    fn test_overhang_counts_days_past_season_end() {
        let config = SimulationConfig {
            weeks: 1,
            base_hazard: 50.0,
            min_absence_days: 1,
            max_absence_days: 1,
            ..SimulationConfig::default()
        };
        let season = simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(1)).unwrap();

        assert_eq!(season.result.total_injuries, 1);
        assert_eq!(season.result.absence_overhang_days, 1);
    }

    #[test]
    fn test_negative_rest_days_is_consistency_error() {
        // Absence granted past the end is still counted, which can overdraw the season.
        let config = SimulationConfig {
            weeks: 1,
            base_hazard: 50.0,
            min_absence_days: 30,
            max_absence_days: 30,
            ..SimulationConfig::default()
        };
        let err = simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, SimulationError::Consistency(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_training_attendance_rate() {
        let config = config_with_weeks(10_000);
        let bench = PlayerProfile::new("Trainee", 1.0, 0.0, 0.0);
        // no load and no base hazard: the player is never injured
        let config = SimulationConfig { base_hazard: 0.0, training_weight: 0.0, ..config };

        let season = simulate_player(&config, &bench, ChaCha8Rng::seed_from_u64(77)).unwrap();
        let sessions = f64::from(season.result.total_training_days);
        let rate = sessions / (10_000.0 * 5.0);
        assert!((rate - TRAINING_ATTENDANCE_PROBABILITY).abs() < 0.02, "rate {}", rate);
    }

    #[test]
    fn test_minutes_follow_average() {
        let config = SimulationConfig {
            base_hazard: 0.0,
            training_weight: 0.0,
            minutes_weight: 0.0,
            ..config_with_weeks(500)
        };
        let sub = PlayerProfile::new("Sub", 1.0, 45.0, 1.0);
        let season = simulate_player(&config, &sub, ChaCha8Rng::seed_from_u64(8)).unwrap();

        let mean = f64::from(season.result.total_minutes) / 500.0;
        assert!((mean - 45.0).abs() < 2.0, "mean minutes {}", mean);
        assert_eq!(season.result.matches_played, 500);
    }

    #[test]
    fn test_same_seed_same_season() {
        let config = SimulationConfig::default();
        let a = simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(123)).unwrap();
        let b = simulate_player(&config, &starter(), ChaCha8Rng::seed_from_u64(123)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs_fail_before_running() {
        let config = SimulationConfig::default();
        let fragile = PlayerProfile::new("Glass", 0.0, 80.0, 0.9);
        assert!(simulate_player(&config, &fragile, ChaCha8Rng::seed_from_u64(0)).is_err());

        let bad = SimulationConfig { min_absence_days: 9, max_absence_days: 3, ..config };
        assert!(simulate_player(&bad, &starter(), ChaCha8Rng::seed_from_u64(0)).is_err());
    }
}
