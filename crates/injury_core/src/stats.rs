// Squad-level aggregates over a finished season
use serde::{Deserialize, Serialize};

use crate::models::PlayerSeasonResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub player: String,
    pub absence_days: u32,
    pub injuries: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SquadStats {
    pub players: usize,
    pub total_injuries: u32,
    pub total_absence_days: u32,
    pub total_minutes: u32,
    pub total_active_days: u32,
    pub mean_absence_days: f64,
    /// Injuries per 1000 active days
    pub injury_rate_per_1000_active_days: f64,
    /// Players that finished the season without an injury
    pub injury_free_players: usize,
    /// Highest absence total; ties go to the earlier roster entry
    pub most_absent: Option<PlayerRef>,
}

impl SquadStats {
    pub fn from_results(results: &[PlayerSeasonResult]) -> Self {
        let mut stats = SquadStats { players: results.len(), ..Default::default() };

        for result in results {
            stats.total_injuries += result.total_injuries;
            stats.total_absence_days += result.total_absence_days;
            stats.total_minutes += result.total_minutes;
            stats.total_active_days += result.total_active_days;
            if result.total_injuries == 0 {
                stats.injury_free_players += 1;
            }

            let beats_current = stats
                .most_absent
                .as_ref()
                .map_or(true, |best| result.total_absence_days > best.absence_days);
            if beats_current {
                stats.most_absent = Some(PlayerRef {
                    player: result.player.clone(),
                    absence_days: result.total_absence_days,
                    injuries: result.total_injuries,
                });
            }
        }

        if stats.players > 0 {
            stats.mean_absence_days = f64::from(stats.total_absence_days) / stats.players as f64;
        }
        if stats.total_active_days > 0 {
            stats.injury_rate_per_1000_active_days =
                f64::from(stats.total_injuries) * 1000.0 / f64::from(stats.total_active_days);
        }

        stats
    }
}
