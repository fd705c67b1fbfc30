use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One record per (player, week), emitted when the week closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyLog {
    /// 1-based
    pub week: u32,
    pub week_start: NaiveDate,
    pub training_days: u32,
    pub match_minutes: u32,
    pub injured: bool,
    /// 0 when no injury happened this week
    pub absence_days: u32,
    pub injury_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryEvent {
    pub week: u32,
    pub date: NaiveDate,
    pub absence_days: u32,
    /// Rounded to 4 decimal places
    pub hazard_rate: f64,
}

/// Season totals for one player.
///
/// `total_active_days + total_absence_days + total_rest_days` always equals
/// the season length in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonResult {
    pub player: String,
    pub resilience: f64,
    pub total_injuries: u32,
    pub total_absence_days: u32,
    pub total_minutes: u32,
    /// `HH:MM:SS` rendering of `total_minutes`
    pub minutes_hms: String,
    pub total_training_days: u32,
    pub total_active_days: u32,
    pub total_rest_days: u32,
    pub matches_played: u32,
    /// Absence days still pending when the season ended
    pub absence_overhang_days: u32,
    pub injuries: Vec<InjuryEvent>,
}

impl PlayerSeasonResult {
    pub fn accounted_days(&self) -> u32 {
        self.total_active_days + self.total_absence_days + self.total_rest_days
    }
}

/// Weekly log tagged with the owning player, flattened on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedWeeklyLog {
    pub player: String,
    #[serde(flatten)]
    pub log: WeeklyLog,
}

/// Output of a single player's season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeason {
    pub result: PlayerSeasonResult,
    pub weekly_logs: Vec<WeeklyLog>,
}

impl PlayerSeason {
    pub fn tagged_logs(&self) -> impl Iterator<Item = TaggedWeeklyLog> + '_ {
        self.weekly_logs
            .iter()
            .map(|log| TaggedWeeklyLog { player: self.result.player.clone(), log: log.clone() })
    }
}

/// Render minutes as `HH:MM:00`; hours are not wrapped at 24.
pub fn format_minutes_hms(minutes: u32) -> String {
    format!("{:02}:{:02}:00", minutes / 60, minutes % 60)
}
