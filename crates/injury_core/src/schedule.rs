// Weekly calendar: Monday..Friday training, Saturday rest, Sunday match
use chrono::{Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: u32 = 7;
/// Day indices `0..TRAINING_DAYS_PER_WEEK` are training days
pub const TRAINING_DAYS_PER_WEEK: u32 = 5;
pub const MATCH_DAY_INDEX: u32 = 6;

/// What the calendar schedules for a day, before the player's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayKind {
    Training,
    Rest,
    Match,
}

impl DayKind {
    /// `day_index` is the offset within the week (0 = Monday).
    pub fn for_day_index(day_index: u32) -> Self {
        match day_index % DAYS_PER_WEEK {
            i if i < TRAINING_DAYS_PER_WEEK => DayKind::Training,
            MATCH_DAY_INDEX => DayKind::Match,
            _ => DayKind::Rest,
        }
    }

    pub fn for_weekday(weekday: Weekday) -> Self {
        Self::for_day_index(weekday.num_days_from_monday())
    }
}

/// State a player ends up in on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayState {
    /// Attended (`true`) or skipped a training session
    Training { attended: bool },
    Match { minutes: u32 },
    Rest,
    /// Absence counter was running; overrides the calendar
    Recovering,
}

impl DayState {
    /// Counts towards the active-days total
    pub fn is_active(&self) -> bool {
        match self {
            DayState::Training { attended } => *attended,
            DayState::Match { minutes } => *minutes > 0,
            DayState::Rest | DayState::Recovering => false,
        }
    }
}

/// Start date of a 1-based week.
pub fn week_start(season_start: NaiveDate, week: u32) -> NaiveDate {
    season_start + Duration::weeks(i64::from(week.saturating_sub(1)))
}
