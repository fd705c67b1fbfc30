pub mod player;
pub mod season;

pub use player::{default_roster, load_roster, validate_roster, PlayerProfile};
pub use season::{
    format_minutes_hms, InjuryEvent, PlayerSeason, PlayerSeasonResult, TaggedWeeklyLog, WeeklyLog,
};
