//! Season report export
//!
//! Writes the season output as flat files:
//! - `season_summary.csv`: one row per player
//! - `injury_history.csv`: one row per injury
//! - `weekly/detail_<player>.csv`: weekly log per player
//! - `season.json`: everything above plus squad stats
//!
//! Nothing here recomputes simulation values; it only formats them.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use injury_core::{PlayerSeasonResult, SeasonOutput, SquadStats, WeeklyLog};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE: &str = "season_summary.csv";
pub const HISTORY_FILE: &str = "injury_history.csv";
pub const WEEKLY_DIR: &str = "weekly";
pub const SEASON_JSON_FILE: &str = "season.json";

/// Sheet-name limit carried over to per-player file stems.
const MAX_SLUG_CHARS: usize = 31;

/// Files written by [`export_reports`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportManifest {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl ExportManifest {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Column order matches the field order of each row type.
const SUMMARY_HEADER: [&str; 8] = [
    "Player",
    "Resilience",
    "Injuries",
    "Absence Days",
    "Minutes (H:M:S)",
    "Training Days",
    "Active Days",
    "Rest Days",
];
const HISTORY_HEADER: [&str; 6] =
    ["player", "resilience", "week", "injury_date", "absence_days", "hazard_rate"];
const WEEKLY_HEADER: [&str; 7] = [
    "week",
    "week_start",
    "training_days",
    "match_minutes",
    "injured",
    "absence_days",
    "injury_date",
];

#[derive(Serialize)]
struct SummaryRow<'a> {
    player: &'a str,
    resilience: f64,
    injuries: u32,
    absence_days: u32,
    minutes: &'a str,
    training_days: u32,
    active_days: u32,
    rest_days: u32,
}

impl<'a> From<&'a PlayerSeasonResult> for SummaryRow<'a> {
    fn from(result: &'a PlayerSeasonResult) -> Self {
        Self {
            player: &result.player,
            resilience: result.resilience,
            injuries: result.total_injuries,
            absence_days: result.total_absence_days,
            minutes: &result.minutes_hms,
            training_days: result.total_training_days,
            active_days: result.total_active_days,
            rest_days: result.total_rest_days,
        }
    }
}

#[derive(Serialize)]
struct InjuryRow<'a> {
    player: &'a str,
    resilience: f64,
    week: u32,
    injury_date: NaiveDate,
    absence_days: u32,
    hazard_rate: f64,
}

#[derive(Serialize)]
struct SeasonDocument<'a> {
    results: &'a [PlayerSeasonResult],
    weekly_logs: &'a [injury_core::TaggedWeeklyLog],
    squad: SquadStats,
}

/// Write every report under `dir`, creating it if needed.
///
/// A failure leaves `output` untouched; the caller still owns the results.
pub fn export_reports(output: &SeasonOutput, dir: &Path) -> Result<ExportManifest> {
    fs::create_dir_all(dir.join(WEEKLY_DIR))
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut manifest = ExportManifest { output_dir: dir.to_path_buf(), files: Vec::new() };

    let summary_path = dir.join(SUMMARY_FILE);
    write_csv(&summary_path, &SUMMARY_HEADER, output.results.iter().map(SummaryRow::from))?;
    manifest.files.push(summary_path);

    let history_path = dir.join(HISTORY_FILE);
    let injuries = output.results.iter().flat_map(|result| {
        result.injuries.iter().map(move |event| InjuryRow {
            player: &result.player,
            resilience: result.resilience,
            week: event.week,
            injury_date: event.date,
            absence_days: event.absence_days,
            hazard_rate: event.hazard_rate,
        })
    });
    write_csv(&history_path, &HISTORY_HEADER, injuries)?;
    manifest.files.push(history_path);

    let mut used = HashSet::new();
    for result in &output.results {
        let mut stem = sheet_slug(&result.player);
        let mut suffix = 2;
        while !used.insert(stem.clone()) {
            stem = format!("{}_{}", sheet_slug(&result.player), suffix);
            suffix += 1;
        }

        let path = dir.join(WEEKLY_DIR).join(format!("{}.csv", stem));
        let logs: Vec<&WeeklyLog> = output.logs_for(&result.player).map(|tagged| &tagged.log).collect();
        write_csv(&path, &WEEKLY_HEADER, logs)?;
        manifest.files.push(path);
    }

    let json_path = dir.join(SEASON_JSON_FILE);
    let document = SeasonDocument {
        results: &output.results,
        weekly_logs: &output.weekly_logs,
        squad: SquadStats::from_results(&output.results),
    };
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize season JSON")?;
    fs::write(&json_path, json)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;
    manifest.files.push(json_path);

    log::info!("Exported {} report files to {}", manifest.len(), dir.display());
    Ok(manifest)
}

/// The header row is always written, so a table with no rows keeps its columns.
fn write_csv<T, I>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer
        .write_record(header)
        .with_context(|| format!("Failed to write header to {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    writer.flush().with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

/// `detail_<name>` with spaces as underscores, cut to 31 characters.
pub fn sheet_slug(player: &str) -> String {
    format!("detail_{}", player)
        .replace(' ', "_")
        .chars()
        .take(MAX_SLUG_CHARS)
        .collect()
}

/// Console table of season totals, one line per player in roster order.
pub fn render_summary_table(results: &[PlayerSeasonResult]) -> String {
    let name_width = results
        .iter()
        .map(|r| r.player.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let mut table = format!(
        "{:<name_width$}  {:>10}  {:>8}  {:>12}  {:>15}  {:>13}  {:>11}  {:>9}\n",
        "Player",
        "Resilience",
        "Injuries",
        "Absence Days",
        "Minutes (H:M:S)",
        "Training Days",
        "Active Days",
        "Rest Days",
    );
    table.push_str(&"-".repeat(name_width + 2 + 10 + 2 + 8 + 2 + 12 + 2 + 15 + 2 + 13 + 2 + 11 + 2 + 9));
    table.push('\n');

    for r in results {
        table.push_str(&format!(
            "{:<name_width$}  {:>10.2}  {:>8}  {:>12}  {:>15}  {:>13}  {:>11}  {:>9}\n",
            r.player,
            r.resilience,
            r.total_injuries,
            r.total_absence_days,
            r.minutes_hms,
            r.total_training_days,
            r.total_active_days,
            r.total_rest_days,
        ));
    }
    table
}
