//! Injury Sim CLI Library
//!
//! Roster loading (CSV, JSON, YAML) and report export for `injury_core`
//! season output.

pub mod report;

use anyhow::{Context, Result};
use injury_core::PlayerProfile;
use std::path::Path;

pub use report::{export_reports, render_summary_table, sheet_slug, ExportManifest};

/// Header expected in roster CSV files.
pub const ROSTER_CSV_HEADER: [&str; 4] = ["name", "resilience", "avg_minutes", "selection_probability"];

/// Read a roster CSV with the [`ROSTER_CSV_HEADER`] columns.
///
/// Rows are returned in file order; validation is left to the runner.
pub fn load_roster_csv(csv_path: &Path) -> Result<Vec<PlayerProfile>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open roster CSV: {}", csv_path.display()))?;

    let headers = reader.headers().context("Failed to read roster CSV header")?.clone();
    for column in ROSTER_CSV_HEADER {
        if !headers.iter().any(|h| h == column) {
            anyhow::bail!("Roster CSV {} is missing column '{}'", csv_path.display(), column);
        }
    }

    let mut roster = Vec::new();
    for (row, record) in reader.deserialize::<PlayerProfile>().enumerate() {
        // header is line 1
        let profile = record.with_context(|| format!("Invalid roster row at line {}", row + 2))?;
        roster.push(profile);
    }

    log::debug!("Loaded {} players from {}", roster.len(), csv_path.display());
    Ok(roster)
}

/// Load a roster file, picking the format from the extension.
pub fn load_roster(path: &Path) -> Result<Vec<PlayerProfile>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        load_roster_csv(path)
    } else {
        injury_core::load_roster(path)
            .with_context(|| format!("Failed to load roster: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> Result<NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
        file.write_all(contents.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_load_roster_csv() -> Result<()> {
        let file = csv_file(
            "name,resilience,avg_minutes,selection_probability\n\
             Martín Silva, 1.2, 90, 0.98\n\
             Gabriel Rojas,1.0,5,0.10\n",
        )?;

        let roster = load_roster(file.path())?;
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0], PlayerProfile::new("Martín Silva", 1.2, 90.0, 0.98));
        assert_eq!(roster[1].selection_probability, 0.10);
        Ok(())
    }

    #[test]
    fn test_column_order_does_not_matter() -> Result<()> {
        let file = csv_file(
            "selection_probability,name,avg_minutes,resilience\n0.5,Loanee,45,0.9\n",
        )?;
        let roster = load_roster_csv(file.path())?;
        assert_eq!(roster[0], PlayerProfile::new("Loanee", 0.9, 45.0, 0.5));
        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() -> Result<()> {
        let file = csv_file("name,resilience,avg_minutes\nSomeone,1.0,90\n")?;
        let err = load_roster_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("selection_probability"));
        Ok(())
    }

    #[test]
    fn test_bad_row_names_its_line() -> Result<()> {
        let file = csv_file(
            "name,resilience,avg_minutes,selection_probability\nA,1.0,90,0.9\nB,tough,90,0.9\n",
        )?;
        let err = load_roster_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
        Ok(())
    }

    #[test]
    fn test_json_roster_goes_through_core() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        file.write_all(
            br#"[{"name": "Solo", "resilience": 1.0, "avg_minutes": 70, "selection_probability": 0.8}]"#,
        )?;
        let roster = load_roster(file.path())?;
        assert_eq!(roster, vec![PlayerProfile::new("Solo", 1.0, 70.0, 0.8)]);
        Ok(())
    }
}
