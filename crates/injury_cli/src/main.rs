//! Injury Sim CLI
//!
//! Runs a seeded squad season and exports the reports.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use injury_core::{
    apply_overrides, default_roster, parse_override, SeasonRunner, SimulationConfig, SquadStats,
};
#[cfg(feature = "cli")]
use std::io::Write;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "injury-sim")]
#[command(about = "Simulate a football squad's injury risk over a season", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG still wins)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    LowRisk,
    HighRisk,
}

#[cfg(feature = "cli")]
impl Preset {
    fn config(self) -> SimulationConfig {
        match self {
            Preset::Default => SimulationConfig::default(),
            Preset::LowRisk => SimulationConfig::low_risk(),
            Preset::HighRisk => SimulationConfig::high_risk(),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run a season and export reports
    Run {
        /// YAML or JSON config file (replaces the preset)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Built-in parameter set
        #[arg(long, value_enum, default_value = "default")]
        preset: Preset,

        /// Roster file (.csv, .json, .yaml); stock squad if omitted
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Master seed
        #[arg(long, default_value = "42", conflicts_with = "random_seed")]
        seed: u64,

        /// Draw the master seed from the OS
        #[arg(long)]
        random_seed: bool,

        /// Override one setting, e.g. --set weeks=20
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Report directory
        #[arg(long, default_value = "reports")]
        out: PathBuf,

        /// Simulate players on all cores
        #[arg(long)]
        parallel: bool,

        /// Print results only
        #[arg(long)]
        no_export: bool,
    },

    /// Print a config file to start from
    Config {
        #[arg(long, value_enum, default_value = "default")]
        preset: Preset,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match execute(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            log::error!("{:#}", err);
            std::process::exit(1);
        }
    }
}

/// Returns the process exit code; export failures exit with 2 after the
/// results have been printed.
#[cfg(feature = "cli")]
fn execute(command: Commands) -> Result<i32> {
    match command {
        Commands::Config { preset } => {
            print!("{}", preset.config().to_yaml_string()?);
            Ok(0)
        }

        Commands::Run { config, preset, roster, seed, random_seed, overrides, out, parallel, no_export } => {
            let config = build_config(config, preset, &overrides)?;
            let roster = match roster {
                Some(path) => injury_cli::load_roster(&path)?,
                None => default_roster(),
            };
            let seed = if random_seed { rand::random::<u64>() } else { seed };

            println!("Simulating {} players over {} weeks (seed {})", roster.len(), config.weeks, seed);

            let output = SeasonRunner::new(&config, seed)
                .parallel(parallel)
                .run_with_progress(&roster, |done, total, name| {
                    print!("\rSimulated player {}/{}: {:<40}", done, total, name);
                    let _ = std::io::stdout().flush();
                })
                .context("Simulation failed")?;
            println!();

            println!("\n{}", injury_cli::render_summary_table(&output.results));
            print_squad_stats(&SquadStats::from_results(&output.results));

            if no_export {
                return Ok(0);
            }

            match injury_cli::export_reports(&output, &out) {
                Ok(manifest) => {
                    println!("\nReports written to {}:", manifest.output_dir.display());
                    for file in &manifest.files {
                        println!("   {}", file.display());
                    }
                    Ok(0)
                }
                Err(err) => {
                    log::error!("Report export failed: {:#}", err);
                    Ok(2)
                }
            }
        }
    }
}

#[cfg(feature = "cli")]
fn build_config(path: Option<PathBuf>, preset: Preset, overrides: &[String]) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(path) => SimulationConfig::load(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => preset.config(),
    };

    let mut pairs = Vec::with_capacity(overrides.len());
    for raw in overrides {
        match parse_override(raw) {
            Some(pair) => pairs.push(pair),
            None => log::warn!("Ignoring override {:?}: expected KEY=VALUE", raw),
        }
    }

    let report = apply_overrides(&mut config, &pairs);
    if report.has_problems() {
        println!("Some overrides were not applied:");
        for outcome in &report.outcomes {
            println!("   {}", outcome);
        }
    }

    config.validate().context("Invalid simulation config")?;
    Ok(config)
}

#[cfg(feature = "cli")]
fn print_squad_stats(stats: &SquadStats) {
    println!("Squad: {} injuries, {} absence days", stats.total_injuries, stats.total_absence_days);
    println!("   Mean absence per player:   {:.1} days", stats.mean_absence_days);
    println!("   Injuries per 1000 active days: {:.2}", stats.injury_rate_per_1000_active_days);
    println!("   Injury-free players:       {}/{}", stats.injury_free_players, stats.players);
    if let Some(most) = &stats.most_absent {
        println!(
            "   Most days out:             {} ({} days, {} injuries)",
            most.player, most.absence_days, most.injuries
        );
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("injury-sim CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
