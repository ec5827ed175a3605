//! Aerorisk CLI - station-day air-pollution health-risk assessment

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use aerorisk_core::assessment::{assess_station, AssessOptions, DayData};
use aerorisk_core::demographics::CvpMode;
use aerorisk_core::lcz::Lcz;
use aerorisk_core::station::Station;
use aerorisk_core::{
    assess_with_config, config, pollutant, render_json, render_text, report, sort_assessments,
    ReadingStore, ResolvedConfig, StationAssessment, StationRegistry,
};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "aerorisk")]
#[command(about = "Air-pollution health-risk assessment for monitoring stations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess one station for one day
    Assess {
        /// Path to the station dataset (JSON)
        stations: PathBuf,

        /// Station code or display name
        #[arg(long)]
        station: String,

        /// Day to assess (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Pollutant name
        #[arg(long, default_value = "NO2")]
        pollutant: String,

        /// Path to the hourly readings dataset (JSON); omitted means no
        /// observed readings, historical fallback only
        #[arg(long)]
        readings: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// CVP indicator (overrides config file)
        #[arg(long)]
        cvp_mode: Option<CvpModeArg>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Assess every station in the dataset for one day
    Sweep {
        /// Path to the station dataset (JSON)
        stations: PathBuf,

        /// Day to assess (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Pollutant name
        #[arg(long, default_value = "NO2")]
        pollutant: String,

        /// Path to the hourly readings dataset (JSON)
        #[arg(long)]
        readings: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Show only the top N results (overrides config file)
        #[arg(long)]
        top: Option<usize>,

        /// Minimum risk tier to report, 0-3 (overrides config file)
        #[arg(long)]
        min_tier: Option<u8>,

        /// CVP indicator (overrides config file)
        #[arg(long)]
        cvp_mode: Option<CvpModeArg>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the stations in a dataset
    Stations {
        /// Path to the station dataset (JSON)
        stations: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Describe the 17 Local Climate Zone categories
    Lcz,
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running an assessment
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CvpModeArg {
    /// Elderly share of the total population
    RatioToTotal,
    /// Aging index per 100 youths
    RatioToYouth,
}

impl From<CvpModeArg> for CvpMode {
    fn from(arg: CvpModeArg) -> Self {
        match arg {
            CvpModeArg::RatioToTotal => CvpMode::RatioToTotal,
            CvpModeArg::RatioToYouth => CvpMode::RatioToYouth,
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            stations,
            station,
            date,
            pollutant,
            readings,
            format,
            cvp_mode,
            config: config_path,
        } => {
            validate_pollutant(&pollutant)?;
            let resolved = resolve_config(config_path.as_deref(), cvp_mode)?;
            let registry = StationRegistry::load(&stations)?;
            let store = load_store(readings.as_deref())?;

            // Accept a display name where a code was expected.
            let code = match registry.get(&station) {
                Some(s) => s.code.clone(),
                None => registry
                    .find_by_name(&station)
                    .map(|s| s.code.clone())
                    .with_context(|| format!("unknown station: {}", station))?,
            };

            let assessment =
                assess_with_config(&registry, &store, &code, date, &pollutant, Some(&resolved))?;
            match format {
                OutputFormat::Text => print!("{}", report::render_detail(&assessment)),
                OutputFormat::Json => println!("{}", render_json(&[assessment])),
            }
        }
        Commands::Sweep {
            stations,
            date,
            pollutant,
            readings,
            format,
            top,
            min_tier,
            cvp_mode,
            config: config_path,
        } => {
            validate_pollutant(&pollutant)?;
            if let Some(tier) = min_tier {
                if tier > 3 {
                    anyhow::bail!("--min-tier must be between 0 and 3 (got {})", tier);
                }
            }
            let resolved = resolve_config(config_path.as_deref(), cvp_mode)?;
            let registry = StationRegistry::load(&stations)?;
            let store = load_store(readings.as_deref())?;

            // CLI flags override config file values
            let effective_top = top.or(resolved.top);
            let effective_min_tier = min_tier.or(resolved.min_tier);

            let assessments = run_sweep(&registry, &store, date, &pollutant, &resolved);
            let sorted = sort_assessments(assessments);
            let filtered: Vec<StationAssessment> = match effective_min_tier {
                Some(min) => sorted.into_iter().filter(|a| a.risk.tier >= min).collect(),
                None => sorted,
            };
            let final_assessments: Vec<StationAssessment> = match effective_top {
                Some(top) => filtered.into_iter().take(top).collect(),
                None => filtered,
            };

            match format {
                OutputFormat::Text => print!("{}", render_text(&final_assessments)),
                OutputFormat::Json => println!("{}", render_json(&final_assessments)),
            }
        }
        Commands::Stations { stations, format } => {
            let registry = StationRegistry::load(&stations)?;
            match format {
                OutputFormat::Text => print_stations(&registry),
                OutputFormat::Json => {
                    let all: Vec<&Station> = registry.iter().collect();
                    println!("{}", serde_json::to_string_pretty(&all)?);
                }
            }
        }
        Commands::Lcz => print_lcz_table(),
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let resolved = load_config(path.as_deref())?;
                match &resolved.config_path {
                    Some(p) => println!("Config {} is valid", p.display()),
                    None => println!("No config file found; defaults are in effect"),
                }
            }
            ConfigAction::Show { path } => {
                let resolved = load_config(path.as_deref())?;
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            }
        },
    }

    Ok(())
}

/// Reject pollutants the upstream dataset does not publish.
fn validate_pollutant(name: &str) -> anyhow::Result<()> {
    if !pollutant::is_known(name) {
        let known: Vec<&str> = pollutant::names().collect();
        anyhow::bail!("unknown pollutant: {} (known: {})", name, known.join(", "));
    }
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let cwd = std::env::current_dir()?;
    config::load_and_resolve(&cwd, explicit).context("failed to load configuration")
}

fn resolve_config(
    explicit: Option<&Path>,
    cvp_mode: Option<CvpModeArg>,
) -> anyhow::Result<ResolvedConfig> {
    let mut resolved = load_config(explicit)?;
    if let Some(path) = &resolved.config_path {
        eprintln!("Using config: {}", path.display());
    }
    // CLI flags override config file values
    if let Some(mode) = cvp_mode {
        resolved.cvp_mode = mode.into();
    }
    Ok(resolved)
}

fn load_store(path: Option<&Path>) -> anyhow::Result<ReadingStore> {
    match path {
        Some(path) => ReadingStore::load(path),
        None => Ok(ReadingStore::empty()),
    }
}

/// Assess every station in parallel. Each station-day is independent, so
/// the sweep needs no coordination beyond the progress bar.
fn run_sweep(
    registry: &StationRegistry,
    store: &ReadingStore,
    date: NaiveDate,
    pollutant: &str,
    resolved: &ResolvedConfig,
) -> Vec<StationAssessment> {
    let options = AssessOptions {
        cvp_mode: resolved.cvp_mode,
        thresholds: &resolved.thresholds,
        reference_year: &resolved.reference_year,
    };
    let stations: Vec<&Station> = registry.iter().collect();
    let bar = ProgressBar::new(stations.len() as u64);
    let assessments = stations
        .par_iter()
        .map(|station| {
            let day = match store.find(&station.code, date, pollutant) {
                Ok(record) => DayData::Found(record),
                Err(e) => {
                    log::warn!("{}", e);
                    DayData::Inconsistent
                }
            };
            let assessment = assess_station(station, date, pollutant, day, &options);
            bar.inc(1);
            assessment
        })
        .collect();
    bar.finish_and_clear();
    assessments
}

fn print_stations(registry: &StationRegistry) {
    println!(
        "{:<10} {:<12} {:<9} {:<9} {}",
        "CODE", "LABEL", "LON", "LAT", "NAME"
    );
    for station in registry.iter() {
        println!(
            "{:<10} {:<12} {:<9.4} {:<9.4} {}",
            station.code, station.label, station.lon, station.lat, station.name
        );
    }
    let (lon, lat) = registry.centroid();
    println!("{} station(s), centered at [{:.4}, {:.4}]", registry.len(), lon, lat);
}

fn print_lcz_table() {
    println!("{:<4} {:<5} {:<22} {}", "KEY", "VUCI", "NAME", "DESCRIPTION");
    for lcz in Lcz::ALL {
        println!(
            "{:<4} {:<5} {:<22} {}",
            lcz.code(),
            lcz.vuci(),
            lcz.name(),
            lcz.description()
        );
    }
}
