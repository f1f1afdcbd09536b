//! StructLab CLI — swing detection and counter-trend classification over local files.
//!
//! Commands:
//! - `swings` — detect confirmed swing points in a candle file
//! - `classify` — flag counter-trend BOS events against higher-timeframe structure
//! - `tables` — print the static per-timeframe tables
//!
//! Results are JSON on stdout (or `--output`); logs go to stderr.

mod io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use structlab_core::domain::validate_sequence;
use structlab_core::timeframe::{has_sufficient_depth, min_depth_for_code};
use structlab_core::{mark_counter_trend_code, EngineConfig, SwingDetector, Timeframe};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "structlab",
    about = "StructLab CLI — market-structure detection engine"
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect swing highs and lows in a candle file (JSON or CSV).
    Swings {
        /// Candle file. `.csv` is read as CSV, anything else as a JSON array.
        #[arg(long)]
        candles: PathBuf,

        /// Timeframe code (M15, M30, H1, H4, D, D1, W, W1, M, MN). Unknown codes use lookback 5.
        #[arg(long)]
        timeframe: String,

        /// Engine config (TOML) with lookback overrides.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Flag BOS events that oppose the parent timeframe's bias.
    Classify {
        /// JSON array of BOS events for one timeframe.
        #[arg(long)]
        events: PathBuf,

        /// JSON object of current structures keyed by timeframe code.
        #[arg(long)]
        structures: PathBuf,

        /// Timeframe code the events belong to.
        #[arg(long)]
        timeframe: String,

        /// Write JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print lookback, depth, parent and alias tables.
    Tables,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Swings {
            candles,
            timeframe,
            config,
            output,
        } => run_swings(candles, &timeframe, config, output),
        Commands::Classify {
            events,
            structures,
            timeframe,
            output,
        } => run_classify(events, structures, &timeframe, output),
        Commands::Tables => {
            print_tables();
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_swings(
    candles_path: PathBuf,
    timeframe: &str,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => EngineConfig::from_file(&path)?,
        None => EngineConfig::default(),
    };

    if timeframe.parse::<Timeframe>().is_err() {
        warn!(timeframe, "unknown timeframe code, using default lookback");
    }

    let candles = io::load_candles(&candles_path)?;
    validate_sequence(&candles)
        .with_context(|| format!("invalid candles in {}", candles_path.display()))?;

    if !has_sufficient_depth(candles.len(), timeframe) {
        warn!(
            candles = candles.len(),
            recommended = min_depth_for_code(timeframe),
            timeframe,
            "fewer candles than recommended for this timeframe"
        );
    }

    let detector = SwingDetector::from_config(&config.detector, timeframe);
    let swings = detector.detect(&candles);
    info!(
        candles = candles.len(),
        lookback = detector.lookback(),
        swings = swings.len(),
        "swing detection complete"
    );

    io::write_json(&swings, output.as_deref())
}

fn run_classify(
    events_path: PathBuf,
    structures_path: PathBuf,
    timeframe: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut events = io::load_events(&events_path)?;
    let htf = io::load_structures(&structures_path)?;

    let before = events.iter().filter(|e| e.is_counter_trend).count();
    mark_counter_trend_code(&mut events, &htf, timeframe);
    let after = events.iter().filter(|e| e.is_counter_trend).count();

    info!(
        events = events.len(),
        newly_flagged = after - before,
        counter_trend = after,
        "classification complete"
    );

    io::write_json(&events, output.as_deref())
}

fn print_tables() {
    println!(
        "{:<6} {:>8} {:>10} {:>8} {:<8}",
        "TF", "Lookback", "Min depth", "Parent", "Aliases"
    );
    println!("{}", "-".repeat(44));
    for tf in Timeframe::ALL {
        let parent = match tf.parent() {
            Some(p) => p.code().to_string(),
            None => "-".to_string(),
        };
        let aliases: Vec<&str> = tf.aliases().iter().map(|a| a.code()).collect();
        println!(
            "{:<6} {:>8} {:>10} {:>8} {:<8}",
            tf.code(),
            tf.lookback(),
            tf.min_depth(),
            parent,
            aliases.join(",")
        );
    }
}
