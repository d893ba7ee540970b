//! cryptotrack CLI: market snapshot polling commands.
//!
//! Commands:
//! - `watch`: poll the markets endpoint until Ctrl-C, rewriting the
//!   spreadsheet and report every cycle
//! - `snapshot`: run a single cycle and exit

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use cryptotrack_core::data::CoinGeckoProvider;
use cryptotrack_runner::{
    CycleOutcome, InterruptibleSleeper, SystemClock, Tracker, TrackerConfig,
};

#[derive(Parser)]
#[command(
    name = "cryptotrack",
    about = "cryptotrack: top-50 crypto market snapshots to xlsx and Markdown"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll continuously until interrupted, then write a final report.
    Watch {
        #[command(flatten)]
        output: OutputArgs,

        /// Seconds between cycles. Overrides the config file.
        #[arg(long)]
        interval: Option<u64>,

        /// Seconds to wait after an unexpected failure. Overrides the config file.
        #[arg(long)]
        backoff: Option<u64>,
    },
    /// Run one cycle and exit. Fails if nothing was written.
    Snapshot {
        #[command(flatten)]
        output: OutputArgs,

        /// Print the snapshot summary as JSON on stdout.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spreadsheet output path.
    #[arg(long)]
    spreadsheet: Option<PathBuf>,

    /// Markdown report output path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Also mirror the table to this CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl OutputArgs {
    fn load_config(&self) -> Result<TrackerConfig> {
        let mut config = match &self.config {
            Some(path) => TrackerConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => TrackerConfig::default(),
        };
        if let Some(path) = &self.spreadsheet {
            config.spreadsheet_path = path.clone();
        }
        if let Some(path) = &self.report {
            config.report_path = path.clone();
        }
        if let Some(path) = &self.csv {
            config.csv_path = Some(path.clone());
        }
        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            output,
            interval,
            backoff,
        } => {
            let mut config = output.load_config()?;
            if let Some(secs) = interval {
                config.update_interval_secs = secs;
            }
            if let Some(secs) = backoff {
                config.retry_backoff_secs = secs;
            }
            run_watch(config)
        }
        Commands::Snapshot { output, json } => run_snapshot(output.load_config()?, json),
    }
}

fn provider_for(config: &TrackerConfig) -> Result<CoinGeckoProvider> {
    CoinGeckoProvider::new(config.api_base_url.clone(), config.request_timeout())
        .context("building HTTP client")
}

fn run_watch(config: TrackerConfig) -> Result<ExitCode> {
    config.validate().context("invalid configuration")?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            stop.store(true, Ordering::Relaxed);
        })
        .context("installing Ctrl-C handler")?;
    }

    let provider = provider_for(&config)?;
    let clock = SystemClock;
    let sleeper = InterruptibleSleeper::new(Arc::clone(&stop));

    let mut tracker = Tracker::new(config, &provider, &clock, &sleeper).with_stop_flag(&stop);
    let summary = tracker.run();

    match &summary.final_report {
        Some(path) => println!("Final report: {}", path.display()),
        None => println!("No snapshots collected."),
    }
    println!(
        "{} cycles: {} updated, {} fetch failures, {} other failures",
        summary.cycles, summary.updates, summary.fetch_failures, summary.unexpected_failures
    );

    Ok(ExitCode::SUCCESS)
}

fn run_snapshot(config: TrackerConfig, json: bool) -> Result<ExitCode> {
    config.validate().context("invalid configuration")?;

    let provider = provider_for(&config)?;
    let clock = SystemClock;
    // A single cycle never waits.
    let sleeper = InterruptibleSleeper::new(Arc::new(AtomicBool::new(true)));

    let mut tracker = Tracker::new(config, &provider, &clock, &sleeper);
    let outcome = tracker.run_cycle();

    let artifacts = match outcome {
        CycleOutcome::Updated(artifacts) => artifacts,
        CycleOutcome::FetchFailed(e) => {
            eprintln!("Fetch failed: {e}");
            return Ok(ExitCode::FAILURE);
        }
        CycleOutcome::Failed(e) => {
            eprintln!("Cycle failed: {e}");
            return Ok(ExitCode::FAILURE);
        }
        CycleOutcome::Interrupted => {
            eprintln!("Interrupted before the snapshot was written");
            return Ok(ExitCode::FAILURE);
        }
    };

    info!(
        "Snapshot of {} assets written to {}",
        artifacts.assets,
        artifacts.spreadsheet.display()
    );

    if json {
        if let Some(summary) = tracker.history().latest() {
            let text = serde_json::to_string_pretty(summary).context("serializing summary")?;
            println!("{text}");
        }
    } else {
        println!("Spreadsheet: {}", artifacts.spreadsheet.display());
        if let Some(csv) = &artifacts.csv {
            println!("CSV:         {}", csv.display());
        }
        println!("Report:      {}", artifacts.report.display());
    }

    Ok(ExitCode::SUCCESS)
}
