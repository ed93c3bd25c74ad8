//! `blood-match` command-line runner.
//!
//! Reads a JSON record snapshot, runs one engine operation and prints the
//! result as JSON on stdout. Logs go to stderr.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use blood_match_core::{logging, BloodMatch, EngineConfig, Snapshot};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use commands::Command as _;

#[derive(Parser, Debug)]
#[command(name = "blood-match")]
#[command(about = "Match blood requests to eligible donors and summarise donation activity")]
struct Cli {
    /// JSON snapshot with `donors`, `requests` and `history` arrays
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Engine configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Evaluation date (YYYY-MM-DD); defaults to today in UTC
    #[arg(long)]
    today: Option<NaiveDate>,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Match donors to a stored request, or to an ad-hoc blood type and city
    Match(commands::MatchArgs),
    /// Match every pending request, most urgent first
    Pending,
    /// Dashboard statistics
    Stats,
    /// A user's donation and receipt history
    History(commands::HistoryArgs),
    /// Eligibility status of every donor
    Eligibility,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json_logger(cli.verbose);
    } else {
        logging::init_logger(cli.verbose);
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = BloodMatch::new(config);

    let snapshot = Snapshot::from_json_file(&cli.snapshot)
        .with_context(|| format!("loading snapshot {}", cli.snapshot.display()))?;

    let now = match cli.today {
        Some(date) => date
            .and_hms_opt(0, 0, 0)
            .context("invalid evaluation date")?
            .and_utc(),
        None => Utc::now(),
    };

    tracing::info!(
        donors = snapshot.donors.len(),
        requests = snapshot.requests.len(),
        history = snapshot.history.len(),
        today = %now.date_naive(),
        "running {:?}",
        cli.command
    );

    let output = match &cli.command {
        Commands::Match(args) => args.run(&engine, &snapshot, now)?,
        Commands::Pending => commands::Pending.run(&engine, &snapshot, now)?,
        Commands::Stats => commands::Stats.run(&engine, &snapshot, now)?,
        Commands::History(args) => args.run(&engine, &snapshot, now)?,
        Commands::Eligibility => commands::Eligibility.run(&engine, &snapshot, now)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
