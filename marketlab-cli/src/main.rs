//! Market data loader CLI — ingestion and store population commands.
//!
//! Commands:
//! - `load` — read per-symbol price CSVs and replace the stock table
//! - `sector` — read the sector mapping CSV and replace the sector table
//! - `sample` — populate the stock table with a seeded synthetic dataset

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use marketlab_core::data::{read_price_folder, read_sector_file, synthetic_prices, StdoutProgress};
use marketlab_core::{Config, MarketStore};

#[derive(Parser)]
#[command(
    name = "marketlab",
    about = "Market analysis loader — CSV ingestion into the analysis store"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./marketlab.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read per-symbol price CSVs from a folder and replace the stock table.
    Load {
        /// Folder of price CSVs. Defaults to the configured data folder.
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Read the sector mapping CSV and replace the sector table.
    Sector {
        /// Sector CSV path. Defaults to the configured sector file.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Populate the stock table with a seeded synthetic dataset.
    Sample {
        /// Seed for the generated prices.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Load { csv_dir } => run_load(&config, csv_dir),
        Commands::Sector { file } => run_sector(&config, file),
        Commands::Sample { seed } => run_sample(&config, seed),
    }
}

fn run_load(config: &Config, csv_dir: Option<PathBuf>) -> Result<()> {
    let dir = csv_dir.unwrap_or_else(|| config.data.csv_dir.clone());
    let result = read_price_folder(&dir, &StdoutProgress)
        .with_context(|| format!("loading price CSVs from {}", dir.display()))?;

    let summary = &result.summary;
    println!(
        "Read {} files: {} ok, {} empty, {} failed",
        summary.total, summary.succeeded, summary.skipped_empty, summary.failed
    );
    for (file, error) in &summary.errors {
        eprintln!("  {file}: {error}");
    }

    println!(
        "Combined shape: ({}, {})",
        result.frame.height(),
        result.frame.width()
    );
    println!("{}", result.frame.head(Some(5)));

    let mut store = MarketStore::open(&config.store)?;
    let rows = store.replace_prices(&result.frame)?;
    println!(
        "Replaced table '{}' with {} rows ({} symbols)",
        config.store.stock_table,
        rows,
        result
            .frame
            .column("symbol")
            .ok()
            .and_then(|c| c.as_materialized_series().n_unique().ok())
            .unwrap_or(0)
    );

    if !summary.all_succeeded() {
        bail!("{} of {} files failed to load", summary.failed, summary.total);
    }
    Ok(())
}

fn run_sector(config: &Config, file: Option<PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(|| config.data.sector_file.clone());
    let (frame, report) = read_sector_file(&path)
        .with_context(|| format!("loading sector CSV from {}", path.display()))?;

    println!("{report}");

    let mut store = MarketStore::open(&config.store)?;
    let rows = store.replace_sectors(&frame)?;
    println!(
        "Replaced table '{}' with {} rows",
        config.store.sector_table, rows
    );
    Ok(())
}

fn run_sample(config: &Config, seed: u64) -> Result<()> {
    let prices = synthetic_prices(seed)?;
    let mut store = MarketStore::open(&config.store)?;
    let rows = store.replace_prices(&prices)?;
    println!(
        "Replaced table '{}' with {} synthetic rows",
        config.store.stock_table, rows
    );
    Ok(())
}
