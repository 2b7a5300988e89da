//! Price CSV ingestion.
//!
//! Reads every `*.csv` in a folder, normalizes each file to the canonical
//! price schema, and stacks the results into one frame sorted by
//! (symbol, date). One bad file never aborts the batch: the fold records
//! the failure and moves on, and the caller gets a summary of successes
//! and failures alongside the combined frame.
//!
//! Per-file normalization:
//! - trim/lowercase column names
//! - `date` column: spreadsheet serial day numbers → Date
//! - `month` column: `YYYY-MM` text → Date (first of month), used as the
//!   row date when no `date` column exists
//! - open/high/low/close/volume coerced to Float64; unparseable values
//!   become null, missing columns become all-null
//! - symbol taken from the filename-stem prefix before the first `_`

use polars::prelude::*;
use std::path::{Path, PathBuf};

use super::dates;
use super::schema::PriceSchema;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("folder not found: {0}")]
    MissingFolder(PathBuf),

    #[error("no CSV files found in {0}")]
    NoCsvFiles(PathBuf),

    #[error("read {file}: {message}")]
    FileRead { file: String, message: String },

    #[error("{file}: no date or month column")]
    MissingDateColumn { file: String },

    #[error("no data could be read from any CSV file")]
    NoUsableData,

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Outcome of one folder ingestion pass.
#[derive(Debug)]
pub struct IngestSummary {
    pub total: usize,
    pub succeeded: usize,
    pub skipped_empty: usize,
    pub failed: usize,
    pub errors: Vec<(String, IngestError)>,
}

impl IngestSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Combined frame plus the per-file accounting.
#[derive(Debug)]
pub struct IngestResult {
    pub frame: DataFrame,
    pub summary: IngestSummary,
}

/// Progress callback for multi-file ingestion.
pub trait IngestProgress {
    /// Called before a file is read.
    fn on_start(&self, file: &str, index: usize, total: usize);

    /// Called when a file turned out to be empty and was skipped.
    fn on_empty(&self, file: &str);

    /// Called when a file was normalized successfully.
    fn on_complete(&self, file: &str, symbol: &str, rows: usize);

    /// Called when a file failed; the batch continues.
    fn on_error(&self, file: &str, error: &IngestError);

    /// Called once at the end of the batch.
    fn on_batch_complete(&self, summary: &IngestSummary);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl IngestProgress for StdoutProgress {
    fn on_start(&self, file: &str, index: usize, total: usize) {
        println!("[{}/{}] Reading {file}...", index + 1, total);
    }

    fn on_empty(&self, file: &str) {
        println!("Warning: {file} is empty, skipping");
    }

    fn on_complete(&self, file: &str, symbol: &str, rows: usize) {
        println!("Processed {symbol} from {file} ({rows} rows)");
    }

    fn on_error(&self, file: &str, error: &IngestError) {
        println!("Error reading {file}: {error}");
    }

    fn on_batch_complete(&self, summary: &IngestSummary) {
        println!(
            "Ingested {} of {} files ({} failed, {} empty)",
            summary.succeeded, summary.total, summary.failed, summary.skipped_empty
        );
    }
}

/// Progress reporter that discards everything (tests, dashboard startup).
pub struct SilentProgress;

impl IngestProgress for SilentProgress {
    fn on_start(&self, _file: &str, _index: usize, _total: usize) {}
    fn on_empty(&self, _file: &str) {}
    fn on_complete(&self, _file: &str, _symbol: &str, _rows: usize) {}
    fn on_error(&self, _file: &str, _error: &IngestError) {}
    fn on_batch_complete(&self, _summary: &IngestSummary) {}
}

/// Read every CSV in `dir` and fold the normalized frames into one
/// combined frame sorted by (symbol, date).
pub fn read_price_folder(
    dir: &Path,
    progress: &dyn IngestProgress,
) -> Result<IngestResult, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::MissingFolder(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(IngestError::NoCsvFiles(dir.to_path_buf()));
    }

    let total = files.len();
    let mut frames: Vec<DataFrame> = Vec::new();
    let mut summary = IngestSummary {
        total,
        succeeded: 0,
        skipped_empty: 0,
        failed: 0,
        errors: Vec::new(),
    };

    for (index, path) in files.iter().enumerate() {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<non-utf8>")
            .to_string();
        progress.on_start(&file_name, index, total);

        match read_price_file(path) {
            Ok(Some(frame)) => {
                let symbol = symbol_from_path(path);
                progress.on_complete(&file_name, &symbol, frame.height());
                summary.succeeded += 1;
                frames.push(frame);
            }
            Ok(None) => {
                progress.on_empty(&file_name);
                summary.skipped_empty += 1;
            }
            Err(error) => {
                progress.on_error(&file_name, &error);
                summary.failed += 1;
                summary.errors.push((file_name, error));
            }
        }
    }

    progress.on_batch_complete(&summary);

    let mut iter = frames.into_iter();
    let Some(mut combined) = iter.next() else {
        return Err(IngestError::NoUsableData);
    };
    for frame in iter {
        combined.vstack_mut(&frame)?;
    }
    let combined = combined.sort(["symbol", "date"], SortMultipleOptions::default())?;

    Ok(IngestResult {
        frame: combined,
        summary,
    })
}

/// Symbol = filename-stem prefix before the first underscore.
fn symbol_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN");
    stem.split('_').next().unwrap_or(stem).to_string()
}

/// Read and normalize a single price file.
///
/// Returns `Ok(None)` when the file has no rows (header-only or zero
/// bytes); those are skipped, not failed.
fn read_price_file(path: &Path) -> Result<Option<DataFrame>, IngestError> {
    let file = path.display().to_string();

    if std::fs::metadata(path)?.len() == 0 {
        return Ok(None);
    }

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::FileRead {
            file: file.clone(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::FileRead {
            file: file.clone(),
            message: e.to_string(),
        })?;

    if df.height() == 0 {
        return Ok(None);
    }

    super::normalize_column_names(&mut df)?;

    let has_date = df.schema().contains("date");
    let has_month = df.schema().contains("month");
    match (has_date, has_month) {
        (true, _) => {
            let converted = dates::serial_column_to_dates(df.column("date")?, "date")?;
            df.replace("date", converted)?;
            if has_month {
                df = df.drop("month")?;
            }
        }
        (false, true) => {
            let converted = dates::month_column_to_dates(df.column("month")?, "date")?;
            df.with_column(Column::from(converted))?;
            df = df.drop("month")?;
        }
        (false, false) => return Err(IngestError::MissingDateColumn { file }),
    }

    let height = df.height();
    for name in ["open", "high", "low", "close", "volume"] {
        if df.schema().contains(name) {
            let coerced = df
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            df.replace(name, coerced)?;
        } else {
            df.with_column(Column::from(Series::full_null(
                name.into(),
                height,
                &DataType::Float64,
            )))?;
        }
    }

    let symbol = symbol_from_path(path);
    df.with_column(Column::from(Series::new(
        "symbol".into(),
        vec![symbol; height],
    )))?;

    let df = df.select(PriceSchema::COLUMNS)?;
    Ok(Some(df))
}
