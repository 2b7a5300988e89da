//! Data ingestion: per-symbol price CSVs, the sector mapping CSV, and
//! the synthetic fallback dataset.

pub mod dates;
pub mod ingest;
pub mod sample;
pub mod schema;
pub mod sector;

pub use ingest::{read_price_folder, IngestError, IngestProgress, IngestResult, IngestSummary,
    SilentProgress, StdoutProgress};
pub use sample::synthetic_prices;
pub use schema::PriceSchema;
pub use sector::{read_sector_file, QualityReport, SectorError};

use polars::prelude::*;

/// Trim and lowercase every column name in place.
///
/// Upstream spreadsheets export headers like `" Date"` or `"CLOSE "`;
/// everything downstream assumes trimmed lowercase names.
pub(crate) fn normalize_column_names(df: &mut DataFrame) -> PolarsResult<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for name in names {
        let cleaned = name.trim().to_lowercase();
        if cleaned != name {
            df.rename(&name, cleaned.into())?;
        }
    }
    Ok(())
}
