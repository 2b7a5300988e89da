//! Sector mapping ingestion.
//!
//! One CSV with free-form columns (symbol/sector expected). The reader
//! normalizes column names and produces a data-quality report for the
//! operator; the data itself is passed through untouched.

use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SectorError {
    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    #[error("read {file}: {message}")]
    Read { file: String, message: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Diagnostic summary of a sector file: shape, columns, head rows, and
/// per-column missing-value counts.
#[derive(Debug)]
pub struct QualityReport {
    pub rows: usize,
    pub cols: usize,
    pub columns: Vec<String>,
    pub missing: Vec<(String, usize)>,
    pub head: DataFrame,
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape: ({}, {})", self.rows, self.cols)?;
        writeln!(f, "Columns: {}", self.columns.join(", "))?;
        writeln!(f, "First rows:")?;
        writeln!(f, "{}", self.head)?;
        writeln!(f, "Missing values:")?;
        for (column, count) in &self.missing {
            writeln!(f, "  {column}: {count}")?;
        }
        Ok(())
    }
}

/// Read the sector CSV, normalize column names, and report data quality.
pub fn read_sector_file(path: &Path) -> Result<(DataFrame, QualityReport), SectorError> {
    if !path.is_file() {
        return Err(SectorError::MissingFile(path.to_path_buf()));
    }

    let file = path.display().to_string();
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| SectorError::Read {
            file: file.clone(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| SectorError::Read {
            file,
            message: e.to_string(),
        })?;

    super::normalize_column_names(&mut df)?;

    let report = quality_report(&df);
    Ok((df, report))
}

fn quality_report(df: &DataFrame) -> QualityReport {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let missing = df
        .get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect();
    QualityReport {
        rows: df.height(),
        cols: df.width(),
        columns,
        missing,
        head: df.head(Some(5)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        let result = read_sector_file(Path::new("/nonexistent/sector.csv"));
        assert!(matches!(result, Err(SectorError::MissingFile(_))));
    }

    #[test]
    fn normalizes_columns_and_counts_missing_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sector_data.csv");
        std::fs::write(
            &path,
            " Symbol ,SECTOR,Industry\nAAPL,Technology,Hardware\nMSFT,Technology,\nXOM,,Oil & Gas\n",
        )
        .unwrap();

        let (df, report) = read_sector_file(&path).unwrap();
        assert_eq!(report.rows, 3);
        assert_eq!(report.cols, 3);
        assert_eq!(
            report.columns,
            vec!["symbol".to_string(), "sector".to_string(), "industry".to_string()]
        );
        assert_eq!(df.column("sector").unwrap().null_count(), 1);

        let missing: Vec<usize> = report.missing.iter().map(|(_, n)| *n).collect();
        assert_eq!(missing, vec![0, 1, 1]);
    }

    #[test]
    fn head_is_capped_at_five_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sector_data.csv");
        let mut content = String::from("symbol,sector\n");
        for i in 0..10 {
            content.push_str(&format!("S{i},Tech\n"));
        }
        std::fs::write(&path, content).unwrap();

        let (_, report) = read_sector_file(&path).unwrap();
        assert_eq!(report.rows, 10);
        assert_eq!(report.head.height(), 5);
    }
}
