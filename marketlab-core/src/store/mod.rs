//! SQLite-backed relational store.
//!
//! Two operations only: destructive full-table replace of a frame, and an
//! unfiltered select-all read-back. Column types map as
//! Date → TEXT (ISO-8601), Float → REAL, Int/Bool → INTEGER,
//! String → TEXT; `date`/`month` columns are restored to the Date dtype
//! on read.

use chrono::NaiveDate;
use polars::prelude::*;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};

use crate::config::StoreConfig;
use crate::data::dates::date_series;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database unreachable: {0}")]
    Connection(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("unsupported column type in '{column}': {dtype}")]
    UnsupportedType { column: String, dtype: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Handle on the relational store, opened once and held for the process
/// lifetime.
pub struct MarketStore {
    conn: Connection,
    stock_table: String,
    sector_table: String,
}

impl MarketStore {
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open(&config.database)
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self {
            conn,
            stock_table: config.stock_table.clone(),
            sector_table: config.sector_table.clone(),
        })
    }

    pub fn stock_table(&self) -> &str {
        &self.stock_table
    }

    pub fn sector_table(&self) -> &str {
        &self.sector_table
    }

    /// Replace the configured price table with `frame`.
    pub fn replace_prices(&mut self, frame: &DataFrame) -> Result<usize, StoreError> {
        let table = self.stock_table.clone();
        self.replace_table(&table, frame)
    }

    /// Replace the configured sector table with `frame`.
    pub fn replace_sectors(&mut self, frame: &DataFrame) -> Result<usize, StoreError> {
        let table = self.sector_table.clone();
        self.replace_table(&table, frame)
    }

    /// Read the configured price table back as a frame.
    pub fn load_prices(&self) -> Result<DataFrame, StoreError> {
        self.read_table(&self.stock_table)
    }

    /// Destructive full replace: the table's prior content is discarded
    /// and rewritten from `frame` inside one transaction.
    pub fn replace_table(&mut self, table: &str, frame: &DataFrame) -> Result<usize, StoreError> {
        let columns = sql_columns(frame)?;

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)))?;

        let decls: Vec<String> = columns
            .iter()
            .map(|c| format!("{} {}", quote_ident(&c.name), c.decl))
            .collect();
        tx.execute_batch(&format!(
            "CREATE TABLE {} ({})",
            quote_ident(table),
            decls.join(", ")
        ))?;

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        let insert = format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(table),
            placeholders.join(", ")
        );

        {
            let mut stmt = tx.prepare(&insert)?;
            for row in 0..frame.height() {
                let params: Vec<SqlValue> = columns.iter().map(|c| c.value_at(row)).collect();
                stmt.execute(params_from_iter(params))?;
            }
        }

        tx.commit()?;
        Ok(frame.height())
    }

    /// Unfiltered select-all read-back.
    pub fn read_table(&self, table: &str) -> Result<DataFrame, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {}", quote_ident(table)))?;
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let width = names.len();

        let mut raw: Vec<Vec<SqlValue>> = vec![Vec::new(); width];
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            for (i, column) in raw.iter_mut().enumerate() {
                column.push(row.get::<_, SqlValue>(i)?);
            }
        }

        let mut series: Vec<Column> = Vec::with_capacity(width);
        for (name, values) in names.iter().zip(raw) {
            series.push(column_from_values(name, values)?.into());
        }
        Ok(DataFrame::new(series)?)
    }
}

struct SqlColumn {
    name: String,
    decl: &'static str,
    data: ColumnData,
}

enum ColumnData {
    Float(Vec<Option<f64>>),
    Int(Vec<Option<i64>>),
    Text(Vec<Option<String>>),
    Date(Vec<Option<NaiveDate>>),
}

impl SqlColumn {
    fn value_at(&self, row: usize) -> SqlValue {
        match &self.data {
            ColumnData::Float(v) => v[row].map_or(SqlValue::Null, SqlValue::Real),
            ColumnData::Int(v) => v[row].map_or(SqlValue::Null, SqlValue::Integer),
            ColumnData::Text(v) => v[row]
                .as_ref()
                .map_or(SqlValue::Null, |s| SqlValue::Text(s.clone())),
            ColumnData::Date(v) => v[row].map_or(SqlValue::Null, |d| {
                SqlValue::Text(d.format("%Y-%m-%d").to_string())
            }),
        }
    }
}

fn sql_columns(frame: &DataFrame) -> Result<Vec<SqlColumn>, StoreError> {
    let mut out = Vec::with_capacity(frame.width());
    for column in frame.get_columns() {
        let name = column.name().to_string();
        let series = column.as_materialized_series();
        let (decl, data) = match series.dtype() {
            DataType::Date => (
                "TEXT",
                ColumnData::Date(series.date()?.as_date_iter().collect()),
            ),
            DataType::Float32 | DataType::Float64 => (
                "REAL",
                ColumnData::Float(series.cast(&DataType::Float64)?.f64()?.into_iter().collect()),
            ),
            dt if dt.is_integer() || *dt == DataType::Boolean => (
                "INTEGER",
                ColumnData::Int(series.cast(&DataType::Int64)?.i64()?.into_iter().collect()),
            ),
            DataType::String => (
                "TEXT",
                ColumnData::Text(
                    series
                        .str()?
                        .into_iter()
                        .map(|opt| opt.map(str::to_string))
                        .collect(),
                ),
            ),
            other => {
                return Err(StoreError::UnsupportedType {
                    column: name,
                    dtype: format!("{other:?}"),
                })
            }
        };
        out.push(SqlColumn { name, decl, data });
    }
    Ok(out)
}

/// Rebuild a series from raw SQLite values. Type is chosen by scanning the
/// column: any text → String, else any real → Float64, else Int64;
/// all-null columns come back as null Float64. `date`/`month` columns are
/// parsed back to the Date dtype.
fn column_from_values(name: &str, values: Vec<SqlValue>) -> Result<Series, StoreError> {
    let has_text = values.iter().any(|v| matches!(v, SqlValue::Text(_)));
    let has_real = values.iter().any(|v| matches!(v, SqlValue::Real(_)));
    let has_int = values.iter().any(|v| matches!(v, SqlValue::Integer(_)));

    if has_text {
        let texts: Vec<Option<String>> = values
            .into_iter()
            .map(|v| match v {
                SqlValue::Text(s) => Some(s),
                SqlValue::Integer(i) => Some(i.to_string()),
                SqlValue::Real(r) => Some(r.to_string()),
                _ => None,
            })
            .collect();

        if name == "date" || name == "month" {
            let parsed: Vec<Option<NaiveDate>> = texts
                .iter()
                .map(|opt| {
                    opt.as_deref()
                        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                })
                .collect();
            return Ok(date_series(name, &parsed)?);
        }
        return Ok(Series::new(name.into(), texts));
    }

    if has_real {
        let floats: Vec<Option<f64>> = values
            .into_iter()
            .map(|v| match v {
                SqlValue::Real(r) => Some(r),
                SqlValue::Integer(i) => Some(i as f64),
                _ => None,
            })
            .collect();
        return Ok(Series::new(name.into(), floats));
    }

    if has_int {
        let ints: Vec<Option<i64>> = values
            .into_iter()
            .map(|v| match v {
                SqlValue::Integer(i) => Some(i),
                _ => None,
            })
            .collect();
        return Ok(Series::new(name.into(), ints));
    }

    Ok(Series::full_null(
        name.into(),
        values.len(),
        &DataType::Float64,
    ))
}

/// Double-quote an identifier, escaping embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
