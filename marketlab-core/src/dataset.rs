//! The combined price dataset and its derived return columns.
//!
//! `MarketData` is built once at startup and never mutated afterwards;
//! every dashboard view receives it by reference. Alongside the frame it
//! keeps per-symbol extracted series so the views never re-scan columns.

use chrono::NaiveDate;
use polars::prelude::*;

/// Extracted per-symbol series, rows ordered by date ascending.
#[derive(Debug, Clone)]
pub struct SymbolSeries {
    pub symbol: String,
    pub dates: Vec<Option<NaiveDate>>,
    pub close: Vec<Option<f64>>,
    pub daily_return: Vec<Option<f64>>,
    pub cumulative_return: Vec<Option<f64>>,
}

impl SymbolSeries {
    /// Mean of the defined daily returns, if any.
    pub fn mean_daily_return(&self) -> Option<f64> {
        let defined: Vec<f64> = self.daily_return.iter().flatten().copied().collect();
        if defined.is_empty() {
            None
        } else {
            Some(defined.iter().sum::<f64>() / defined.len() as f64)
        }
    }

    /// Last defined cumulative return.
    pub fn last_cumulative_return(&self) -> Option<f64> {
        self.cumulative_return.iter().rev().flatten().copied().next()
    }
}

/// Immutable combined dataset: the concatenated price frame with derived
/// return columns, plus the per-symbol view of the same rows.
#[derive(Debug, Clone)]
pub struct MarketData {
    frame: DataFrame,
    series: Vec<SymbolSeries>,
}

impl MarketData {
    /// Build from a price frame (any source: store, ingestion, synthetic).
    ///
    /// Sorts by (symbol, date), computes the derived return columns, and
    /// extracts per-symbol series. Requires `date`, `symbol`, and `close`
    /// columns.
    pub fn from_prices(prices: DataFrame) -> PolarsResult<Self> {
        let frame = with_return_columns(&prices)?;
        let series = extract_symbol_series(&frame)?;
        Ok(Self { frame, series })
    }

    /// The combined frame including `daily_return` and `cumulative_return`.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// All symbols, sorted ascending.
    pub fn symbols(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.symbol.as_str()).collect()
    }

    pub fn series(&self) -> &[SymbolSeries] {
        &self.series
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolSeries> {
        self.series.iter().find(|s| s.symbol == symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Most recent date across all symbols.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.series
            .iter()
            .flat_map(|s| s.dates.iter().flatten())
            .max()
            .copied()
    }

    /// Earliest date across all symbols.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.series
            .iter()
            .flat_map(|s| s.dates.iter().flatten())
            .min()
            .copied()
    }
}

/// Sort by (symbol, date) and append `daily_return` and
/// `cumulative_return` columns.
///
/// For each symbol independently:
/// `daily_return[i] = close[i] / close[i-1] - 1`, null at the symbol's
/// first row and wherever either close is null. `cumulative_return` is the
/// running product of `(1 + daily_return)` minus 1; the product resets at
/// every symbol boundary, and a null daily return leaves it unchanged
/// while producing a null entry for that row.
pub fn with_return_columns(prices: &DataFrame) -> PolarsResult<DataFrame> {
    let mut df = prices.sort(["symbol", "date"], SortMultipleOptions::default())?;

    let height = df.height();
    let symbols = df.column("symbol")?.str()?.clone();
    let closes = df.column("close")?.f64()?.clone();

    let mut daily: Vec<Option<f64>> = Vec::with_capacity(height);
    let mut cumulative: Vec<Option<f64>> = Vec::with_capacity(height);
    let mut running = 1.0;

    for i in 0..height {
        let boundary = i == 0 || symbols.get(i) != symbols.get(i - 1);
        if boundary {
            running = 1.0;
        }

        let ret = if boundary {
            None
        } else {
            match (closes.get(i), closes.get(i - 1)) {
                (Some(cur), Some(prev)) if prev != 0.0 => Some(cur / prev - 1.0),
                _ => None,
            }
        };

        daily.push(ret);
        cumulative.push(ret.map(|r| {
            running *= 1.0 + r;
            running - 1.0
        }));
    }

    df.with_column(Column::from(Series::new("daily_return".into(), daily)))?;
    df.with_column(Column::from(Series::new(
        "cumulative_return".into(),
        cumulative,
    )))?;
    Ok(df)
}

fn extract_symbol_series(frame: &DataFrame) -> PolarsResult<Vec<SymbolSeries>> {
    let height = frame.height();
    let symbols = frame.column("symbol")?.str()?.clone();
    let dates: Vec<Option<NaiveDate>> = frame.column("date")?.date()?.as_date_iter().collect();
    let closes = frame.column("close")?.f64()?.clone();
    let daily = frame.column("daily_return")?.f64()?.clone();
    let cumulative = frame.column("cumulative_return")?.f64()?.clone();

    let mut out: Vec<SymbolSeries> = Vec::new();
    for i in 0..height {
        let boundary = i == 0 || symbols.get(i) != symbols.get(i - 1);
        if boundary {
            out.push(SymbolSeries {
                symbol: symbols.get(i).unwrap_or("").to_string(),
                dates: Vec::new(),
                close: Vec::new(),
                daily_return: Vec::new(),
                cumulative_return: Vec::new(),
            });
        }
        let current = out.last_mut().expect("series started at boundary");
        current.dates.push(dates[i]);
        current.close.push(closes.get(i));
        current.daily_return.push(daily.get(i));
        current.cumulative_return.push(cumulative.get(i));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dates::date_series;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn price_frame(rows: &[(&str, NaiveDate, Option<f64>)]) -> DataFrame {
        let dates: Vec<Option<NaiveDate>> = rows.iter().map(|r| Some(r.1)).collect();
        let symbols: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let closes: Vec<Option<f64>> = rows.iter().map(|r| r.2).collect();
        DataFrame::new(vec![
            date_series("date", &dates).unwrap().into(),
            Series::new("symbol".into(), symbols).into(),
            Series::new("close".into(), closes).into(),
        ])
        .unwrap()
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} !~ {b}");
    }

    #[test]
    fn daily_return_matches_close_ratio() {
        let df = price_frame(&[
            ("AAPL", ymd(2023, 1, 2), Some(100.0)),
            ("AAPL", ymd(2023, 1, 3), Some(110.0)),
            ("MSFT", ymd(2023, 1, 2), Some(200.0)),
            ("MSFT", ymd(2023, 1, 3), Some(190.0)),
        ]);

        let data = MarketData::from_prices(df).unwrap();
        assert_eq!(data.frame().height(), 4);

        let aapl = data.get("AAPL").unwrap();
        assert_eq!(aapl.daily_return[0], None);
        approx(aapl.daily_return[1].unwrap(), 0.10);

        let msft = data.get("MSFT").unwrap();
        assert_eq!(msft.daily_return[0], None);
        approx(msft.daily_return[1].unwrap(), -0.05);
    }

    #[test]
    fn cumulative_return_resets_at_symbol_boundaries() {
        let df = price_frame(&[
            ("AAA", ymd(2023, 1, 2), Some(100.0)),
            ("AAA", ymd(2023, 1, 3), Some(110.0)),
            ("AAA", ymd(2023, 1, 4), Some(121.0)),
            ("BBB", ymd(2023, 1, 2), Some(50.0)),
            ("BBB", ymd(2023, 1, 3), Some(45.0)),
        ]);

        let data = MarketData::from_prices(df).unwrap();
        let aaa = data.get("AAA").unwrap();
        assert_eq!(aaa.cumulative_return[0], None);
        approx(aaa.cumulative_return[1].unwrap(), 0.10);
        approx(aaa.cumulative_return[2].unwrap(), 0.21);

        // The running product restarts for BBB instead of carrying AAA's
        // 21% across the boundary.
        let bbb = data.get("BBB").unwrap();
        assert_eq!(bbb.cumulative_return[0], None);
        approx(bbb.cumulative_return[1].unwrap(), -0.10);
        approx(bbb.last_cumulative_return().unwrap(), -0.10);
    }

    #[test]
    fn null_closes_produce_null_returns_without_breaking_the_product() {
        let df = price_frame(&[
            ("AAA", ymd(2023, 1, 2), Some(100.0)),
            ("AAA", ymd(2023, 1, 3), None),
            ("AAA", ymd(2023, 1, 4), Some(121.0)),
        ]);

        let data = MarketData::from_prices(df).unwrap();
        let aaa = data.get("AAA").unwrap();
        assert_eq!(aaa.daily_return[1], None);
        // close[2]/close[1] is undefined too.
        assert_eq!(aaa.daily_return[2], None);
        assert_eq!(aaa.cumulative_return[2], None);
    }

    #[test]
    fn unsorted_input_is_sorted_before_derivation() {
        let df = price_frame(&[
            ("AAA", ymd(2023, 1, 3), Some(110.0)),
            ("AAA", ymd(2023, 1, 2), Some(100.0)),
        ]);

        let data = MarketData::from_prices(df).unwrap();
        let aaa = data.get("AAA").unwrap();
        assert_eq!(aaa.dates[0], Some(ymd(2023, 1, 2)));
        approx(aaa.daily_return[1].unwrap(), 0.10);
    }

    #[test]
    fn latest_date_spans_all_symbols() {
        let df = price_frame(&[
            ("AAA", ymd(2023, 1, 2), Some(100.0)),
            ("BBB", ymd(2023, 3, 9), Some(50.0)),
        ]);
        let data = MarketData::from_prices(df).unwrap();
        assert_eq!(data.latest_date(), Some(ymd(2023, 3, 9)));
        assert_eq!(data.first_date(), Some(ymd(2023, 1, 2)));
        assert_eq!(data.symbols(), vec!["AAA", "BBB"]);
    }
}
