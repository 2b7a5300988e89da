//! Correlation view: pairwise Pearson correlation of close prices across
//! symbols.
//!
//! Close prices are first aligned into a date×symbol matrix (missing
//! observations stay NaN), then each pair is correlated over its
//! pairwise-complete rows. Pairs with fewer than two shared observations
//! or zero variance on either side are undefined, not errors.

use ndarray::Array2;
use std::collections::BTreeMap;

use super::ViewError;
use crate::dataset::MarketData;

const VARIANCE_FLOOR: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// Symbols in matrix order.
    pub symbols: Vec<String>,
    /// Row-major entries; `None` marks an undefined correlation.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| *r.get(col)?)
    }
}

pub fn correlation_matrix(data: &MarketData) -> Result<CorrelationMatrix, ViewError> {
    if data.is_empty() {
        return Err(ViewError::NoData("correlation matrix"));
    }

    // Canonical date index across every symbol.
    let mut date_index = BTreeMap::new();
    for series in data.series() {
        for date in series.dates.iter().flatten() {
            let next = date_index.len();
            date_index.entry(*date).or_insert(next);
        }
    }
    if date_index.is_empty() {
        return Err(ViewError::NoData("correlation matrix"));
    }

    let symbols: Vec<String> = data.series().iter().map(|s| s.symbol.clone()).collect();
    let n_dates = date_index.len();
    let n_symbols = symbols.len();

    // date×symbol close matrix, NaN where a symbol has no observation.
    let mut closes = Array2::from_elem((n_dates, n_symbols), f64::NAN);
    for (j, series) in data.series().iter().enumerate() {
        for (date, close) in series.dates.iter().zip(&series.close) {
            if let (Some(date), Some(close)) = (date, close) {
                closes[[date_index[date], j]] = *close;
            }
        }
    }

    let mut values = vec![vec![None; n_symbols]; n_symbols];
    for i in 0..n_symbols {
        for j in i..n_symbols {
            let corr = pairwise_pearson(&closes, i, j);
            values[i][j] = corr;
            values[j][i] = corr;
        }
    }

    Ok(CorrelationMatrix { symbols, values })
}

/// Pearson correlation of columns `i` and `j` over rows where both are
/// observed. Undefined below two shared rows or at zero variance.
fn pairwise_pearson(closes: &Array2<f64>, i: usize, j: usize) -> Option<f64> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for row in closes.rows() {
        let (x, y) = (row[i], row[j]);
        if x.is_finite() && y.is_finite() {
            xs.push(x);
            ys.push(y);
        }
    }

    let n = xs.len();
    if n < 2 {
        return None;
    }

    let x_mean = xs.iter().sum::<f64>() / n as f64;
    let y_mean = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for k in 0..n {
        let dx = xs[k] - x_mean;
        let dy = ys[k] - y_mean;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x < VARIANCE_FLOOR || var_y < VARIANCE_FLOOR {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::{empty_market, market, market_from_closes, ymd};

    #[test]
    fn empty_dataset_is_a_warning() {
        assert_eq!(
            correlation_matrix(&empty_market()),
            Err(ViewError::NoData("correlation matrix"))
        );
    }

    #[test]
    fn perfectly_correlated_symbols_hit_one() {
        let data = market_from_closes(&[
            ("A", &[100.0, 110.0, 120.0]),
            ("B", &[50.0, 55.0, 60.0]),
        ]);
        let matrix = correlation_matrix(&data).unwrap();
        assert_eq!(matrix.len(), 2);
        assert!((matrix.get(0, 0).unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get(0, 1).unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
    }

    #[test]
    fn inverse_movement_is_minus_one() {
        let data = market_from_closes(&[
            ("A", &[100.0, 110.0, 120.0]),
            ("B", &[120.0, 110.0, 100.0]),
        ]);
        let matrix = correlation_matrix(&data).unwrap();
        assert!((matrix.get(0, 1).unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_variance_symbol_is_undefined_not_a_crash() {
        let data = market_from_closes(&[
            ("FLAT", &[100.0, 100.0, 100.0]),
            ("MOVE", &[100.0, 110.0, 120.0]),
        ]);
        let matrix = correlation_matrix(&data).unwrap();

        // Every entry touching the flat symbol is undefined, including
        // its own diagonal.
        assert_eq!(matrix.get(0, 0), None);
        assert_eq!(matrix.get(0, 1), None);
        assert_eq!(matrix.get(1, 0), None);
        assert!((matrix.get(1, 1).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn misaligned_dates_use_pairwise_complete_rows() {
        let data = market(&[
            ("A", ymd(2023, 1, 2), 100.0),
            ("A", ymd(2023, 1, 3), 110.0),
            ("A", ymd(2023, 1, 4), 120.0),
            // B misses the middle day.
            ("B", ymd(2023, 1, 2), 50.0),
            ("B", ymd(2023, 1, 4), 60.0),
        ]);
        let matrix = correlation_matrix(&data).unwrap();
        // Two shared observations, both moving up → +1.
        assert!((matrix.get(0, 1).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn single_shared_observation_is_undefined() {
        let data = market(&[
            ("A", ymd(2023, 1, 2), 100.0),
            ("A", ymd(2023, 1, 3), 110.0),
            ("B", ymd(2023, 1, 2), 50.0),
        ]);
        let matrix = correlation_matrix(&data).unwrap();
        assert_eq!(matrix.get(0, 1), None);
        assert_eq!(matrix.get(1, 1), None);
    }
}
