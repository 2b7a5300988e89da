//! Home view: headline metrics plus the latest session's per-symbol
//! daily returns.

use chrono::NaiveDate;

use super::{all_daily_returns, mean, sample_std, ViewError};
use crate::dataset::MarketData;

/// Headline metrics for the landing view. Return values are fractions;
/// the dashboard formats them as percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSummary {
    /// Distinct symbols in the dataset.
    pub total_symbols: usize,
    /// Mean of the per-symbol mean daily returns.
    pub avg_daily_return: f64,
    /// Sample standard deviation of all daily returns.
    pub volatility: f64,
    /// Positive average return across symbols.
    pub bullish: bool,
    /// Most recent date in the dataset.
    pub latest_date: Option<NaiveDate>,
    /// (symbol, daily return) on the latest date, symbols without a
    /// defined return that day omitted.
    pub latest_returns: Vec<(String, f64)>,
}

pub fn home_summary(data: &MarketData) -> Result<HomeSummary, ViewError> {
    if data.is_empty() {
        return Err(ViewError::NoData("market summary"));
    }

    let symbol_means: Vec<f64> = data
        .series()
        .iter()
        .filter_map(|s| s.mean_daily_return())
        .collect();
    let avg_daily_return = mean(&symbol_means).unwrap_or(0.0);
    let volatility = sample_std(&all_daily_returns(data)).unwrap_or(0.0);

    let latest_date = data.latest_date();
    let mut latest_returns = Vec::new();
    if let Some(latest) = latest_date {
        for series in data.series() {
            let on_latest = series
                .dates
                .iter()
                .zip(&series.daily_return)
                .find(|(d, _)| **d == Some(latest))
                .and_then(|(_, r)| *r);
            if let Some(ret) = on_latest {
                latest_returns.push((series.symbol.clone(), ret));
            }
        }
    }

    Ok(HomeSummary {
        total_symbols: data.series().len(),
        avg_daily_return,
        volatility,
        bullish: avg_daily_return > 0.0,
        latest_date,
        latest_returns,
    })
}
