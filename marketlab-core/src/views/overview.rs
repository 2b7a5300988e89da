//! Market overview: breadth counts and the top performers by cumulative
//! return.

use super::{ViewError, TOP_N};
use crate::dataset::MarketData;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketOverview {
    pub total_symbols: usize,
    /// Symbols whose mean daily return is positive.
    pub advancing: usize,
    /// Everything else (non-positive or undefined mean).
    pub declining: usize,
    /// Up to ten (symbol, final cumulative return), best first.
    pub top_performers: Vec<(String, f64)>,
}

pub fn market_overview(data: &MarketData) -> Result<MarketOverview, ViewError> {
    if data.is_empty() {
        return Err(ViewError::NoData("market overview"));
    }

    let total_symbols = data.series().len();
    let advancing = data
        .series()
        .iter()
        .filter(|s| s.mean_daily_return().is_some_and(|m| m > 0.0))
        .count();

    let mut top_performers: Vec<(String, f64)> = data
        .series()
        .iter()
        .filter_map(|s| {
            s.last_cumulative_return()
                .map(|c| (s.symbol.clone(), c))
        })
        .collect();
    top_performers.sort_by(|a, b| b.1.total_cmp(&a.1));
    top_performers.truncate(TOP_N);

    Ok(MarketOverview {
        total_symbols,
        advancing,
        declining: total_symbols - advancing,
        top_performers,
    })
}
