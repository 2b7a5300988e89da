//! Dashboard view transforms.
//!
//! Each view is a pure function of the immutable [`MarketData`] (plus the
//! user's symbol selection for the performance view). Empty-result
//! conditions come back as [`ViewError`] values; the dashboard renders
//! them as inline warnings.

pub mod correlation;
pub mod home;
pub mod overview;
pub mod performance;
pub mod volatility;

pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use home::{home_summary, HomeSummary};
pub use overview::{market_overview, MarketOverview};
pub use performance::{cumulative_curves, SymbolCurve};
pub use volatility::{volatility_ranking, VolatilityRanking};

use crate::dataset::MarketData;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("select at least one symbol")]
    EmptySelection,

    #[error("not enough data to compute {0}")]
    NoData(&'static str),
}

/// How many entries the ranked bar charts show.
pub const TOP_N: usize = 10;

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (ddof = 1). None below two observations.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// All defined daily returns across every symbol.
pub(crate) fn all_daily_returns(data: &MarketData) -> Vec<f64> {
    data.series()
        .iter()
        .flat_map(|s| s.daily_return.iter().flatten().copied())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_std_matches_hand_computation() {
        // Values 1..5: sample variance 2.5.
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let std = sample_std(&values).unwrap();
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn sample_std_needs_two_observations() {
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }
}
