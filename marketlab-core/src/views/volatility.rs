//! Volatility view: ranking of symbols by standard deviation of daily
//! returns.

use super::{sample_std, ViewError, TOP_N};
use crate::dataset::MarketData;

#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityRanking {
    /// Up to ten (symbol, sample std of daily returns), most volatile
    /// first. Symbols with fewer than two defined returns are excluded.
    pub entries: Vec<(String, f64)>,
}

pub fn volatility_ranking(data: &MarketData) -> Result<VolatilityRanking, ViewError> {
    let mut entries: Vec<(String, f64)> = data
        .series()
        .iter()
        .filter_map(|s| {
            let returns: Vec<f64> = s.daily_return.iter().flatten().copied().collect();
            sample_std(&returns).map(|std| (s.symbol.clone(), std))
        })
        .collect();

    if entries.is_empty() {
        return Err(ViewError::NoData("volatility ranking"));
    }

    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries.truncate(TOP_N);
    Ok(VolatilityRanking { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::{empty_market, market_from_closes};

    #[test]
    fn empty_dataset_is_a_warning() {
        assert_eq!(
            volatility_ranking(&empty_market()),
            Err(ViewError::NoData("volatility ranking"))
        );
    }

    #[test]
    fn short_series_are_excluded() {
        // One close → no returns; two closes → one return; neither is
        // enough for a sample standard deviation.
        let data = market_from_closes(&[("A", &[100.0]), ("B", &[100.0, 110.0])]);
        assert_eq!(
            volatility_ranking(&data),
            Err(ViewError::NoData("volatility ranking"))
        );
    }

    #[test]
    fn ranks_most_volatile_first() {
        let data = market_from_closes(&[
            ("CALM", &[100.0, 101.0, 100.0, 101.0]),
            ("WILD", &[100.0, 150.0, 75.0, 140.0]),
        ]);
        let ranking = volatility_ranking(&data).unwrap();
        assert_eq!(ranking.entries[0].0, "WILD");
        assert_eq!(ranking.entries[1].0, "CALM");
        assert!(ranking.entries[0].1 > ranking.entries[1].1);
    }

    #[test]
    fn constant_price_has_zero_volatility_but_still_ranks() {
        let data = market_from_closes(&[("FLAT", &[100.0, 100.0, 100.0])]);
        let ranking = volatility_ranking(&data).unwrap();
        assert_eq!(ranking.entries, vec![("FLAT".to_string(), 0.0)]);
    }
}
