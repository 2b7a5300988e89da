//! Synthetic fallback dataset.
//!
//! When the store is unreachable the dashboard still has to render, so we
//! generate a year of plausible daily bars for a handful of symbols. The
//! generator is seeded and fully deterministic.

use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::dates::date_series;

/// Symbols used for demonstration data.
pub const SAMPLE_SYMBOLS: [&str; 5] = ["AAPL", "AMZN", "GOOGL", "META", "MSFT"];

const DAYS: i64 = 365;

/// Generate a deterministic synthetic price frame in the canonical schema.
pub fn synthetic_prices(seed: u64) -> PolarsResult<DataFrame> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    let rows = SAMPLE_SYMBOLS.len() * DAYS as usize;
    let mut dates: Vec<Option<NaiveDate>> = Vec::with_capacity(rows);
    let mut symbols: Vec<&str> = Vec::with_capacity(rows);
    let mut open: Vec<f64> = Vec::with_capacity(rows);
    let mut high: Vec<f64> = Vec::with_capacity(rows);
    let mut low: Vec<f64> = Vec::with_capacity(rows);
    let mut close: Vec<f64> = Vec::with_capacity(rows);
    let mut volume: Vec<f64> = Vec::with_capacity(rows);

    for symbol in SAMPLE_SYMBOLS {
        let base: f64 = rng.gen_range(50.0..500.0);
        let volatility: f64 = rng.gen_range(0.01..0.03);
        let drift: f64 = rng.gen_range(-0.0005..0.0015);
        let mut price = base;

        for day in 0..DAYS {
            let shock = (rng.gen::<f64>() * 2.0 - 1.0) * volatility;
            let prev = price;
            price = (price * (1.0 + drift + shock)).max(1.0);

            let day_high = prev.max(price) * (1.0 + rng.gen_range(0.0..0.01));
            let day_low = prev.min(price) * (1.0 - rng.gen_range(0.0..0.01));

            dates.push(Some(start + Duration::days(day)));
            symbols.push(symbol);
            open.push(prev);
            high.push(day_high);
            low.push(day_low);
            close.push(price);
            volume.push(rng.gen_range(100_000.0_f64..5_000_000.0).round());
        }
    }

    DataFrame::new(vec![
        date_series("date", &dates)?.into(),
        Series::new("symbol".into(), symbols).into(),
        Series::new("open".into(), open).into(),
        Series::new("high".into(), high).into(),
        Series::new("low".into(), low).into(),
        Series::new("close".into(), close).into(),
        Series::new("volume".into(), volume).into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::PriceSchema;

    #[test]
    fn generates_a_year_per_symbol_in_canonical_schema() {
        let df = synthetic_prices(42).unwrap();
        assert_eq!(df.height(), SAMPLE_SYMBOLS.len() * 365);
        PriceSchema::validate(&df).unwrap();
    }

    #[test]
    fn is_deterministic_for_a_given_seed() {
        let a = synthetic_prices(7).unwrap();
        let b = synthetic_prices(7).unwrap();
        assert!(a.equals_missing(&b));
    }

    #[test]
    fn prices_stay_positive() {
        let df = synthetic_prices(42).unwrap();
        let min_close = df
            .column("close")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .fold(f64::INFINITY, f64::min);
        assert!(min_close > 0.0);
    }
}
