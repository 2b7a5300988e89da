//! Stock performance view: cumulative-return curves for a user-selected
//! subset of symbols.

use chrono::NaiveDate;

use super::ViewError;
use crate::dataset::MarketData;

/// One line on the performance chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolCurve {
    pub symbol: String,
    /// (date, cumulative return) with undefined points dropped.
    pub points: Vec<(NaiveDate, f64)>,
}

/// Curves for the selected symbols. Empty selection is a warning state;
/// unknown symbols are skipped silently.
pub fn cumulative_curves(
    data: &MarketData,
    selected: &[String],
) -> Result<Vec<SymbolCurve>, ViewError> {
    if selected.is_empty() {
        return Err(ViewError::EmptySelection);
    }

    let mut curves = Vec::new();
    for symbol in selected {
        let Some(series) = data.get(symbol) else {
            continue;
        };
        let points: Vec<(NaiveDate, f64)> = series
            .dates
            .iter()
            .zip(&series.cumulative_return)
            .filter_map(|(date, cum)| Some((((*date)?), ((*cum)?))))
            .collect();
        curves.push(SymbolCurve {
            symbol: symbol.clone(),
            points,
        });
    }

    if curves.iter().all(|c| c.points.is_empty()) {
        return Err(ViewError::NoData("performance curves"));
    }
    Ok(curves)
}
