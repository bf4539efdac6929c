use serde::{Deserialize, Serialize};

/// Sentinel for string fields whose upstream value is missing.
pub const ABSENT_TEXT: &str = "-";

/// Flat per-symbol quote snapshot.
///
/// Also used for futures and indices, in which case several fields keep their
/// defaults. Absence is encoded purely in sentinel values: `0.0` for numbers,
/// `"-"` for strings. A wholly absent instrument leaves `symbol == "-"`,
/// which callers check through [`Metrics::is_absent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Instrument name, from `displayName` with a `shortName` fallback
    /// (futures and indices usually only carry the latter).
    pub name: String,
    pub symbol: String,
    pub currency: String,
    pub market_cap: f64,
    /// Dividend yield as a percentage.
    pub dividend_yield: f64,
    pub pe_ratio: f64,
    pub latest_price: f64,
    /// Latest change in percent against the day's open.
    pub latest_change: f64,
    pub open_price: f64,
    pub day_low: f64,
    pub day_high: f64,
    pub prev_close: f64,
    pub fifty_two_week_low: f64,
    pub fifty_two_week_high: f64,
    pub ma_50: f64,
    pub ma_200: f64,
    pub avg_volume: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            name: String::from(ABSENT_TEXT),
            symbol: String::from(ABSENT_TEXT),
            currency: String::from(ABSENT_TEXT),
            market_cap: 0.0,
            dividend_yield: 0.0,
            pe_ratio: 0.0,
            latest_price: 0.0,
            latest_change: 0.0,
            open_price: 0.0,
            day_low: 0.0,
            day_high: 0.0,
            prev_close: 0.0,
            fifty_two_week_low: 0.0,
            fifty_two_week_high: 0.0,
            ma_50: 0.0,
            ma_200: 0.0,
            avg_volume: 0.0,
        }
    }
}

impl Metrics {
    /// True when the upstream lookup produced nothing for this symbol.
    pub fn is_absent(&self) -> bool {
        self.symbol == ABSENT_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_is_the_absent_sentinel() {
        let metrics = Metrics::default();
        assert!(metrics.is_absent());
        assert_eq!(metrics.name, "-");
        assert_eq!(metrics.dividend_yield, 0.0);
    }
}
