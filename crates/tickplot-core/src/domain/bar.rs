use serde::{Deserialize, Serialize};
use time::Date;

use crate::Symbol;

/// One trading day's OHLCV record.
///
/// The usual `low <= open, close <= high` relationship is deliberately not
/// enforced: malformed upstream rows are carried through unchanged and the
/// layout engine must produce drawable geometry for them anyway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(date: Date, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Axis label for this bar, `YYYY-MM-DD`.
    pub fn date_label(&self) -> String {
        self.date.to_string()
    }
}

/// Chronologically ascending run of daily bars for one symbol.
///
/// Empty is a valid terminal state meaning "no data"; it is how every fetch
/// or parse failure is reported across the crate boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: Symbol,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: Symbol, bars: Vec<Bar>) -> Self {
        Self { symbol, bars }
    }

    /// The "no data" sentinel.
    pub fn empty(symbol: Symbol) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn date_labels(&self) -> Vec<String> {
        self.bars.iter().map(Bar::date_label).collect()
    }
}
