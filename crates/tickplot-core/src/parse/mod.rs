//! Defensive parsers for the two Yahoo response bodies.

mod bars;
mod metrics;

pub use bars::{parse_bar_series, NOT_FOUND_MARKER};
pub use metrics::{parse_metrics, EMPTY_OPTION_CHAIN};
