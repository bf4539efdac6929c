//! Core domain types: symbols, bars, durations, and quote metrics.

mod bar;
mod duration;
mod metrics;
mod symbol;

pub use bar::{Bar, BarSeries};
pub use duration::{
    resolve_duration, DurationSpec, DurationUnit, MAX_READABLE_SECONDS, MIN_CHART_SECONDS,
    SECONDS_PER_DAY, SECONDS_PER_MONTH, SECONDS_PER_WEEK, SECONDS_PER_YEAR,
};
pub use metrics::{Metrics, ABSENT_TEXT};
pub use symbol::Symbol;
