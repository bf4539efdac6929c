//! Daily-bar CSV parsing.
//!
//! Upstream format: header `Date,Open,High,Low,Close,Adj Close,Volume`, one
//! row per trading day. The parse is all-or-nothing: a single unparsable
//! field discards the whole response, so a truncated download never shows up
//! as a silently shortened series.

use thiserror::Error;
use time::macros::format_description;
use time::Date;

use crate::{Bar, BarSeries, Symbol};

/// Literal marker Yahoo embeds in the body when a symbol is unknown or
/// delisted.
pub const NOT_FOUND_MARKER: &str = "404 Not Found: No data found, symbol may be delisted";

/// Date, OHLC, adjusted close, volume.
const EXPECTED_FIELDS: usize = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
enum RowError {
    #[error("invalid date '{value}'")]
    InvalidDate { value: String },
    #[error("invalid {field} '{value}'")]
    InvalidNumber {
        field: &'static str,
        value: String,
    },
}

/// Parse a raw CSV response into a bar series.
///
/// Every failure path returns the empty-series sentinel; this function never
/// panics or propagates errors. `period` only feeds the log line.
pub fn parse_bar_series(raw: &str, symbol: &Symbol, period: &str) -> BarSeries {
    if raw.trim().is_empty() {
        log::warn!("empty bar response for {symbol} over {period}");
        return BarSeries::empty(symbol.clone());
    }
    if raw.contains(NOT_FOUND_MARKER) {
        log::warn!("symbol not found or delisted: {symbol}");
        return BarSeries::empty(symbol.clone());
    }

    let mut lines = raw.lines();
    let _header = lines.next();

    let mut bars = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < EXPECTED_FIELDS {
            // Truncated row: dropped without producing a partial bar.
            continue;
        }
        match parse_row(&fields) {
            Ok(bar) => bars.push(bar),
            Err(error) => {
                log::error!(
                    "discarding bar response for {symbol} over {period}: {error} in row '{line}'"
                );
                return BarSeries::empty(symbol.clone());
            }
        }
    }

    BarSeries::new(symbol.clone(), bars)
}

fn parse_row(fields: &[&str]) -> Result<Bar, RowError> {
    let date = parse_date(fields[0])?;
    let open = parse_price("open", fields[1])?;
    let high = parse_price("high", fields[2])?;
    let low = parse_price("low", fields[3])?;
    let close = parse_price("close", fields[4])?;
    // fields[5] is the adjusted close; fetched but not charted.
    let volume = fields[6]
        .trim()
        .parse::<u64>()
        .map_err(|_| RowError::InvalidNumber {
            field: "volume",
            value: fields[6].to_owned(),
        })?;

    Ok(Bar::new(date, open, high, low, close, volume))
}

fn parse_date(value: &str) -> Result<Date, RowError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).map_err(|_| RowError::InvalidDate {
        value: value.to_owned(),
    })
}

fn parse_price(field: &'static str, value: &str) -> Result<f64, RowError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RowError::InvalidNumber {
            field,
            value: value.to_owned(),
        })
}
