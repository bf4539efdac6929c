//! Yahoo Finance endpoints and fetch plumbing.
//!
//! URLs are fully built here; the transport sees only opaque GETs. Failure is
//! reported downstream as an empty body, never as an error: the parsers treat
//! emptiness and known error markers as the "no data" sentinel.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::http_client::{HttpClient, HttpRequest};
use crate::Symbol;

/// Daily-bar CSV download endpoint.
pub const DOWNLOAD_BASE: &str = "https://query1.finance.yahoo.com/v7/finance/download";
/// Options endpoint whose nested quote object carries the metrics fields.
pub const OPTIONS_BASE: &str = "https://query1.finance.yahoo.com/v7/finance/options";

const FETCH_TIMEOUT_MS: u64 = 10_000;

/// Unix-second fetch window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Window ending now and spanning `seconds` back.
    pub fn ending_now(seconds: u64) -> Self {
        let end = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            start: end - seconds as i64,
            end,
        }
    }
}

/// Fetch facade over the two Yahoo endpoints this crate consumes.
pub struct YahooSource {
    http: Arc<dyn HttpClient>,
}

impl YahooSource {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    pub fn bars_url(symbol: &Symbol, window: TimeWindow) -> String {
        format!(
            "{DOWNLOAD_BASE}/{}?period1={}&period2={}&interval=1d&events=history",
            urlencoding::encode(symbol.as_str()),
            window.start,
            window.end,
        )
    }

    pub fn quote_url(symbol: &Symbol) -> String {
        format!(
            "{OPTIONS_BASE}/{}",
            urlencoding::encode(symbol.as_str())
        )
    }

    /// Raw daily-bar CSV for the window; empty string when the fetch fails.
    pub async fn fetch_bars_csv(&self, symbol: &Symbol, window: TimeWindow) -> String {
        self.fetch_text(Self::bars_url(symbol, window)).await
    }

    /// Raw quote JSON; empty string when the fetch fails.
    pub async fn fetch_quote_json(&self, symbol: &Symbol) -> String {
        self.fetch_text(Self::quote_url(symbol)).await
    }

    async fn fetch_text(&self, url: String) -> String {
        let request = HttpRequest::get(&url).with_timeout_ms(FETCH_TIMEOUT_MS);
        match self.http.execute(request).await {
            Ok(response) if response.is_success() => response.body,
            Ok(response) => {
                log::warn!("yahoo returned status {} for {url}", response.status);
                String::new()
            }
            Err(error) => {
                log::warn!("yahoo transport error for {url}: {error}");
                String::new()
            }
        }
    }
}
