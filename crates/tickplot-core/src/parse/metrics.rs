//! Quote JSON parsing.
//!
//! Input is the options endpoint document; the metrics live on the nested
//! `optionChain.result[0].quote` object. Every field is copied only when
//! present and of the expected type, otherwise the struct default stands in.
//! This function never raises; absence is represented purely by sentinel
//! field values.

use serde::{Deserialize, Deserializer};

use crate::Metrics;

/// Literal document Yahoo returns for an unknown symbol.
pub const EMPTY_OPTION_CHAIN: &str = r#"{"optionChain":{"result":[],"error":null}}"#;

#[derive(Debug, Deserialize)]
struct OptionChainDocument {
    #[serde(rename = "optionChain")]
    option_chain: OptionChainBody,
}

#[derive(Debug, Deserialize)]
struct OptionChainBody {
    #[serde(default)]
    result: Vec<OptionChainResult>,
}

#[derive(Debug, Deserialize)]
struct OptionChainResult {
    #[serde(default)]
    quote: Option<RawQuote>,
}

/// The quote object with every field optional and leniently typed: a field of
/// the wrong JSON type reads as absent instead of failing the document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawQuote {
    #[serde(rename = "displayName", deserialize_with = "lenient_string")]
    display_name: Option<String>,
    #[serde(rename = "shortName", deserialize_with = "lenient_string")]
    short_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    symbol: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    currency: Option<String>,
    #[serde(rename = "marketCap", deserialize_with = "lenient_f64")]
    market_cap: Option<f64>,
    #[serde(rename = "dividendYield", deserialize_with = "lenient_f64")]
    dividend_yield: Option<f64>,
    #[serde(rename = "trailingPE", deserialize_with = "lenient_f64")]
    trailing_pe: Option<f64>,
    #[serde(rename = "regularMarketPrice", deserialize_with = "lenient_f64")]
    regular_market_price: Option<f64>,
    #[serde(rename = "regularMarketChangePercent", deserialize_with = "lenient_f64")]
    regular_market_change_percent: Option<f64>,
    #[serde(rename = "regularMarketOpen", deserialize_with = "lenient_f64")]
    regular_market_open: Option<f64>,
    #[serde(rename = "regularMarketDayLow", deserialize_with = "lenient_f64")]
    regular_market_day_low: Option<f64>,
    #[serde(rename = "regularMarketDayHigh", deserialize_with = "lenient_f64")]
    regular_market_day_high: Option<f64>,
    #[serde(rename = "regularMarketPreviousClose", deserialize_with = "lenient_f64")]
    regular_market_previous_close: Option<f64>,
    #[serde(rename = "fiftyTwoWeekLow", deserialize_with = "lenient_f64")]
    fifty_two_week_low: Option<f64>,
    #[serde(rename = "fiftyTwoWeekHigh", deserialize_with = "lenient_f64")]
    fifty_two_week_high: Option<f64>,
    #[serde(rename = "fiftyDayAverage", deserialize_with = "lenient_f64")]
    fifty_day_average: Option<f64>,
    #[serde(rename = "twoHundredDayAverage", deserialize_with = "lenient_f64")]
    two_hundred_day_average: Option<f64>,
    #[serde(rename = "averageDailyVolume3Month", deserialize_with = "lenient_f64")]
    average_daily_volume_3month: Option<f64>,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned))
}

/// Parse a raw quote response into a metrics record.
///
/// An empty body, the empty-result document, or a structurally invalid
/// document all yield the all-default record ("not found" reads as
/// `metrics.is_absent()`).
pub fn parse_metrics(raw: &str) -> Metrics {
    let mut metrics = Metrics::default();

    if raw.trim().is_empty() {
        log::warn!("empty quote response");
        return metrics;
    }
    if raw.contains(EMPTY_OPTION_CHAIN) {
        return metrics;
    }

    let document: OptionChainDocument = match serde_json::from_str(raw) {
        Ok(document) => document,
        Err(error) => {
            log::error!("quote response is not a valid option chain document: {error}");
            return metrics;
        }
    };

    let Some(quote) = document
        .option_chain
        .result
        .into_iter()
        .next()
        .and_then(|result| result.quote)
    else {
        return metrics;
    };

    if let Some(name) = quote.display_name.or(quote.short_name) {
        metrics.name = name;
    }
    if let Some(symbol) = quote.symbol {
        metrics.symbol = symbol;
    }
    if let Some(currency) = quote.currency {
        metrics.currency = currency;
    }
    copy_present(&mut metrics.market_cap, quote.market_cap);
    copy_present(&mut metrics.dividend_yield, quote.dividend_yield);
    copy_present(&mut metrics.pe_ratio, quote.trailing_pe);
    copy_present(&mut metrics.latest_price, quote.regular_market_price);
    copy_present(&mut metrics.latest_change, quote.regular_market_change_percent);
    copy_present(&mut metrics.open_price, quote.regular_market_open);
    copy_present(&mut metrics.day_low, quote.regular_market_day_low);
    copy_present(&mut metrics.day_high, quote.regular_market_day_high);
    copy_present(&mut metrics.prev_close, quote.regular_market_previous_close);
    copy_present(&mut metrics.fifty_two_week_low, quote.fifty_two_week_low);
    copy_present(&mut metrics.fifty_two_week_high, quote.fifty_two_week_high);
    copy_present(&mut metrics.ma_50, quote.fifty_day_average);
    copy_present(&mut metrics.ma_200, quote.two_hundred_day_average);
    copy_present(&mut metrics.avg_volume, quote.average_daily_volume_3month);

    metrics
}

fn copy_present(target: &mut f64, source: Option<f64>) {
    if let Some(value) = source {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_document(quote_body: &str) -> String {
        format!(
            r#"{{"optionChain":{{"result":[{{"quote":{quote_body}}}],"error":null}}}}"#
        )
    }

    #[test]
    fn copies_present_fields_and_defaults_the_rest() {
        let raw = quote_document(
            r#"{"symbol":"AAPL","displayName":"Apple","currency":"USD",
                "regularMarketPrice":189.95,"marketCap":2950000000000.0}"#,
        );
        let metrics = parse_metrics(&raw);
        assert!(!metrics.is_absent());
        assert_eq!(metrics.name, "Apple");
        assert_eq!(metrics.currency, "USD");
        assert_eq!(metrics.latest_price, 189.95);
        // Absent upstream field keeps its sentinel.
        assert_eq!(metrics.dividend_yield, 0.0);
        assert_eq!(metrics.ma_200, 0.0);
    }

    #[test]
    fn name_falls_back_to_short_name() {
        let raw = quote_document(r#"{"symbol":"GC=F","shortName":"Gold"}"#);
        let metrics = parse_metrics(&raw);
        assert_eq!(metrics.name, "Gold");
    }

    #[test]
    fn display_name_wins_over_short_name() {
        let raw = quote_document(
            r#"{"symbol":"AAPL","displayName":"Apple","shortName":"Apple Inc."}"#,
        );
        let metrics = parse_metrics(&raw);
        assert_eq!(metrics.name, "Apple");
    }

    #[test]
    fn wrong_typed_field_keeps_its_default() {
        let raw = quote_document(r#"{"symbol":"AAPL","dividendYield":"n/a"}"#);
        let metrics = parse_metrics(&raw);
        assert_eq!(metrics.symbol, "AAPL");
        assert_eq!(metrics.dividend_yield, 0.0);
    }

    #[test]
    fn empty_result_document_yields_absent_metrics() {
        let metrics = parse_metrics(EMPTY_OPTION_CHAIN);
        assert!(metrics.is_absent());
    }

    #[test]
    fn malformed_document_yields_absent_metrics() {
        let metrics = parse_metrics("<html>rate limited</html>");
        assert!(metrics.is_absent());
        assert_eq!(metrics.symbol, "-");
    }

    #[test]
    fn empty_body_yields_absent_metrics() {
        assert!(parse_metrics("").is_absent());
    }
}
