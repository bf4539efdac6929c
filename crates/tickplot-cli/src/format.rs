//! Plain and markdown text output for quote data.

use tickplot_core::Metrics;

const PRICE_UNAVAILABLE: &str = "Could not fetch latest price data. Symbol may be invalid.";
const METRICS_UNAVAILABLE: &str = "Could not fetch stock data. Symbol may be invalid.";

/// Latest price with the day change in percent.
pub fn price(metrics: &Metrics, markdown: bool) -> String {
    if metrics.is_absent() {
        return String::from(PRICE_UNAVAILABLE);
    }

    let price = metrics.latest_price;
    let change = metrics.latest_change;
    if markdown {
        format!(
            "### Latest Price for {}:\n`{price:.2} {} ({change:+.2}%)`",
            metrics.name, metrics.currency
        )
    } else {
        format!(
            "The latest price of {}: {price:.2} {} ({change:+.2}%)",
            metrics.name, metrics.currency
        )
    }
}

/// Full metrics table, one line per field.
pub fn metrics(metrics: &Metrics, markdown: bool) -> String {
    if metrics.is_absent() {
        return String::from(METRICS_UNAVAILABLE);
    }

    let rows = [
        ("Name", metrics.name.clone()),
        ("Symbol", metrics.symbol.clone()),
        ("Currency", metrics.currency.clone()),
        ("Latest Price", format!("{:.2}", metrics.latest_price)),
        ("Latest Change", format!("{:+.2}%", metrics.latest_change)),
        ("Open", format!("{:.2}", metrics.open_price)),
        (
            "Day Range",
            format!("{:.2} - {:.2}", metrics.day_low, metrics.day_high),
        ),
        ("Previous Close", format!("{:.2}", metrics.prev_close)),
        (
            "52 Week Range",
            format!(
                "{:.2} - {:.2}",
                metrics.fifty_two_week_low, metrics.fifty_two_week_high
            ),
        ),
        ("50-Day Average", format!("{:.2}", metrics.ma_50)),
        ("200-Day Average", format!("{:.2}", metrics.ma_200)),
        ("Market Cap", format!("{:.2}", metrics.market_cap)),
        ("Dividend Yield", format!("{:.2}%", metrics.dividend_yield)),
        ("P/E Ratio", format!("{:.2}", metrics.pe_ratio)),
        ("Avg. Volume (3m)", format!("{:.2}", metrics.avg_volume)),
    ];

    let mut out = if markdown {
        format!("**Stock Metrics for {}:**\n", metrics.symbol)
    } else {
        format!("Stock Metrics for {}:\n", metrics.symbol)
    };
    for (label, value) in rows {
        if markdown {
            out.push_str(&format!("- {label}: `{value}`\n"));
        } else {
            out.push_str(&format!("- {label}: {value}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Metrics {
        Metrics {
            name: String::from("Apple"),
            symbol: String::from("AAPL"),
            currency: String::from("USD"),
            latest_price: 187.5,
            latest_change: -1.25,
            ..Metrics::default()
        }
    }

    #[test]
    fn plain_price_carries_signed_change() {
        let text = price(&sample(), false);
        assert_eq!(text, "The latest price of Apple: 187.50 USD (-1.25%)");
    }

    #[test]
    fn markdown_price_wraps_the_value_in_code() {
        let text = price(&sample(), true);
        assert!(text.starts_with("### Latest Price for Apple:\n"));
        assert!(text.contains("`187.50 USD (-1.25%)`"));
    }

    #[test]
    fn positive_change_gets_an_explicit_plus() {
        let mut metrics = sample();
        metrics.latest_change = 2.5;
        assert!(price(&metrics, false).ends_with("(+2.50%)"));
    }

    #[test]
    fn absent_quote_reads_as_unavailable() {
        let absent = Metrics::default();
        assert_eq!(price(&absent, false), PRICE_UNAVAILABLE);
        assert_eq!(metrics(&absent, true), METRICS_UNAVAILABLE);
    }

    #[test]
    fn metrics_table_lists_every_field_group() {
        let text = metrics(&sample(), false);
        assert!(text.starts_with("Stock Metrics for AAPL:\n"));
        for label in ["Market Cap", "52 Week Range", "P/E Ratio", "Avg. Volume (3m)"] {
            assert!(text.contains(label), "missing {label}");
        }
    }
}
