//! Command-line definitions.
//!
//! ```text
//! # Candlestick chart of the last three months
//! tickplot chart AAPL
//!
//! # Line chart of open and close over two weeks
//! tickplot chart AAPL --period 2w --kind line --mode both
//!
//! # Latest price and full quote metrics
//! tickplot price AAPL
//! tickplot metrics AAPL --markdown
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

use tickplot_core::layout::PriceMode;
use tickplot_core::render::ChartKind;

/// Yahoo Finance charting CLI.
///
/// Fetches daily OHLCV history and quote metrics and renders line,
/// candlestick, and candlestick-plus-volume charts as PNG artifacts.
#[derive(Debug, Parser)]
#[command(
    name = "tickplot",
    author,
    version,
    about = "Render stock charts from Yahoo Finance daily data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a chart artifact for a symbol.
    Chart(ChartArgs),
    /// Print the latest price and day change.
    Price(QuoteArgs),
    /// Print the full quote metrics table.
    Metrics(QuoteArgs),
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Ticker symbol, e.g. AAPL, ^GSPC, GC=F, BTC-USD.
    pub symbol: String,

    /// Chart period: an enumerated token (1w..1y) or `<n><unit>` where the
    /// unit starts with y, m (month), w, or d.
    #[arg(long, default_value = "3mo")]
    pub period: String,

    /// Chart variant to render.
    #[arg(long, value_enum, default_value_t = KindArg::Candle)]
    pub kind: KindArg,

    /// Price fields a line chart traces; ignored for candle variants.
    #[arg(long, value_enum, default_value_t = ModeArg::Close)]
    pub mode: ModeArg,

    /// Directory the PNG artifact is written into.
    #[arg(long, default_value = "images")]
    pub out_dir: String,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Ticker symbol, e.g. AAPL, ^GSPC, GC=F, BTC-USD.
    pub symbol: String,

    /// Emit markdown instead of plain text.
    #[arg(long, default_value_t = false)]
    pub markdown: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Price line chart.
    Line,
    /// Candlestick chart.
    Candle,
    /// Candlesticks with a volume overlay.
    CandleVolume,
}

impl From<KindArg> for ChartKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Line => Self::PriceLine,
            KindArg::Candle => Self::Candlestick,
            KindArg::CandleVolume => Self::CandlestickVolume,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Trace opening prices.
    Open,
    /// Trace closing prices.
    Close,
    /// Trace both.
    Both,
}

impl From<ModeArg> for PriceMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Open => Self::Open,
            ModeArg::Close => Self::Close,
            ModeArg::Both => Self::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn chart_defaults_to_three_month_candles() {
        let cli = Cli::parse_from(["tickplot", "chart", "AAPL"]);
        let Command::Chart(args) = cli.command else {
            panic!("chart subcommand expected");
        };
        assert_eq!(args.symbol, "AAPL");
        assert_eq!(args.period, "3mo");
        assert_eq!(args.kind, KindArg::Candle);
        assert_eq!(args.mode, ModeArg::Close);
        assert_eq!(args.out_dir, "images");
    }

    #[test]
    fn line_chart_mode_is_selectable() {
        let cli = Cli::parse_from([
            "tickplot", "chart", "AAPL", "--kind", "line", "--mode", "both", "--period", "2w",
        ]);
        let Command::Chart(args) = cli.command else {
            panic!("chart subcommand expected");
        };
        assert_eq!(ChartKind::from(args.kind), ChartKind::PriceLine);
        assert_eq!(PriceMode::from(args.mode), PriceMode::Both);
        assert_eq!(args.period, "2w");
    }

    #[test]
    fn metrics_accepts_markdown_flag() {
        let cli = Cli::parse_from(["tickplot", "metrics", "GC=F", "--markdown"]);
        let Command::Metrics(args) = cli.command else {
            panic!("metrics subcommand expected");
        };
        assert!(args.markdown);
    }
}
