//! Chart layout engine.
//!
//! Pure geometry: a bar series plus captions in, a backend-agnostic
//! [`ChartLayout`] out. Nothing here touches pixels, fonts, or files; the
//! renderer crate consumes the output verbatim.

mod ticks;

use std::str::FromStr;

use crate::{BarSeries, Metrics, ValidationError};

pub use ticks::{Tick, TickPlan, MAX_FULLY_LABELED, TARGET_TICKS};

/// Candle body half-width in x units (bars sit at integer x).
pub const BODY_HALF_WIDTH: f64 = 0.2;
/// Price axis lower bound factor applied to the series low.
pub const LOW_PADDING: f64 = 0.99;
/// Price axis upper bound factor applied to the series high.
pub const HIGH_PADDING: f64 = 1.01;
/// Raw share counts are shown in units of ten million.
pub const VOLUME_DIVISOR: f64 = 10_000_000.0;
/// Headroom over the tallest volume bar when volume gets its own subplot.
pub const VOLUME_SUBPLOT_HEADROOM: f64 = 1.01;
/// Headroom when volume shares the price pane: bars stay in the lower
/// quarter so they never bury the candles.
pub const VOLUME_OVERLAY_HEADROOM: f64 = 4.0;

/// Which price fields a line chart traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceMode {
    Open,
    #[default]
    Close,
    Both,
}

impl FromStr for PriceMode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "both" => Ok(Self::Both),
            _ => Err(ValidationError::InvalidPriceMode {
                value: value.to_owned(),
            }),
        }
    }
}

/// Candle color class. A doji (close equal to open) counts as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleDirection {
    Up,
    Down,
}

/// Padded price axis bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// `[series low * 0.99, series high * 1.01]`; `None` for an empty series.
    pub fn of(series: &BarSeries) -> Option<Self> {
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;
        for bar in &series.bars {
            low = low.min(bar.low);
            high = high.max(bar.high);
        }
        if series.is_empty() {
            return None;
        }
        Some(Self {
            min: low * LOW_PADDING,
            max: high * HIGH_PADDING,
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// One candle's drawable geometry at integer x position.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleGeometry {
    pub x: f64,
    pub wick_low: f64,
    pub wick_high: f64,
    pub body_bottom: f64,
    pub body_top: f64,
    pub direction: CandleDirection,
}

impl CandleGeometry {
    fn of(x: usize, bar: &crate::Bar) -> Self {
        let direction = if bar.close >= bar.open {
            CandleDirection::Up
        } else {
            CandleDirection::Down
        };
        Self {
            x: x as f64,
            wick_low: bar.low,
            wick_high: bar.high,
            body_bottom: bar.open.min(bar.close),
            body_top: bar.open.max(bar.close),
            direction,
        }
    }

    pub fn body_left(&self) -> f64 {
        self.x - BODY_HALF_WIDTH
    }

    pub fn body_right(&self) -> f64 {
        self.x + BODY_HALF_WIDTH
    }
}

/// Where the volume bars live relative to the price pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumePresentation {
    /// Own pane below the candles with its own y axis.
    SeparateSubplot,
    /// Drawn into the price pane on a secondary axis, scaled down so the
    /// tallest bar fills at most a quarter of the height.
    SharedAxisOverlay,
}

/// Volume bars in units of ten million shares, plus the axis ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeScale {
    pub bars: Vec<f64>,
    pub max: f64,
    pub presentation: VolumePresentation,
}

impl VolumeScale {
    fn of(series: &BarSeries, presentation: VolumePresentation) -> Self {
        let bars: Vec<f64> = series
            .bars
            .iter()
            .map(|bar| bar.volume as f64 / VOLUME_DIVISOR)
            .collect();
        let tallest = bars.iter().copied().fold(0.0_f64, f64::max);
        let headroom = match presentation {
            VolumePresentation::SeparateSubplot => VOLUME_SUBPLOT_HEADROOM,
            VolumePresentation::SharedAxisOverlay => VOLUME_OVERLAY_HEADROOM,
        };
        Self {
            bars,
            max: tallest * headroom,
            presentation,
        }
    }
}

/// One named polyline over the bar indices.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTrace {
    pub label: &'static str,
    pub points: Vec<(f64, f64)>,
}

impl PriceTrace {
    fn of(label: &'static str, series: &BarSeries, field: fn(&crate::Bar) -> f64) -> Self {
        let points = series
            .bars
            .iter()
            .enumerate()
            .map(|(x, bar)| (x as f64, field(bar)))
            .collect();
        Self { label, points }
    }
}

/// Title and axis text for a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartCaptions {
    pub title: String,
    pub price_axis: String,
}

impl ChartCaptions {
    /// Title from the quote name when present, the raw symbol otherwise.
    /// The currency falls back to the absent sentinel, which still renders.
    pub fn from_metrics(metrics: &Metrics, series: &BarSeries) -> Self {
        let title = if metrics.is_absent() || metrics.name == crate::ABSENT_TEXT {
            series.symbol.to_string()
        } else {
            metrics.name.clone()
        };
        Self {
            title,
            price_axis: format!("Price in {}", metrics.currency),
        }
    }
}

/// Chart-kind specific payload of a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartContent {
    Line { traces: Vec<PriceTrace> },
    Candles { candles: Vec<CandleGeometry> },
    CandlesWithVolume {
        candles: Vec<CandleGeometry>,
        volume: VolumeScale,
    },
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub captions: ChartCaptions,
    pub price_range: PriceRange,
    pub ticks: TickPlan,
    /// Bar count; the x axis spans `-1.0 .. bar_count`.
    pub bar_count: usize,
    pub content: ChartContent,
}

fn base_layout(series: &BarSeries, captions: ChartCaptions, content: ChartContent) -> Option<ChartLayout> {
    let price_range = PriceRange::of(series)?;
    Some(ChartLayout {
        captions,
        price_range,
        ticks: TickPlan::plan(&series.date_labels()),
        bar_count: series.len(),
        content,
    })
}

/// Line chart of open, close, or both. The price axis spans the traced
/// values exactly, without the candle padding. `None` for an empty series.
pub fn price_line_layout(
    series: &BarSeries,
    captions: ChartCaptions,
    mode: PriceMode,
) -> Option<ChartLayout> {
    if series.is_empty() {
        return None;
    }
    let mut traces = Vec::new();
    if matches!(mode, PriceMode::Open | PriceMode::Both) {
        traces.push(PriceTrace::of("Open", series, |bar| bar.open));
    }
    if matches!(mode, PriceMode::Close | PriceMode::Both) {
        traces.push(PriceTrace::of("Close", series, |bar| bar.close));
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for trace in &traces {
        for &(_, y) in &trace.points {
            min = min.min(y);
            max = max.max(y);
        }
    }

    Some(ChartLayout {
        captions,
        price_range: PriceRange { min, max },
        ticks: TickPlan::plan(&series.date_labels()),
        bar_count: series.len(),
        content: ChartContent::Line { traces },
    })
}

/// Candlestick chart. `None` for an empty series.
pub fn candlestick_layout(series: &BarSeries, captions: ChartCaptions) -> Option<ChartLayout> {
    if series.is_empty() {
        return None;
    }
    let candles = series
        .bars
        .iter()
        .enumerate()
        .map(|(x, bar)| CandleGeometry::of(x, bar))
        .collect();
    base_layout(series, captions, ChartContent::Candles { candles })
}

/// Candlesticks with a volume overlay on a shared axis. `None` for an empty
/// series.
pub fn candle_volume_layout(series: &BarSeries, captions: ChartCaptions) -> Option<ChartLayout> {
    if series.is_empty() {
        return None;
    }
    let candles = series
        .bars
        .iter()
        .enumerate()
        .map(|(x, bar)| CandleGeometry::of(x, bar))
        .collect();
    let volume = VolumeScale::of(series, VolumePresentation::SharedAxisOverlay);
    base_layout(
        series,
        captions,
        ChartContent::CandlesWithVolume { candles, volume },
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Bar, Symbol};

    use super::*;

    fn series(bars: Vec<Bar>) -> BarSeries {
        BarSeries::new(Symbol::parse("AAPL").expect("valid symbol"), bars)
    }

    fn bar(open: f64, high: f64, low: f64, close: f64, volume: u64) -> Bar {
        Bar::new(date!(2024 - 01 - 02), open, high, low, close, volume)
    }

    fn captions() -> ChartCaptions {
        ChartCaptions {
            title: "Apple".into(),
            price_axis: "Price in USD".into(),
        }
    }

    #[test]
    fn price_range_pads_by_one_percent_each_side() {
        let s = series(vec![
            bar(10.0, 12.0, 9.0, 11.0, 100),
            bar(11.0, 14.0, 10.5, 13.0, 100),
        ]);
        let range = PriceRange::of(&s).expect("nonempty series");
        assert_eq!(range.min, 9.0 * 0.99);
        assert_eq!(range.max, 14.0 * 1.01);
    }

    #[test]
    fn doji_counts_as_up() {
        let s = series(vec![bar(10.0, 11.0, 9.0, 10.0, 100)]);
        let layout = candlestick_layout(&s, captions()).expect("nonempty series");
        let ChartContent::Candles { candles } = layout.content else {
            panic!("candlestick layout carries candles");
        };
        assert_eq!(candles[0].direction, CandleDirection::Up);
    }

    #[test]
    fn candle_directions_follow_close_against_open() {
        let s = series(vec![
            bar(10.0, 11.0, 9.0, 10.5, 100), // up
            bar(10.5, 11.0, 9.5, 10.0, 100), // down
            bar(10.0, 11.5, 9.8, 11.0, 100), // up
            bar(11.0, 11.2, 10.0, 10.2, 100), // down
            bar(10.2, 10.8, 10.0, 10.8, 100), // up
        ]);
        let layout = candlestick_layout(&s, captions()).expect("nonempty series");
        let ChartContent::Candles { candles } = layout.content else {
            panic!("candlestick layout carries candles");
        };
        let directions: Vec<CandleDirection> = candles.iter().map(|c| c.direction).collect();
        use CandleDirection::{Down, Up};
        assert_eq!(directions, vec![Up, Down, Up, Down, Up]);
    }

    #[test]
    fn candle_body_is_ordered_and_centered() {
        let s = series(vec![bar(11.0, 12.0, 9.0, 10.0, 100)]);
        let layout = candlestick_layout(&s, captions()).expect("nonempty series");
        let ChartContent::Candles { candles } = layout.content else {
            panic!("candlestick layout carries candles");
        };
        let candle = &candles[0];
        assert_eq!(candle.body_bottom, 10.0);
        assert_eq!(candle.body_top, 11.0);
        assert_eq!(candle.body_left(), -0.2);
        assert_eq!(candle.body_right(), 0.2);
        assert_eq!(candle.wick_low, 9.0);
        assert_eq!(candle.wick_high, 12.0);
    }

    #[test]
    fn volume_overlay_scales_to_ten_millions_with_quadruple_headroom() {
        let s = series(vec![
            bar(10.0, 11.0, 9.0, 10.5, 40_000_000),
            bar(10.5, 11.0, 9.5, 10.0, 25_000_000),
        ]);
        let layout = candle_volume_layout(&s, captions()).expect("nonempty series");
        let ChartContent::CandlesWithVolume { volume, .. } = layout.content else {
            panic!("layout carries volume");
        };
        assert_eq!(volume.bars, vec![4.0, 2.5]);
        assert_eq!(volume.max, 16.0);
        assert_eq!(volume.presentation, VolumePresentation::SharedAxisOverlay);
    }

    #[test]
    fn subplot_presentation_uses_tight_headroom() {
        let s = series(vec![bar(10.0, 11.0, 9.0, 10.5, 40_000_000)]);
        let volume = VolumeScale::of(&s, VolumePresentation::SeparateSubplot);
        assert_eq!(volume.max, 4.0 * 1.01);
    }

    #[test]
    fn line_layout_traces_follow_mode() {
        let s = series(vec![bar(10.0, 11.0, 9.0, 10.5, 100)]);
        let open_only = price_line_layout(&s, captions(), PriceMode::Open).expect("nonempty");
        let ChartContent::Line { traces } = open_only.content else {
            panic!("line layout carries traces");
        };
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].label, "Open");
        assert_eq!(traces[0].points, vec![(0.0, 10.0)]);

        let both = price_line_layout(&s, captions(), PriceMode::Both).expect("nonempty");
        let ChartContent::Line { traces } = both.content else {
            panic!("line layout carries traces");
        };
        let labels: Vec<&str> = traces.iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["Open", "Close"]);
    }

    #[test]
    fn line_layout_price_range_is_unpadded() {
        let s = series(vec![
            bar(10.0, 15.0, 8.0, 12.0, 100),
            bar(12.0, 16.0, 9.0, 11.0, 100),
        ]);
        let layout = price_line_layout(&s, captions(), PriceMode::Both).expect("nonempty");
        // Traced values only; wick extremes are ignored.
        assert_eq!(layout.price_range.min, 10.0);
        assert_eq!(layout.price_range.max, 12.0);
    }

    #[test]
    fn empty_series_yields_no_layout() {
        let s = series(Vec::new());
        assert!(price_line_layout(&s, captions(), PriceMode::Close).is_none());
        assert!(candlestick_layout(&s, captions()).is_none());
        assert!(candle_volume_layout(&s, captions()).is_none());
        assert!(PriceRange::of(&s).is_none());
    }

    #[test]
    fn single_bar_layout_is_valid() {
        let s = series(vec![bar(10.0, 11.0, 9.0, 10.5, 100)]);
        let layout = candlestick_layout(&s, captions()).expect("nonempty series");
        assert_eq!(layout.bar_count, 1);
        assert_eq!(layout.ticks.len(), 1);
        assert!(layout.price_range.min < layout.price_range.max);
    }

    #[test]
    fn price_mode_parses_case_insensitively() {
        assert_eq!("Close".parse::<PriceMode>().expect("parses"), PriceMode::Close);
        assert_eq!(" BOTH ".parse::<PriceMode>().expect("parses"), PriceMode::Both);
        assert!(matches!(
            "candle".parse::<PriceMode>(),
            Err(ValidationError::InvalidPriceMode { .. })
        ));
    }

    #[test]
    fn captions_fall_back_to_symbol_when_quote_is_absent() {
        let s = series(vec![bar(10.0, 11.0, 9.0, 10.5, 100)]);
        let absent = Metrics::default();
        let captions = ChartCaptions::from_metrics(&absent, &s);
        assert_eq!(captions.title, "AAPL");
        assert_eq!(captions.price_axis, "Price in -");

        let mut present = Metrics::default();
        present.symbol = "AAPL".into();
        present.name = "Apple".into();
        present.currency = "USD".into();
        let captions = ChartCaptions::from_metrics(&present, &s);
        assert_eq!(captions.title, "Apple");
        assert_eq!(captions.price_axis, "Price in USD");
    }
}
