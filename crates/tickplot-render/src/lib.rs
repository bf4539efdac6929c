//! # Tickplot Render
//!
//! Plotters-backed rasterizer turning a [`ChartLayout`] into a PNG. All
//! geometry decisions are made upstream in the layout engine; this crate only
//! maps geometry to drawing primitives.

use std::path::Path;

use plotters::coord::combinators::{BindKeyPoints, WithKeyPoints};
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use tickplot_core::layout::{
    CandleDirection, CandleGeometry, ChartContent, PriceTrace, VolumeScale, BODY_HALF_WIDTH,
};
use tickplot_core::render::{ChartKind, ChartRenderer, RenderError};
use tickplot_core::ChartLayout;

/// Default artifact width in pixels.
pub const DEFAULT_WIDTH: u32 = 1280;
/// Default artifact height in pixels.
pub const DEFAULT_HEIGHT: u32 = 720;

const TITLE_FONT: (&str, u32) = ("sans-serif", 30);

type PriceChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<KeyedCoordf64, RangedCoordf64>>;

/// `WithKeyPoints<RangedCoordf64>` has no `ValueFormatter` impl in plotters
/// 0.3.7, which `configure_mesh` requires; the orphan rule prevents adding one
/// here, so this wrapper delegates to the inner coord and its formatter.
struct KeyedCoordf64(WithKeyPoints<RangedCoordf64>);

impl Ranged for KeyedCoordf64 {
    type ValueType = f64;
    type FormatOption = NoDefaultFormatting;

    fn range(&self) -> std::ops::Range<f64> {
        self.0.range()
    }

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        self.0.key_points(hint)
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> std::ops::Range<i32> {
        self.0.axis_pixel_range(limit)
    }
}

impl ValueFormatter<f64> for KeyedCoordf64 {
    fn format(value: &f64) -> String {
        <RangedCoordf64 as ValueFormatter<f64>>::format(value)
    }
}

/// PNG renderer with a fixed pixel size.
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    pub width: u32,
    pub height: u32,
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl ChartRenderer for PlottersRenderer {
    fn draw(&self, layout: &ChartLayout, kind: ChartKind, path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        log::debug!(
            "drawing {} ({} bars) to {}",
            kind.artifact_stem(),
            layout.bar_count,
            path.display()
        );

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend)?;

        match &layout.content {
            ChartContent::Line { traces } => draw_line(&root, layout, traces)?,
            ChartContent::Candles { candles } => draw_candles(&root, layout, candles)?,
            ChartContent::CandlesWithVolume { candles, volume } => {
                draw_candles_with_volume(&root, layout, candles, volume)?
            }
        }

        root.present().map_err(backend)?;
        Ok(())
    }
}

fn backend<E: std::fmt::Display>(error: E) -> RenderError {
    RenderError::Backend(error.to_string())
}

/// Price axis span, widened when the series is flat so the coordinate system
/// never degenerates.
fn price_span(layout: &ChartLayout) -> (f64, f64) {
    let range = layout.price_range;
    if range.span() > f64::EPSILON {
        (range.min, range.max)
    } else {
        (range.min - 1.0, range.max + 1.0)
    }
}

fn x_span(layout: &ChartLayout) -> (f64, f64) {
    (-1.0, layout.bar_count as f64)
}

fn label_for(layout: &ChartLayout, x: &f64) -> String {
    let index = x.round();
    if index < 0.0 {
        return String::new();
    }
    layout
        .ticks
        .label_at(index as usize)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn build_price_chart<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, plotters::coord::Shift>,
    layout: &ChartLayout,
) -> Result<PriceChart<'a, 'b>, RenderError> {
    let (x_min, x_max) = x_span(layout);
    let (y_min, y_max) = price_span(layout);

    let mut chart = ChartBuilder::on(root)
        .caption(&layout.captions.title, TITLE_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            KeyedCoordf64((x_min..x_max).with_key_points(layout.ticks.positions())),
            y_min..y_max,
        )
        .map_err(backend)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|x| label_for(layout, x))
        .y_desc(layout.captions.price_axis.as_str())
        .draw()
        .map_err(backend)?;

    Ok(chart)
}

fn draw_line(
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    layout: &ChartLayout,
    traces: &[PriceTrace],
) -> Result<(), RenderError> {
    let mut chart = build_price_chart(root, layout)?;

    let palette = [BLUE, BLACK];
    for (trace, &color) in traces.iter().zip(palette.iter().cycle()) {
        chart
            .draw_series(LineSeries::new(trace.points.iter().copied(), &color))
            .map_err(backend)?
            .label(trace.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(backend)?;
    Ok(())
}

fn body_color(candle: &CandleGeometry) -> RGBColor {
    match candle.direction {
        CandleDirection::Up => GREEN,
        CandleDirection::Down => RED,
    }
}

/// Wicks first, then bodies on top of them.
fn paint_candles(
    chart: &mut PriceChart<'_, '_>,
    candles: &[CandleGeometry],
) -> Result<(), RenderError> {
    chart
        .draw_series(candles.iter().map(|candle| {
            PathElement::new(
                vec![(candle.x, candle.wick_low), (candle.x, candle.wick_high)],
                BLACK,
            )
        }))
        .map_err(backend)?;
    chart
        .draw_series(candles.iter().map(|candle| {
            Rectangle::new(
                [
                    (candle.body_left(), candle.body_bottom),
                    (candle.body_right(), candle.body_top),
                ],
                body_color(candle).filled(),
            )
        }))
        .map_err(backend)?;
    Ok(())
}

fn draw_candles(
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    layout: &ChartLayout,
    candles: &[CandleGeometry],
) -> Result<(), RenderError> {
    let mut chart = build_price_chart(root, layout)?;
    paint_candles(&mut chart, candles)
}

fn draw_candles_with_volume(
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    layout: &ChartLayout,
    candles: &[CandleGeometry],
    volume: &VolumeScale,
) -> Result<(), RenderError> {
    let (x_min, x_max) = x_span(layout);
    let (y_min, y_max) = price_span(layout);
    let volume_max = if volume.max > 0.0 { volume.max } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(&layout.captions.title, TITLE_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(
            KeyedCoordf64((x_min..x_max).with_key_points(layout.ticks.positions())),
            y_min..y_max,
        )
        .map_err(backend)?
        .set_secondary_coord(x_min..x_max, 0.0..volume_max);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|x| label_for(layout, x))
        .y_desc(layout.captions.price_axis.as_str())
        .draw()
        .map_err(backend)?;
    chart
        .configure_secondary_axes()
        .y_desc("Volume (x10M)")
        .draw()
        .map_err(backend)?;

    chart
        .draw_secondary_series(volume.bars.iter().enumerate().map(|(index, height)| {
            let x = index as f64;
            Rectangle::new(
                [(x - BODY_HALF_WIDTH, 0.0), (x + BODY_HALF_WIDTH, *height)],
                BLUE.mix(0.4).filled(),
            )
        }))
        .map_err(backend)?;

    paint_candles(&mut chart, candles)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use tickplot_core::layout::{candlestick_layout, ChartCaptions};
    use tickplot_core::{Bar, BarSeries, Symbol};

    use super::*;

    fn flat_layout() -> ChartLayout {
        let series = BarSeries::new(
            Symbol::parse("AAPL").expect("valid symbol"),
            vec![Bar::new(date!(2024 - 01 - 02), 0.0, 0.0, 0.0, 0.0, 0)],
        );
        let captions = ChartCaptions {
            title: "AAPL".into(),
            price_axis: "Price in USD".into(),
        };
        candlestick_layout(&series, captions).expect("nonempty series")
    }

    #[test]
    fn flat_series_still_gets_a_nonzero_price_span() {
        let layout = flat_layout();
        let (min, max) = price_span(&layout);
        assert!(max - min >= 2.0);
    }

    #[test]
    fn x_span_leaves_a_margin_bar_on_each_side() {
        let layout = flat_layout();
        assert_eq!(x_span(&layout), (-1.0, 1.0));
    }

    #[test]
    fn unlabeled_positions_format_as_empty() {
        let layout = flat_layout();
        assert_eq!(label_for(&layout, &0.0), "2024-01-02");
        assert_eq!(label_for(&layout, &-1.0), "");
        assert_eq!(label_for(&layout, &7.0), "");
    }

    #[test]
    fn doji_body_colors_green() {
        let layout = flat_layout();
        let ChartContent::Candles { candles } = &layout.content else {
            panic!("candlestick layout carries candles");
        };
        assert_eq!(body_color(&candles[0]), GREEN);
    }
}
