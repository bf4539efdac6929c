//! End-to-end chart pipeline.
//!
//! One entry point per user-facing operation: render a chart artifact, or
//! look up quote metrics. Fetch, parse, layout, and draw are each delegated
//! to their own module; this file only sequences them and translates sentinel
//! states into typed errors.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::layout::{
    candle_volume_layout, candlestick_layout, price_line_layout, ChartCaptions, ChartLayout,
    PriceMode,
};
use crate::render::{artifact_path, wait_for_artifact, ChartKind, ChartRenderer, RenderError};
use crate::source::{TimeWindow, YahooSource};
use crate::{
    parse_bar_series, parse_metrics, resolve_duration, Metrics, Symbol, MAX_READABLE_SECONDS,
    MIN_CHART_SECONDS,
};

/// One chart render request.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub symbol: Symbol,
    /// Raw period string as the user typed it.
    pub period: String,
    pub kind: ChartKind,
    /// Only consulted for [`ChartKind::PriceLine`].
    pub mode: PriceMode,
}

/// A finished chart: where the artifact landed plus any user-facing notes
/// about how the request was adjusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOutcome {
    pub artifact: PathBuf,
    pub notes: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("cannot parse time period '{period}'")]
    InvalidPeriod { period: String },
    #[error("no data for symbol {symbol}, it may be invalid or delisted")]
    NoData { symbol: Symbol },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("chart for {symbol} was drawn but never appeared on disk")]
    ArtifactTimeout { symbol: Symbol },
}

/// Pipeline facade wiring a data source to a drawing backend.
pub struct ChartService {
    source: YahooSource,
    renderer: Arc<dyn ChartRenderer>,
    artifact_dir: PathBuf,
}

impl ChartService {
    pub fn new(source: YahooSource, renderer: Arc<dyn ChartRenderer>, artifact_dir: PathBuf) -> Self {
        Self {
            source,
            renderer,
            artifact_dir,
        }
    }

    /// Render one chart and return the artifact path.
    ///
    /// Rejects unparsable periods before any network traffic. Too-short
    /// periods are floored to three days and too-long ones proceed with a
    /// readability note, both reported in the outcome.
    pub async fn render_chart(&self, request: ChartRequest) -> Result<ChartOutcome, ChartError> {
        let mut notes = Vec::new();

        let requested = resolve_duration(&request.period);
        if requested == 0 {
            return Err(ChartError::InvalidPeriod {
                period: request.period.clone(),
            });
        }
        let seconds = if requested < MIN_CHART_SECONDS {
            notes.push(String::from(
                "Note: minimum chartable period is 3 days, showing 3 days instead.",
            ));
            MIN_CHART_SECONDS
        } else {
            requested
        };
        if seconds > MAX_READABLE_SECONDS {
            notes.push(String::from(
                "Note: periods beyond a year can make the date axis hard to read.",
            ));
        }

        let window = TimeWindow::ending_now(seconds);
        let raw_csv = self.source.fetch_bars_csv(&request.symbol, window).await;
        let series = parse_bar_series(&raw_csv, &request.symbol, &request.period);
        if series.is_empty() {
            return Err(ChartError::NoData {
                symbol: request.symbol.clone(),
            });
        }

        let metrics = self.metrics(&request.symbol).await;
        let captions = ChartCaptions::from_metrics(&metrics, &series);
        let layout = match request.kind {
            ChartKind::PriceLine => price_line_layout(&series, captions, request.mode),
            ChartKind::Candlestick => candlestick_layout(&series, captions),
            ChartKind::CandlestickVolume => candle_volume_layout(&series, captions),
        };
        let Some(layout) = layout else {
            return Err(ChartError::NoData {
                symbol: request.symbol.clone(),
            });
        };

        let artifact = artifact_path(&self.artifact_dir, request.kind);
        self.draw_blocking(layout, request.kind, artifact.clone()).await?;

        if !wait_for_artifact(&artifact).await {
            return Err(ChartError::ArtifactTimeout {
                symbol: request.symbol.clone(),
            });
        }

        log::info!(
            "rendered {} for {} at {}",
            request.kind.artifact_stem(),
            request.symbol,
            artifact.display()
        );
        Ok(ChartOutcome { artifact, notes })
    }

    /// Latest quote metrics; the absent sentinel when the lookup fails.
    pub async fn metrics(&self, symbol: &Symbol) -> Metrics {
        let raw = self.source.fetch_quote_json(symbol).await;
        parse_metrics(&raw)
    }

    /// Rasterization is synchronous file I/O, so it runs off the async
    /// executor.
    async fn draw_blocking(
        &self,
        layout: ChartLayout,
        kind: ChartKind,
        path: PathBuf,
    ) -> Result<(), RenderError> {
        let renderer = Arc::clone(&self.renderer);
        tokio::task::spawn_blocking(move || renderer.draw(&layout, kind, &path))
            .await
            .map_err(|join| RenderError::Backend(format!("drawing task panicked: {join}")))?
    }
}
