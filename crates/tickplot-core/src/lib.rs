//! # Tickplot Core
//!
//! Domain models, Yahoo Finance parsing, and the chart layout engine for the
//! tickplot toolkit.
//!
//! ## Overview
//!
//! The crate covers the whole pipeline except rasterization:
//!
//! - **Domain types** for symbols, daily bars, quote metrics, and period
//!   strings
//! - **Yahoo Finance source** building the download and options URLs over a
//!   pluggable HTTP transport
//! - **Defensive parsers** that reduce every upstream failure to sentinel
//!   values instead of errors
//! - **Layout engine** turning a bar series into backend-agnostic chart
//!   geometry
//! - **Chart service** sequencing fetch, parse, layout, and draw
//!
//! Drawing itself lives behind the [`render::ChartRenderer`] trait so the
//! backend crate stays swappable and tests run without a raster target.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Symbols, bars, durations, quote metrics |
//! | [`error`] | Input validation errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`layout`] | Tick thinning and chart geometry |
//! | [`parse`] | CSV bar and quote JSON parsers |
//! | [`render`] | Renderer trait and artifact bookkeeping |
//! | [`service`] | End-to-end chart pipeline |
//! | [`source`] | Yahoo Finance endpoints and fetch plumbing |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickplot_core::http_client::ReqwestClient;
//! use tickplot_core::layout::PriceMode;
//! use tickplot_core::render::ChartKind;
//! use tickplot_core::service::{ChartRequest, ChartService};
//! use tickplot_core::source::YahooSource;
//! use tickplot_core::Symbol;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = YahooSource::new(Arc::new(ReqwestClient::new()));
//!     let service = ChartService::new(source, renderer, "images".into());
//!
//!     let outcome = service
//!         .render_chart(ChartRequest {
//!             symbol: Symbol::parse("AAPL")?,
//!             period: "3mo".into(),
//!             kind: ChartKind::Candlestick,
//!             mode: PriceMode::Close,
//!         })
//!         .await?;
//!     println!("chart written to {}", outcome.artifact.display());
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod error;
pub mod http_client;
pub mod layout;
pub mod parse;
pub mod render;
pub mod service;
pub mod source;

pub use domain::{
    resolve_duration, Bar, BarSeries, DurationSpec, DurationUnit, Metrics, Symbol, ABSENT_TEXT,
    MAX_READABLE_SECONDS, MIN_CHART_SECONDS, SECONDS_PER_DAY, SECONDS_PER_MONTH, SECONDS_PER_WEEK,
    SECONDS_PER_YEAR,
};
pub use error::ValidationError;
pub use layout::{ChartLayout, PriceMode, TickPlan};
pub use parse::{parse_bar_series, parse_metrics, EMPTY_OPTION_CHAIN, NOT_FOUND_MARKER};
pub use render::{ChartKind, ChartRenderer, RenderError};
pub use service::{ChartError, ChartOutcome, ChartRequest, ChartService};
pub use source::YahooSource;
