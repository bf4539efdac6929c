//! Renderer seam and artifact bookkeeping.
//!
//! The drawing backend lives in its own crate behind [`ChartRenderer`]; this
//! module only decides where artifacts go and how long to wait for them to
//! appear on disk.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::{ChartLayout, ValidationError};

/// The three chart variants the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    PriceLine,
    Candlestick,
    CandlestickVolume,
}

impl ChartKind {
    /// File-name stem for artifacts of this kind.
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            Self::PriceLine => "price_graph",
            Self::Candlestick => "candle_chart",
            Self::CandlestickVolume => "candle_volume",
        }
    }
}

impl FromStr for ChartKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::PriceLine),
            "candle" => Ok(Self::Candlestick),
            "candle-volume" => Ok(Self::CandlestickVolume),
            _ => Err(ValidationError::InvalidChartKind {
                value: value.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing backend error: {0}")]
    Backend(String),
    #[error("cannot create artifact directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Drawing backend seam. Implementations rasterize a finished layout to the
/// given path; they never re-derive geometry.
pub trait ChartRenderer: Send + Sync {
    fn draw(&self, layout: &ChartLayout, kind: ChartKind, path: &Path) -> Result<(), RenderError>;
}

/// Unique artifact path under `dir`, so concurrent requests never race on a
/// shared file name.
pub fn artifact_path(dir: &Path, kind: ChartKind) -> PathBuf {
    let name = format!(
        "{}_{}.png",
        kind.artifact_stem(),
        Uuid::new_v4().simple()
    );
    dir.join(name)
}

/// How many times to poll for the artifact before giving up.
pub const ARTIFACT_POLL_ATTEMPTS: u32 = 10;
/// Delay between artifact polls.
pub const ARTIFACT_POLL_DELAY: Duration = Duration::from_millis(200);

/// Poll until `path` exists. Returns false after the attempt budget runs out,
/// which callers surface as a distinct timeout failure.
pub async fn wait_for_artifact(path: &Path) -> bool {
    for _ in 0..ARTIFACT_POLL_ATTEMPTS {
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            return true;
        }
        tokio::time::sleep(ARTIFACT_POLL_DELAY).await;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_kind_parses_the_three_variants() {
        assert_eq!("line".parse::<ChartKind>().expect("parses"), ChartKind::PriceLine);
        assert_eq!(
            "Candle".parse::<ChartKind>().expect("parses"),
            ChartKind::Candlestick
        );
        assert_eq!(
            "candle-volume".parse::<ChartKind>().expect("parses"),
            ChartKind::CandlestickVolume
        );
        assert!("pie".parse::<ChartKind>().is_err());
    }

    #[test]
    fn artifact_paths_are_unique_per_call() {
        let dir = Path::new("images");
        let first = artifact_path(dir, ChartKind::Candlestick);
        let second = artifact_path(dir, ChartKind::Candlestick);
        assert_ne!(first, second);
        let name = first.file_name().expect("has file name").to_string_lossy();
        assert!(name.starts_with("candle_chart_"));
        assert!(name.ends_with(".png"));
    }

    #[tokio::test]
    async fn existing_artifact_is_found_immediately() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("candle_chart_test.png");
        std::fs::write(&path, b"png").expect("write artifact");
        assert!(wait_for_artifact(&path).await);
    }
}
