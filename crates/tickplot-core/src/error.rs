use thiserror::Error;

/// Input validation errors surfaced before any fetch happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid price mode '{value}', expected one of open, close, both")]
    InvalidPriceMode { value: String },
    #[error("invalid chart kind '{value}', expected one of line, candle, candle-volume")]
    InvalidChartKind { value: String },
}
