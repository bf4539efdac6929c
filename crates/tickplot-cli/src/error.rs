use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickplot_core::ValidationError),

    #[error(transparent)]
    Chart(#[from] tickplot_core::ChartError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Chart(tickplot_core::ChartError::InvalidPeriod { .. }) => 2,
            Self::Chart(_) => 3,
            Self::Io(_) => 10,
        }
    }
}
