//! CLI error types and exit codes.

use dndgrid_core::document::DocumentError;
use dndgrid_core::error::{ConfigError, DndGridError};
use dndgrid_core::grid::GridError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, file access, or argument errors
    pub const GENERAL_ERROR: i32 = 1;
    /// The layout is invalid or the requested drop was rejected
    pub const INVALID_LAYOUT: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Layout document could not be read or written
    #[error("Document error: {0}")]
    Document(String),

    /// Layout failed to build or validate
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Drop request was rejected
    #[error("Drop rejected: {0}")]
    Rejected(String),

    /// Argument value is unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output could not be produced
    #[error("Output error: {0}")]
    Output(String),
}

impl From<GridError> for CliError {
    fn from(err: GridError) -> Self {
        if err.is_construction_error() {
            Self::InvalidLayout(err.to_string())
        } else {
            Self::Rejected(err.to_string())
        }
    }
}

impl From<DocumentError> for CliError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::InvalidLayout(e) => e.into(),
            other => Self::Document(other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<DndGridError> for CliError {
    fn from(err: DndGridError) -> Self {
        match err {
            DndGridError::Grid(e) => e.into(),
            DndGridError::Document(e) => e.into(),
            DndGridError::Config(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, document access, arguments, output)
    /// - 2: Invalid layout or rejected drop
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidLayout(_) | Self::Rejected(_) => exit_codes::INVALID_LAYOUT,
            Self::Config(_) | Self::Document(_) | Self::InvalidArgument(_) | Self::Output(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
