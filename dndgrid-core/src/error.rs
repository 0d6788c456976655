//! Error types for `DndGrid`
//!
//! Each concern has its own error enum; [`DndGridError`] aggregates them for
//! operations that span several concerns, such as
//! [`LayoutDocument::apply_drop`](crate::document::LayoutDocument::apply_drop).

use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;
use crate::grid::GridError;

/// Errors from loading, saving or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the settings file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for `GridSettings`
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// A setting has an out-of-range value
    #[error("Invalid value for {field}: {reason}")]
    Validation {
        /// Dotted path of the offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// The config directory could not be determined
    #[error("Config directory not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level error for `DndGrid` operations
#[derive(Debug, Error)]
pub enum DndGridError {
    /// Layout tree error
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Layout document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for `DndGrid` operations
pub type Result<T> = std::result::Result<T, DndGridError>;
