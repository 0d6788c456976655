//! Configuration management for `DndGrid`
//!
//! This module provides the `ConfigManager` for loading and saving
//! settings files in TOML format.

mod manager;
pub mod settings;

pub use manager::{ConfigManager, SETTINGS_FILE};
pub use settings::{AnalysisSettings, DragSettings, GridSettings, LoggingSettings};
