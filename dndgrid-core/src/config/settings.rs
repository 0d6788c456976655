//! User settings for the layout grid
//!
//! All sections are optional in the settings file; missing fields fall back
//! to their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::grid::{MoveThrottle, Ratio};

/// Top-level settings stored in `settings.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Drag gesture settings
    #[serde(default)]
    pub drag: DragSettings,
    /// Layout analysis thresholds
    #[serde(default)]
    pub analysis: AnalysisSettings,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl GridSettings {
    /// Checks every section for out-of-range values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first invalid field
    pub fn validate(&self) -> ConfigResult<()> {
        self.drag.split_ratio()?;
        self.analysis.validate()
    }
}

/// Drag gesture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// Minimum milliseconds between processed pointer moves
    pub move_throttle_ms: u64,
    /// Ratio given to a split created by a drop
    pub new_split_ratio: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            move_throttle_ms: 16,
            new_split_ratio: 0.5,
        }
    }
}

impl DragSettings {
    /// Pointer-move throttle with the configured interval
    #[must_use]
    pub const fn throttle(&self) -> MoveThrottle {
        MoveThrottle::new(Duration::from_millis(self.move_throttle_ms))
    }

    /// Validated ratio for splits created by a drop
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the ratio is not strictly between 0 and 1
    pub fn split_ratio(&self) -> ConfigResult<Ratio> {
        Ratio::new(self.new_split_ratio).map_err(|e| ConfigError::Validation {
            field: "drag.new_split_ratio".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Thresholds used by layout analysis and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Ratios below this are reported as extreme
    pub min_comfortable_ratio: f64,
    /// Ratios above this are reported as extreme
    pub max_comfortable_ratio: f64,
    /// Splits nested deeper than this are reported
    pub nesting_warn_depth: usize,
    /// Containers narrower or shorter than this are reported
    pub min_container_size: f64,
    /// Strict mode: warn above this many items
    pub item_warn_count: usize,
    /// Strict mode: fail above this many items
    pub item_error_count: usize,
    /// Strict mode: warn above this depth
    pub depth_warn: usize,
    /// Strict mode: fail above this depth
    pub depth_error: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_comfortable_ratio: 0.1,
            max_comfortable_ratio: 0.9,
            nesting_warn_depth: 5,
            min_container_size: 100.0,
            item_warn_count: 20,
            item_error_count: 50,
            depth_warn: 4,
            depth_error: 6,
        }
    }
}

impl AnalysisSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.min_comfortable_ratio > self.max_comfortable_ratio {
            return Err(ConfigError::Validation {
                field: "analysis.min_comfortable_ratio".to_string(),
                reason: "must not exceed analysis.max_comfortable_ratio".to_string(),
            });
        }
        if self.item_warn_count > self.item_error_count {
            return Err(ConfigError::Validation {
                field: "analysis.item_warn_count".to_string(),
                reason: "must not exceed analysis.item_error_count".to_string(),
            });
        }
        if self.depth_warn > self.depth_error {
            return Err(ConfigError::Validation {
                field: "analysis.depth_warn".to_string(),
                reason: "must not exceed analysis.depth_error".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level (`error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
    /// Full `EnvFilter` directive overriding `level`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            filter: None,
        }
    }
}
