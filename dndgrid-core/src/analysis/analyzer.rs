//! Layout complexity metrics

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisSettings;
use crate::grid::LayoutDescription;

/// Items at or below this count (with shallow depth) rate as excellent
const EXCELLENT_MAX_ITEMS: usize = 10;
/// Depth at or below this (with few items) rates as excellent
const EXCELLENT_MAX_DEPTH: usize = 3;

/// Estimated rendering cost of a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceRating {
    /// Small and shallow
    Excellent,
    /// Within the warning limits
    Good,
    /// Within the hard limits
    Fair,
    /// Beyond the hard limits
    Poor,
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

/// Structural statistics of a layout description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    /// Number of splits
    pub split_count: usize,
    /// Number of items
    pub item_count: usize,
    /// Deepest level, the root node being level 1
    pub max_depth: usize,
    /// Rating derived from item count and depth
    pub estimated_performance: PerformanceRating,
}

impl LayoutMetadata {
    /// Computes metadata for a description
    ///
    /// Missing split children are skipped.
    #[must_use]
    pub fn of<T>(root: &LayoutDescription<T>, settings: &AnalysisSettings) -> Self {
        let mut split_count = 0;
        let mut item_count = 0;
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            match node {
                LayoutDescription::Item { .. } => item_count += 1,
                LayoutDescription::Split {
                    primary, secondary, ..
                } => {
                    split_count += 1;
                    stack.extend(
                        [primary, secondary]
                            .into_iter()
                            .flatten()
                            .map(|child| (child.as_ref(), depth + 1)),
                    );
                }
            }
        }

        Self {
            split_count,
            item_count,
            max_depth,
            estimated_performance: rate(item_count, max_depth, settings),
        }
    }
}

fn rate(items: usize, depth: usize, settings: &AnalysisSettings) -> PerformanceRating {
    if items <= EXCELLENT_MAX_ITEMS && depth <= EXCELLENT_MAX_DEPTH {
        PerformanceRating::Excellent
    } else if items <= settings.item_warn_count && depth <= settings.depth_warn {
        PerformanceRating::Good
    } else if items <= settings.item_error_count && depth <= settings.depth_error {
        PerformanceRating::Fair
    } else {
        PerformanceRating::Poor
    }
}
