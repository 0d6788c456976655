//! Layout analysis and validation
//!
//! [`LayoutMetadata`] summarizes how large and deep a layout is and rates
//! its expected rendering cost. [`Validator`] checks a [`LayoutDocument`]
//! against the construction rules and the configured thresholds, collecting
//! every problem instead of stopping at the first one.
//!
//! [`LayoutDocument`]: crate::document::LayoutDocument

mod analyzer;
mod validator;

pub use analyzer::{LayoutMetadata, PerformanceRating};
pub use validator::{IssueKind, ValidationIssue, ValidationReport, ValidationWarning, Validator};
