//! Layout document validation
//!
//! Unlike building a tree, which stops at the first construction error,
//! validation walks the whole document and reports every problem it finds,
//! plus warnings for layouts that build but are likely to be awkward.

use serde::Serialize;

use super::analyzer::{LayoutMetadata, PerformanceRating};
use crate::config::AnalysisSettings;
use crate::document::LayoutDocument;
use crate::grid::{LayoutDescription, MAX_BINARY_LEVELS};

/// Category of a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// The tree shape is wrong (missing child, empty name)
    Structure,
    /// A value is out of range
    Constraint,
}

/// A problem that prevents the layout from being built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Category of the problem
    pub kind: IssueKind,
    /// Path of the offending node, e.g. `child.secondary.primary`
    pub location: String,
    /// Description of the problem
    pub message: String,
    /// Suggested replacement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

/// A layout that builds but is likely to be awkward
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    /// Path of the node the warning is about
    pub location: String,
    /// Description of the concern
    pub message: String,
    /// What to do about it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Outcome of validating a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that prevent building
    pub errors: Vec<ValidationIssue>,
    /// Concerns that do not prevent building
    pub warnings: Vec<ValidationWarning>,
    /// General advice
    pub suggestions: Vec<String>,
}

impl ValidationReport {
    /// Returns true if there are no errors
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, kind: IssueKind, location: &str, message: String, fix: Option<&str>) {
        self.errors.push(ValidationIssue {
            kind,
            location: location.to_string(),
            message,
            fix: fix.map(str::to_string),
        });
    }

    fn warn(&mut self, location: &str, message: String, suggestion: Option<String>) {
        self.warnings.push(ValidationWarning {
            location: location.to_string(),
            message,
            suggestion,
        });
    }
}

/// Checks layout documents against structural rules and thresholds
#[derive(Debug, Clone, Default)]
pub struct Validator {
    settings: AnalysisSettings,
    strict: bool,
}

impl Validator {
    /// Creates a validator with the given thresholds
    #[must_use]
    pub const fn new(settings: AnalysisSettings) -> Self {
        Self {
            settings,
            strict: false,
        }
    }

    /// Enables the item count and depth limits
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validates a document
    #[must_use]
    pub fn validate(&self, document: &LayoutDocument) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.check_container(document, &mut report);
        self.check_node(&document.child, "child", 1, &mut report);
        self.check_buildable_depth(&document.child, &mut report);
        if self.strict {
            self.check_performance(&document.child, &mut report);
        }
        report
    }

    fn check_container(&self, document: &LayoutDocument, report: &mut ValidationReport) {
        let (width, height) = (document.width, document.height);
        if !(width.is_finite() && width > 0.0) {
            report.error(
                IssueKind::Constraint,
                "width",
                format!("Invalid container width: {width}. Must be positive."),
                Some("width: 1200"),
            );
        }
        if !(height.is_finite() && height > 0.0) {
            report.error(
                IssueKind::Constraint,
                "height",
                format!("Invalid container height: {height}. Must be positive."),
                Some("height: 800"),
            );
        }
        let min = self.settings.min_container_size;
        if width < min || height < min {
            report.warn(
                "container",
                format!(
                    "Very small container dimensions ({width}x{height}). Consider larger sizes."
                ),
                Some(format!("Minimum recommended: {min}x{min}")),
            );
        }
    }

    fn check_node(
        &self,
        node: &LayoutDescription<String>,
        location: &str,
        depth: usize,
        report: &mut ValidationReport,
    ) {
        match node {
            LayoutDescription::Item { payload, .. } => check_item(payload, location, report),
            LayoutDescription::Split {
                ratio,
                primary,
                secondary,
                ..
            } => {
                self.check_split(*ratio, location, depth, report);
                for (child, side) in [(primary, "primary"), (secondary, "secondary")] {
                    let child_location = format!("{location}.{side}");
                    match child {
                        Some(child) => self.check_node(child, &child_location, depth + 1, report),
                        None => report.error(
                            IssueKind::Structure,
                            &child_location,
                            "Split must have exactly 2 children (primary and secondary)."
                                .to_string(),
                            None,
                        ),
                    }
                }
            }
        }
    }

    fn check_split(&self, ratio: f64, location: &str, depth: usize, report: &mut ValidationReport) {
        if !(ratio > 0.0 && ratio < 1.0) {
            report.error(
                IssueKind::Constraint,
                location,
                format!("Invalid split ratio: {ratio}. Must be between 0 and 1 (exclusive)."),
                Some("ratio: 0.5"),
            );
        } else if ratio < self.settings.min_comfortable_ratio
            || ratio > self.settings.max_comfortable_ratio
        {
            report.warn(
                location,
                format!("Extreme split ratio: {ratio}. This creates very small panels."),
                Some(format!(
                    "Consider ratios between {} and {} for better UX",
                    self.settings.min_comfortable_ratio, self.settings.max_comfortable_ratio
                )),
            );
        }
        if depth > self.settings.nesting_warn_depth {
            report.warn(
                location,
                format!("Deep nesting detected (depth: {depth}). This may impact performance."),
                Some("Consider flattening the layout structure".to_string()),
            );
        }
    }

    fn check_buildable_depth(
        &self,
        root: &LayoutDescription<String>,
        report: &mut ValidationReport,
    ) {
        let levels = LayoutMetadata::of(root, &self.settings).max_depth;
        if levels > MAX_BINARY_LEVELS {
            report.error(
                IssueKind::Structure,
                "child",
                format!("Tree too deep to build: {levels} levels. Maximum: {MAX_BINARY_LEVELS}"),
                None,
            );
        }
    }

    fn check_performance(&self, root: &LayoutDescription<String>, report: &mut ValidationReport) {
        let metadata = LayoutMetadata::of(root, &self.settings);
        let settings = &self.settings;

        if metadata.item_count > settings.item_error_count {
            report.error(
                IssueKind::Constraint,
                "child",
                format!(
                    "Too many items: {}. Maximum recommended: {}",
                    metadata.item_count, settings.item_error_count
                ),
                None,
            );
        } else if metadata.item_count > settings.item_warn_count {
            report.warn(
                "child",
                format!(
                    "High item count: {}. Consider reducing for better performance.",
                    metadata.item_count
                ),
                Some(format!("Recommended: < {} items", settings.item_warn_count)),
            );
        }

        if metadata.max_depth > settings.depth_error {
            report.error(
                IssueKind::Constraint,
                "child",
                format!(
                    "Tree too deep: {} levels. Maximum recommended: {}",
                    metadata.max_depth, settings.depth_error
                ),
                None,
            );
        } else if metadata.max_depth > settings.depth_warn {
            report.warn(
                "child",
                format!("Deep tree structure: {} levels.", metadata.max_depth),
                Some(format!(
                    "Recommended: < {} levels for optimal performance",
                    settings.depth_warn
                )),
            );
        }

        if matches!(
            metadata.estimated_performance,
            PerformanceRating::Fair | PerformanceRating::Poor
        ) {
            report.suggestions.push(format!(
                "Performance score: {}. Consider simplifying the layout.",
                metadata.estimated_performance
            ));
        }
        if metadata.split_count > metadata.item_count {
            report.suggestions.push(
                "More splits than items detected. Some splits may be unnecessary.".to_string(),
            );
        }
    }
}

fn check_item(name: &str, location: &str, report: &mut ValidationReport) {
    if name.trim().is_empty() {
        report.error(
            IssueKind::Structure,
            location,
            "Item must have a component name.".to_string(),
            Some("component: ComponentName"),
        );
        return;
    }
    let mut chars = name.chars();
    if let Some(first) = chars.next()
        && !first.is_ascii_uppercase()
    {
        let capitalized: String = first.to_uppercase().chain(chars).collect();
        report.warn(
            location,
            format!("Component name \"{name}\" should start with uppercase letter."),
            Some(format!("Use \"{capitalized}\"")),
        );
    }
}
