//! Layout validation command.

use std::path::Path;

use dndgrid_core::analysis::{ValidationReport, Validator};
use dndgrid_core::config::GridSettings;

use crate::error::CliError;
use crate::util::load_document;

/// Validate command handler
///
/// Prints the full report, then fails with an invalid-layout error if the
/// report has errors.
pub fn cmd_validate(settings: &GridSettings, file: &Path, strict: bool) -> Result<(), CliError> {
    let document = load_document(file)?;
    let report = Validator::new(settings.analysis.clone())
        .strict(strict)
        .validate(&document);

    print_report(&report);

    if report.is_valid() {
        println!("Layout is valid.");
        Ok(())
    } else {
        Err(CliError::InvalidLayout(format!(
            "{} error(s) in {}",
            report.errors.len(),
            file.display()
        )))
    }
}

fn print_report(report: &ValidationReport) {
    for issue in &report.errors {
        println!("error[{}]: {}", issue.location, issue.message);
        if let Some(fix) = &issue.fix {
            println!("  fix: {fix}");
        }
    }
    for warning in &report.warnings {
        println!("warning[{}]: {}", warning.location, warning.message);
        if let Some(suggestion) = &warning.suggestion {
            println!("  suggestion: {suggestion}");
        }
    }
    for suggestion in &report.suggestions {
        println!("note: {suggestion}");
    }
}
