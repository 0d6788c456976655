//! Layout geometry command.

use std::path::Path;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::{format_leaf_table, leaf_rows};
use crate::util::load_document;

/// Layout command handler
pub fn cmd_layout(
    file: &Path,
    width: Option<f64>,
    height: Option<f64>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let document = load_document(file)?;
    let tree = document.build_tree_with_size(
        width.unwrap_or(document.width),
        height.unwrap_or(document.height),
    )?;
    tracing::debug!(nodes = tree.node_count(), "Built layout");

    let rows = leaf_rows(&tree);
    match format {
        OutputFormat::Table => println!("{}", format_leaf_table(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}
