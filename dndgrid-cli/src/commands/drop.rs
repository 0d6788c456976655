//! Drop restructuring command.

use std::path::Path;

use dndgrid_core::config::GridSettings;
use dndgrid_core::grid::{DropQuadrant, NodeId};

use crate::error::CliError;
use crate::format::{format_ids, format_leaf_table, leaf_rows};
use crate::util::load_document;

/// Parameters for the drop command
pub struct DropParams<'a> {
    pub file: &'a Path,
    pub dragged: NodeId,
    pub hovered: NodeId,
    pub quadrant: DropQuadrant,
    pub output: Option<&'a Path>,
}

/// Drop command handler
pub fn cmd_drop(settings: &GridSettings, params: DropParams<'_>) -> Result<(), CliError> {
    let document = load_document(params.file)?;
    let applied =
        document.apply_drop(&settings.drag, params.dragged, params.hovered, params.quadrant)?;

    println!("Affected: {}", format_ids(&applied.affected));
    println!("Removed:  {}", format_ids(&applied.removed));
    println!();
    println!("{}", format_leaf_table(&leaf_rows(&applied.tree)));

    if let Some(output) = params.output {
        applied.document.save(output)?;
        println!();
        println!("Saved to {}", output.display());
    }
    Ok(())
}
