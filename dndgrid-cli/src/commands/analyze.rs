//! Layout metadata command.

use std::path::Path;

use dndgrid_core::analysis::LayoutMetadata;
use dndgrid_core::config::GridSettings;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::load_document;

/// Analyze command handler
pub fn cmd_analyze(
    settings: &GridSettings,
    file: &Path,
    format: OutputFormat,
) -> Result<(), CliError> {
    let document = load_document(file)?;
    let metadata = LayoutMetadata::of(&document.child, &settings.analysis);

    match format {
        OutputFormat::Table => {
            if let Some(name) = &document.name {
                println!("Layout:      {name}");
            }
            println!("Container:   {}x{}", document.width, document.height);
            println!("Splits:      {}", metadata.split_count);
            println!("Items:       {}", metadata.item_count);
            println!("Max depth:   {}", metadata.max_depth);
            println!("Performance: {}", metadata.estimated_performance);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&metadata)?),
    }
    Ok(())
}
