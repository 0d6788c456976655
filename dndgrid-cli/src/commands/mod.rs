//! Command handler modules for the CLI.

mod analyze;
mod completions;
mod drop;
mod layout;
mod quadrant;
mod validate;

use dndgrid_core::config::GridSettings;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(settings: &GridSettings, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Layout {
            file,
            width,
            height,
            format,
        } => layout::cmd_layout(&file, width, height, format),
        Commands::Validate { file, strict } => validate::cmd_validate(settings, &file, strict),
        Commands::Analyze { file, format } => analyze::cmd_analyze(settings, &file, format),
        Commands::Drop {
            file,
            dragged,
            hovered,
            quadrant,
            output,
        } => drop::cmd_drop(
            settings,
            drop::DropParams {
                file: &file,
                dragged,
                hovered,
                quadrant: quadrant.into(),
                output: output.as_deref(),
            },
        ),
        Commands::Quadrant { rect, point } => quadrant::cmd_quadrant(&rect, point),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
