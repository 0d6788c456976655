//! Drop quadrant hit-test command.

use dndgrid_core::grid::{Rect, quadrant_at};

use crate::error::CliError;

/// Quadrant command handler
pub fn cmd_quadrant(rect: &Rect, (x, y): (f64, f64)) -> Result<(), CliError> {
    let quadrant = quadrant_at(rect, x, y)
        .ok_or_else(|| CliError::InvalidArgument(format!("rectangle {rect} has no area")))?;
    println!("{quadrant}");
    Ok(())
}
