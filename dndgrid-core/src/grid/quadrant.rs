//! Drop-quadrant hit testing
//!
//! A target rectangle is divided by its two diagonals into four triangles.
//! The pointer's quadrant is found by comparing its y coordinate with the
//! ordinates of both diagonals at the pointer's x coordinate:
//!
//! ```text
//!   +-----------+
//!   |\   top   /|
//!   | \       / |
//!   |  \     /  |
//!   |left  X right
//!   |  /     \  |
//!   | /       \ |
//!   |/ bottom  \|
//!   +-----------+
//! ```

use super::types::{DropQuadrant, Rect};

/// Rounds to the nearest whole unit, halves toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Returns the quadrant of `rect` the point `(x, y)` falls in.
///
/// Diagonal ordinates are rounded to whole units before comparison, so
/// points on or within half a unit of a diagonal resolve in the order
/// top, left, right, bottom. Returns `None` for a rectangle with no area.
#[must_use]
pub fn quadrant_at(rect: &Rect, x: f64, y: f64) -> Option<DropQuadrant> {
    let has_area = rect.width.is_finite()
        && rect.height.is_finite()
        && rect.width > 0.0
        && rect.height > 0.0;
    if !has_area {
        return None;
    }
    let slope = rect.height / rect.width;
    let incline = round_half_up((rect.left - x) * slope + rect.top + rect.height);
    let decline = round_half_up((x - rect.left) * slope + rect.top);

    let quadrant = if y <= incline && y <= decline {
        DropQuadrant::Top
    } else if y <= incline && y >= decline {
        DropQuadrant::Left
    } else if y >= incline && y <= decline {
        DropQuadrant::Right
    } else {
        DropQuadrant::Bottom
    };
    Some(quadrant)
}
