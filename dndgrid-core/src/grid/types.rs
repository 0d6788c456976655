//! Core type definitions for the layout grid
//!
//! This module contains the identifier, direction, quadrant and geometry
//! types used throughout the grid system.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::GridError;

/// Unique identifier for a node within a layout tree.
///
/// Identifiers are positive integers that stay attached to a node for its
/// whole lifetime, even as the tree structure changes. `0` is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct NodeId(u64);

impl NodeId {
    /// Identifier of the root of a freshly parsed construction tree.
    pub const ROOT: Self = Self(1);

    /// Creates a node ID, rejecting 0.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ZeroId` if `raw` is 0.
    pub const fn new(raw: u64) -> Result<Self, GridError> {
        if raw == 0 {
            return Err(GridError::ZeroId);
        }
        Ok(Self(raw))
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the next ID, or an error on overflow.
    ///
    /// # Errors
    ///
    /// Returns `GridError::IdOverflow` if `self` is `u64::MAX`.
    pub const fn checked_next(self) -> Result<Self, GridError> {
        match self.0.checked_add(1) {
            Some(next) => Ok(Self(next)),
            None => Err(GridError::IdOverflow),
        }
    }

    /// Binary-index ID of the primary child of this node (`id * 2`).
    pub(crate) const fn primary_child(self) -> Result<Self, GridError> {
        match self.0.checked_mul(2) {
            Some(raw) => Ok(Self(raw)),
            None => Err(GridError::IdOverflow),
        }
    }

    /// Binary-index ID of the secondary child of this node (`id * 2 + 1`).
    pub(crate) const fn secondary_child(self) -> Result<Self, GridError> {
        match self.0.checked_mul(2) {
            Some(raw) => match raw.checked_add(1) {
                Some(raw) => Ok(Self(raw)),
                None => Err(GridError::IdOverflow),
            },
            None => Err(GridError::IdOverflow),
        }
    }
}

impl TryFrom<u64> for NodeId {
    type Error = GridError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<NodeId> for u64 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Split direction for dividing a region.
///
/// A horizontal split stacks its children top/bottom, a vertical split
/// places them left/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children stacked top (primary) and bottom (secondary).
    Horizontal,
    /// Children placed left (primary) and right (secondary).
    Vertical,
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

/// Quadrant of a hovered leaf where a dragged leaf was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropQuadrant {
    /// Upper triangle of the target rectangle.
    Top,
    /// Left triangle of the target rectangle.
    Left,
    /// Right triangle of the target rectangle.
    Right,
    /// Lower triangle of the target rectangle.
    Bottom,
}

impl DropQuadrant {
    /// All quadrants, in hit-test order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Left, Self::Right, Self::Bottom];

    /// Direction of the split a drop into this quadrant produces.
    ///
    /// Top and bottom stack vertically (horizontal split); left and right
    /// sit side by side (vertical split).
    #[must_use]
    pub const fn split_direction(self) -> SplitDirection {
        match self {
            Self::Top | Self::Bottom => SplitDirection::Horizontal,
            Self::Left | Self::Right => SplitDirection::Vertical,
        }
    }

    /// Role the dragged node takes in the resulting split.
    ///
    /// Top and left put the dragged node first; bottom and right put the
    /// hovered node first.
    #[must_use]
    pub const fn dragged_role(self) -> ChildRole {
        match self {
            Self::Top | Self::Left => ChildRole::Primary,
            Self::Right | Self::Bottom => ChildRole::Secondary,
        }
    }
}

impl fmt::Display for DropQuadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

impl std::str::FromStr for DropQuadrant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            other => Err(format!("unknown quadrant `{other}`")),
        }
    }
}

/// Position of a child within its parent split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildRole {
    /// First child (top or left).
    Primary,
    /// Second child (bottom or right).
    Secondary,
}

impl ChildRole {
    /// Returns the opposite role.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

/// Absolute rectangle of a node inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Width in container units.
    pub width: f64,
    /// Height in container units.
    pub height: f64,
    /// Distance from the container's top edge.
    pub top: f64,
    /// Distance from the container's left edge.
    pub left: f64,
}

impl Rect {
    /// Creates a rectangle anchored at the container origin.
    #[must_use]
    pub const fn container(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            top: 0.0,
            left: 0.0,
        }
    }

    /// Right edge (`left + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns true if the point lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{w:{}, h:{}, t:{}, l:{}}}",
            self.width, self.height, self.top, self.left
        )
    }
}

/// Share of a split's extent given to the primary child.
///
/// Always strictly between 0 and 1; out-of-range values are rejected,
/// never clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Ratio(f64);

impl Ratio {
    /// Even split used for synthesized splits.
    pub const HALF: Self = Self(0.5);

    /// Creates a ratio, rejecting values outside the open interval (0, 1).
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidRatio` for values `<= 0`, `>= 1` or NaN.
    pub fn new(value: f64) -> Result<Self, GridError> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(GridError::InvalidRatio(value))
        }
    }

    /// Returns the ratio as a float.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::HALF
    }
}

impl TryFrom<f64> for Ratio {
    type Error = GridError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ratio> for f64 {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
