//! Binary-split layout grid
//!
//! This module implements the layout tree behind a drag-and-drop panel grid.
//! A layout is a binary tree: leaves hold content, splits divide their
//! rectangle between exactly two children by a direction and a ratio.
//!
//! # Architecture
//!
//! - [`parser`]: turns an external [`LayoutDescription`] into a
//!   [`ComponentNode`] tree with identifiers assigned
//! - [`GridTree`]: owns the nodes, derives geometry and restructures on drop
//! - [`TreeSnapshot`]: before/after comparison yielding the affected ids
//! - [`NodeViews`]: `Arc`-shared views refreshed only where ids were affected
//! - [`DragSession`]: caller-owned drag state feeding a drop into the tree
//!
//! # Example
//!
//! ```
//! use dndgrid_core::grid::{DropQuadrant, GridTree, LayoutDescription, NodeId, SplitDirection};
//!
//! let description = LayoutDescription::split(
//!     SplitDirection::Vertical,
//!     0.2,
//!     LayoutDescription::item("sidebar"),
//!     LayoutDescription::item("main"),
//! );
//! let mut tree = GridTree::from_description(description, 1000.0, 800.0)?;
//! assert_eq!(tree.leaves()[0].width(), 200.0);
//!
//! let snapshot = tree.create_snapshot();
//! tree.restructure_by_drop(NodeId::new(2)?, NodeId::new(3)?, DropQuadrant::Right)?;
//! assert_eq!(tree.diff_with_snapshot(&snapshot).len(), 3);
//! # Ok::<(), dndgrid_core::grid::GridError>(())
//! ```

mod error;
mod node;
pub mod parser;
mod quadrant;
mod session;
mod snapshot;
mod tree;
mod types;
mod views;

pub use error::{GridError, GridResult};
pub use node::{GridItem, GridNode, GridSplit, NodeKind, ParentLayout, apply_layout};
pub use parser::{ComponentNode, IdScheme, LayoutDescription, MAX_BINARY_LEVELS, parse};
pub use quadrant::quadrant_at;
pub use session::{DragSession, DropOutcome, DropTarget, MoveThrottle};
pub use snapshot::{NodeSnapshot, TreeSnapshot};
pub use tree::GridTree;
pub use types::{ChildRole, DropQuadrant, NodeId, Ratio, Rect, SplitDirection};
pub use views::{NodeView, NodeViews, ViewKind};
