//! Error types for grid operations
//!
//! Construction errors come from building a tree out of a malformed
//! description; restructuring errors come from drop requests that do not
//! describe a valid move. Both leave any existing tree untouched.

use super::types::NodeId;

/// Errors that can occur while building or mutating a layout tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// A split description is missing one of its two children.
    #[error("split {split} must have exactly two children")]
    MissingChild {
        /// Identifier assigned to the malformed split.
        split: NodeId,
    },

    /// A split ratio lies outside the open interval (0, 1).
    #[error("invalid split ratio: {0} (must be strictly between 0 and 1)")]
    InvalidRatio(f64),

    /// Container dimensions are not positive finite numbers.
    #[error("invalid container size: {width}x{height}")]
    InvalidContainer {
        /// Requested container width.
        width: f64,
        /// Requested container height.
        height: f64,
    },

    /// Two nodes in a construction tree share an identifier.
    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),

    /// Node identifiers must be positive.
    #[error("node id 0 is reserved")]
    ZeroId,

    /// The identifier space is exhausted.
    #[error("node id overflow")]
    IdOverflow,

    /// The requested node does not exist in the tree.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// The root has no parent and cannot take part in a drop.
    #[error("node {0} is the root and cannot be moved or targeted")]
    RootNotMovable(NodeId),

    /// A node was dropped onto itself.
    #[error("node {0} cannot be dropped onto itself")]
    SelfDrop(NodeId),

    /// The operation requires a leaf node.
    #[error("node {0} is not a leaf")]
    NotALeaf(NodeId),

    /// The operation requires a split node.
    #[error("node {0} is not a split")]
    NotASplit(NodeId),
}

impl GridError {
    /// Returns true for errors raised while building a tree.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::MissingChild { .. }
                | Self::InvalidRatio(_)
                | Self::InvalidContainer { .. }
                | Self::DuplicateId(_)
                | Self::ZeroId
                | Self::IdOverflow
        )
    }
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
