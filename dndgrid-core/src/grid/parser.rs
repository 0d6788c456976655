//! Construction-tree parser
//!
//! Converts an external [`LayoutDescription`] into a validated
//! [`ComponentNode`] tree with identifiers assigned. The description is what
//! callers write by hand or load from a file; splits carry their children as
//! options so that a malformed description is representable and rejected
//! here instead of at deserialization time.

use serde::{Deserialize, Serialize};

use super::error::{GridError, GridResult};
use super::types::{ChildRole, NodeId, Ratio, SplitDirection};

/// External, hierarchical description of a layout.
///
/// Serialized with a `type` tag:
///
/// ```json
/// { "type": "split", "direction": "vertical", "ratio": 0.2,
///   "primary":   { "type": "item", "component": "Sidebar" },
///   "secondary": { "type": "item", "component": "Main" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutDescription<T> {
    /// A leaf holding content.
    Item {
        /// Content handle for the leaf.
        #[serde(rename = "component")]
        payload: T,
        /// Whether the leaf accepts drops.
        #[serde(default = "default_allow_drop", skip_serializing_if = "is_true")]
        allow_drop: bool,
    },
    /// A split with two children.
    Split {
        /// Stacking direction.
        direction: SplitDirection,
        /// Primary child's share, validated when parsed.
        ratio: f64,
        /// First child.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        primary: Option<Box<LayoutDescription<T>>>,
        /// Second child.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        secondary: Option<Box<LayoutDescription<T>>>,
    },
}

const fn default_allow_drop() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_true(value: &bool) -> bool {
    *value
}

impl<T> LayoutDescription<T> {
    /// Creates a leaf description that accepts drops.
    #[must_use]
    pub const fn item(payload: T) -> Self {
        Self::Item {
            payload,
            allow_drop: true,
        }
    }

    /// Creates a split description with both children present.
    #[must_use]
    pub fn split(direction: SplitDirection, ratio: f64, primary: Self, secondary: Self) -> Self {
        Self::Split {
            direction,
            ratio,
            primary: Some(Box::new(primary)),
            secondary: Some(Box::new(secondary)),
        }
    }

    /// Returns true if this describes a leaf.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self, Self::Item { .. })
    }
}

/// Identifier assignment strategy used while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// Binary-tree indexing: root is 1, a split's children are `2n` and `2n + 1`.
    #[default]
    Binary,
    /// Pre-order counter starting at 1.
    Sequential,
}

/// Validated construction tree with identifiers assigned.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentNode<T> {
    /// A leaf.
    Leaf {
        /// Node identifier.
        id: NodeId,
        /// Content handle.
        payload: T,
        /// Whether the leaf accepts drops.
        allow_drop: bool,
    },
    /// A split with both children.
    Split {
        /// Node identifier.
        id: NodeId,
        /// Stacking direction.
        direction: SplitDirection,
        /// Primary child's share.
        ratio: Ratio,
        /// First child.
        primary: Box<ComponentNode<T>>,
        /// Second child.
        secondary: Box<ComponentNode<T>>,
    },
}

impl<T> ComponentNode<T> {
    /// Creates a leaf that accepts drops.
    #[must_use]
    pub const fn leaf(id: NodeId, payload: T) -> Self {
        Self::Leaf {
            id,
            payload,
            allow_drop: true,
        }
    }

    /// Identifier of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        match self {
            Self::Leaf { id, .. } | Self::Split { id, .. } => *id,
        }
    }

    /// Converts back into an external description, dropping identifiers.
    #[must_use]
    pub fn into_description(self) -> LayoutDescription<T> {
        match self {
            Self::Leaf {
                payload,
                allow_drop,
                ..
            } => LayoutDescription::Item {
                payload,
                allow_drop,
            },
            Self::Split {
                direction,
                ratio,
                primary,
                secondary,
                ..
            } => LayoutDescription::Split {
                direction,
                ratio: ratio.get(),
                primary: Some(Box::new(primary.into_description())),
                secondary: Some(Box::new(secondary.into_description())),
            },
        }
    }
}

/// Deepest level, the root being level 1, that binary ids can address.
///
/// A node on level `n` gets an id of at least `2^(n - 1)`, so level 65 would
/// overflow `u64`.
pub const MAX_BINARY_LEVELS: usize = 64;

struct IdAllocator {
    scheme: IdScheme,
    next: NodeId,
}

impl IdAllocator {
    const fn new(scheme: IdScheme) -> Self {
        Self {
            scheme,
            next: NodeId::ROOT,
        }
    }

    fn allocate(&mut self, parent: Option<(NodeId, ChildRole)>) -> GridResult<NodeId> {
        match self.scheme {
            IdScheme::Binary => match parent {
                None => Ok(NodeId::ROOT),
                Some((id, ChildRole::Primary)) => id.primary_child(),
                Some((id, ChildRole::Secondary)) => id.secondary_child(),
            },
            IdScheme::Sequential => {
                let id = self.next;
                self.next = id.checked_next()?;
                Ok(id)
            }
        }
    }
}

/// Parses a description into a construction tree.
///
/// Identifiers are assigned in pre-order, primary before secondary.
///
/// # Errors
///
/// - `GridError::MissingChild` if a split lacks a child
/// - `GridError::InvalidRatio` if a ratio is not strictly between 0 and 1
/// - `GridError::IdOverflow` if the binary scheme is used on a description
///   deeper than [`MAX_BINARY_LEVELS`]
pub fn parse<T>(
    description: LayoutDescription<T>,
    scheme: IdScheme,
) -> GridResult<ComponentNode<T>> {
    let mut ids = IdAllocator::new(scheme);
    parse_node(description, None, &mut ids)
}

fn parse_node<T>(
    description: LayoutDescription<T>,
    parent: Option<(NodeId, ChildRole)>,
    ids: &mut IdAllocator,
) -> GridResult<ComponentNode<T>> {
    let id = ids.allocate(parent)?;
    match description {
        LayoutDescription::Item {
            payload,
            allow_drop,
        } => Ok(ComponentNode::Leaf {
            id,
            payload,
            allow_drop,
        }),
        LayoutDescription::Split {
            direction,
            ratio,
            primary,
            secondary,
        } => {
            let ratio = Ratio::new(ratio)?;
            let (Some(primary), Some(secondary)) = (primary, secondary) else {
                return Err(GridError::MissingChild { split: id });
            };
            let primary = parse_node(*primary, Some((id, ChildRole::Primary)), ids)?;
            let secondary = parse_node(*secondary, Some((id, ChildRole::Secondary)), ids)?;
            Ok(ComponentNode::Split {
                id,
                direction,
                ratio,
                primary: Box::new(primary),
                secondary: Box::new(secondary),
            })
        }
    }
}
