//! Node records for the layout tree
//!
//! Every node in a [`GridTree`](super::GridTree) is a [`GridNode`]: a plain
//! geometry record (id, parent link, rectangle) around a [`NodeKind`] that is
//! either a content-holding [`GridItem`] or a [`GridSplit`] with exactly two
//! children.
//!
//! # Tree Structure
//!
//! ```text
//! Split(1, Vertical, 0.2)
//! ├── Item(2, "sidebar")
//! └── Split(3, Horizontal, 0.7)
//!     ├── Item(6, "editor")
//!     └── Item(7, "terminal")
//! ```
//!
//! Geometry is never set by callers. It is derived top-down by
//! [`apply_layout`] from the parent split's rectangle, direction and ratio.

use super::types::{ChildRole, NodeId, Ratio, Rect, SplitDirection};

/// A leaf holding renderable content.
///
/// The payload is an opaque handle the grid never inspects. It survives
/// every restructuring and is only replaced through
/// [`GridTree::set_payload`](super::GridTree::set_payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem<T> {
    /// Content to render in this leaf.
    pub payload: T,
    /// Whether other leaves may be dropped onto this one.
    pub allow_drop: bool,
}

impl<T> GridItem<T> {
    /// Creates a leaf that accepts drops.
    #[must_use]
    pub const fn new(payload: T) -> Self {
        Self {
            payload,
            allow_drop: true,
        }
    }
}

/// A split dividing its rectangle between two children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSplit {
    /// Stacking direction of the two children.
    pub direction: SplitDirection,
    /// Share of the split axis given to the primary child.
    pub ratio: Ratio,
    /// First child (top for horizontal, left for vertical).
    pub primary: NodeId,
    /// Second child (bottom for horizontal, right for vertical).
    pub secondary: NodeId,
}

impl GridSplit {
    /// Returns the child occupying the given role.
    #[must_use]
    pub const fn child(&self, role: ChildRole) -> NodeId {
        match role {
            ChildRole::Primary => self.primary,
            ChildRole::Secondary => self.secondary,
        }
    }

    /// Returns the role of `id` in this split, if it is a direct child.
    #[must_use]
    pub fn role_of(&self, id: NodeId) -> Option<ChildRole> {
        if self.primary == id {
            Some(ChildRole::Primary)
        } else if self.secondary == id {
            Some(ChildRole::Secondary)
        } else {
            None
        }
    }

    /// Returns the other child of this split, if `id` is one of its children.
    #[must_use]
    pub fn sibling_of(&self, id: NodeId) -> Option<NodeId> {
        self.role_of(id).map(|role| self.child(role.other()))
    }

    pub(crate) fn set_child(&mut self, role: ChildRole, id: NodeId) {
        match role {
            ChildRole::Primary => self.primary = id,
            ChildRole::Secondary => self.secondary = id,
        }
    }

    pub(crate) fn swap_children(&mut self) {
        std::mem::swap(&mut self.primary, &mut self.secondary);
    }
}

/// Node payload variant.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<T> {
    /// A leaf with content.
    Item(GridItem<T>),
    /// An internal split.
    Split(GridSplit),
}

/// A node of the layout tree: geometry plus leaf or split data.
#[derive(Debug, Clone, PartialEq)]
pub struct GridNode<T> {
    id: NodeId,
    parent: Option<NodeId>,
    rect: Rect,
    kind: NodeKind<T>,
}

impl<T> GridNode<T> {
    pub(crate) const fn new(id: NodeId, parent: Option<NodeId>, kind: NodeKind<T>) -> Self {
        Self {
            id,
            parent,
            rect: Rect {
                width: 0.0,
                height: 0.0,
                top: 0.0,
                left: 0.0,
            },
            kind,
        }
    }

    /// Stable identifier of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Parent split, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Absolute rectangle computed by the last layout pass.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Width of the node.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.rect.width
    }

    /// Height of the node.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.rect.height
    }

    /// Offset from the container's top edge.
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.rect.top
    }

    /// Offset from the container's left edge.
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.rect.left
    }

    /// Leaf or split data.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind<T> {
        &self.kind
    }

    /// Returns true if this is a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Item(_))
    }

    /// Returns true if this is a split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(self.kind, NodeKind::Split(_))
    }

    /// Returns the leaf data if this is a leaf.
    #[must_use]
    pub const fn as_item(&self) -> Option<&GridItem<T>> {
        match &self.kind {
            NodeKind::Item(item) => Some(item),
            NodeKind::Split(_) => None,
        }
    }

    /// Returns the split data if this is a split.
    #[must_use]
    pub const fn as_split(&self) -> Option<&GridSplit> {
        match &self.kind {
            NodeKind::Item(_) => None,
            NodeKind::Split(split) => Some(split),
        }
    }

    /// Returns the leaf payload if this is a leaf.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        match &self.kind {
            NodeKind::Item(item) => Some(&item.payload),
            NodeKind::Split(_) => None,
        }
    }

    pub(crate) fn as_item_mut(&mut self) -> Option<&mut GridItem<T>> {
        match &mut self.kind {
            NodeKind::Item(item) => Some(item),
            NodeKind::Split(_) => None,
        }
    }

    pub(crate) fn as_split_mut(&mut self) -> Option<&mut GridSplit> {
        match &mut self.kind {
            NodeKind::Item(_) => None,
            NodeKind::Split(split) => Some(split),
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

/// What a split hands down to its children during a layout pass.
///
/// `primary_rect` is filled in once the primary child has been laid out;
/// the secondary child's geometry is derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentLayout {
    /// The split's own rectangle.
    pub rect: Rect,
    /// The split's direction.
    pub direction: SplitDirection,
    /// The split's ratio.
    pub ratio: Ratio,
    /// Identifier of the split's primary child.
    pub primary: NodeId,
    /// Rectangle already computed for the primary child, if any.
    pub primary_rect: Option<Rect>,
}

impl ParentLayout {
    /// Captures the layout inputs of a split node.
    #[must_use]
    pub const fn of(rect: Rect, split: &GridSplit) -> Self {
        Self {
            rect,
            direction: split.direction,
            ratio: split.ratio,
            primary: split.primary,
            primary_rect: None,
        }
    }

    /// Role a child with this id plays under the split.
    #[must_use]
    pub fn role_of(&self, id: NodeId) -> ChildRole {
        if id == self.primary {
            ChildRole::Primary
        } else {
            ChildRole::Secondary
        }
    }

    /// Derives the rectangle of the child in `role`.
    #[must_use]
    pub fn child_rect(&self, role: ChildRole) -> Rect {
        let p = self.rect;
        match role {
            ChildRole::Primary => match self.direction {
                SplitDirection::Horizontal => Rect {
                    width: p.width,
                    height: self.ratio.get() * p.height,
                    top: p.top,
                    left: p.left,
                },
                SplitDirection::Vertical => Rect {
                    width: self.ratio.get() * p.width,
                    height: p.height,
                    top: p.top,
                    left: p.left,
                },
            },
            ChildRole::Secondary => {
                let primary = self
                    .primary_rect
                    .unwrap_or_else(|| self.child_rect(ChildRole::Primary));
                match self.direction {
                    SplitDirection::Horizontal => Rect {
                        width: p.width,
                        height: p.height - primary.height,
                        top: p.top + primary.height,
                        left: p.left,
                    },
                    SplitDirection::Vertical => Rect {
                        width: p.width - primary.width,
                        height: p.height,
                        top: p.top,
                        left: p.left + primary.width,
                    },
                }
            }
        }
    }
}

/// Derives a child's rectangle from its parent split and stores it.
pub fn apply_layout<T>(child: &mut GridNode<T>, parent: &ParentLayout) {
    let role = parent.role_of(child.id);
    child.rect = parent.child_rect(role);
}
