//! Shared node views for reference-equality change detection
//!
//! [`NodeViews`] presents every node of a tree as an immutable,
//! `Arc`-shared [`NodeView`]. After a mutation, [`NodeViews::refresh`]
//! builds the next generation from the affected-id set: affected nodes, and
//! splits whose child views were replaced, get fresh `Arc`s while everything
//! else keeps the previous allocation. A renderer can then skip any view
//! that is [`Arc::ptr_eq`] to the one it already painted.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::error::GridResult;
use super::node::NodeKind;
use super::tree::GridTree;
use super::types::{NodeId, Ratio, Rect, SplitDirection};

/// Immutable view of one node.
#[derive(Debug, PartialEq)]
pub struct NodeView<T> {
    /// Node identifier.
    pub id: NodeId,
    /// Geometry when the view was created.
    pub rect: Rect,
    /// Leaf or split data.
    pub kind: ViewKind<T>,
}

/// Leaf or split data of a [`NodeView`].
#[derive(Debug, PartialEq)]
pub enum ViewKind<T> {
    /// A leaf.
    Item {
        /// Content handle.
        payload: T,
        /// Whether the leaf accepts drops.
        allow_drop: bool,
    },
    /// A split.
    Split {
        /// Stacking direction.
        direction: SplitDirection,
        /// Primary child's share.
        ratio: Ratio,
        /// View of the first child.
        primary: Arc<NodeView<T>>,
        /// View of the second child.
        secondary: Arc<NodeView<T>>,
    },
}

impl<T> NodeView<T> {
    /// Returns true if this is a leaf view.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self.kind, ViewKind::Item { .. })
    }

    /// Leaf payload, if this is a leaf view.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        match &self.kind {
            ViewKind::Item { payload, .. } => Some(payload),
            ViewKind::Split { .. } => None,
        }
    }
}

/// One generation of views over a tree.
#[derive(Debug)]
pub struct NodeViews<T> {
    root: Arc<NodeView<T>>,
    index: BTreeMap<NodeId, Arc<NodeView<T>>>,
    order: Vec<NodeId>,
}

impl<T: Clone> NodeViews<T> {
    /// Creates views for every node of the tree.
    ///
    /// # Errors
    ///
    /// Never fails on a tree built through this API.
    pub fn new(tree: &GridTree<T>) -> GridResult<Self> {
        Self::generate(tree, None, &BTreeSet::new())
    }

    /// Creates the next generation of views after a mutation.
    ///
    /// Nodes outside `affected` keep their previous `Arc`. Callers that
    /// change a leaf payload in place must include that leaf in `affected`.
    ///
    /// # Errors
    ///
    /// Never fails on a tree built through this API.
    pub fn refresh(&self, tree: &GridTree<T>, affected: &BTreeSet<NodeId>) -> GridResult<Self> {
        Self::generate(tree, Some(self), affected)
    }

    fn generate(
        tree: &GridTree<T>,
        previous: Option<&Self>,
        affected: &BTreeSet<NodeId>,
    ) -> GridResult<Self> {
        let mut index = BTreeMap::new();
        let mut order = Vec::new();
        let root = view_at(tree, tree.root_id(), previous, affected, &mut index, &mut order)?;
        Ok(Self { root, index, order })
    }
}

impl<T> NodeViews<T> {
    /// View of the root node.
    #[must_use]
    pub const fn root(&self) -> &Arc<NodeView<T>> {
        &self.root
    }

    /// View of a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Arc<NodeView<T>>> {
        self.index.get(&id)
    }

    /// Number of views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if there are no views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Views in pre-order, primary before secondary.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<NodeView<T>>> {
        self.order.iter().filter_map(|id| self.index.get(id))
    }

    /// Ids whose view is not the same allocation as in `previous`.
    #[must_use]
    pub fn changed_ids(&self, previous: &Self) -> BTreeSet<NodeId> {
        self.index
            .iter()
            .filter(|(id, view)| !previous.get(**id).is_some_and(|old| Arc::ptr_eq(old, view)))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Leaf views a renderer has to repaint, in pre-order.
    #[must_use]
    pub fn changed_items(&self, previous: &Self) -> Vec<&Arc<NodeView<T>>> {
        self.iter()
            .filter(|view| view.is_item())
            .filter(|view| !previous.get(view.id).is_some_and(|old| Arc::ptr_eq(old, view)))
            .collect()
    }
}

fn view_at<T: Clone>(
    tree: &GridTree<T>,
    id: NodeId,
    previous: Option<&NodeViews<T>>,
    affected: &BTreeSet<NodeId>,
    index: &mut BTreeMap<NodeId, Arc<NodeView<T>>>,
    order: &mut Vec<NodeId>,
) -> GridResult<Arc<NodeView<T>>> {
    let node = tree.find(id)?;
    order.push(id);
    let reusable = previous
        .filter(|_| !affected.contains(&id))
        .and_then(|views| views.get(id));

    let view = match node.kind() {
        NodeKind::Item(item) => match reusable {
            Some(old) if old.is_item() => Arc::clone(old),
            _ => Arc::new(NodeView {
                id,
                rect: node.rect(),
                kind: ViewKind::Item {
                    payload: item.payload.clone(),
                    allow_drop: item.allow_drop,
                },
            }),
        },
        NodeKind::Split(split) => {
            let primary = view_at(tree, split.primary, previous, affected, index, order)?;
            let secondary = view_at(tree, split.secondary, previous, affected, index, order)?;
            let same_children = |old: &NodeView<T>| match &old.kind {
                ViewKind::Split {
                    primary: old_primary,
                    secondary: old_secondary,
                    ..
                } => Arc::ptr_eq(old_primary, &primary) && Arc::ptr_eq(old_secondary, &secondary),
                ViewKind::Item { .. } => false,
            };
            let reused = reusable.filter(|old| same_children(old)).map(Arc::clone);
            match reused {
                Some(old) => old,
                None => Arc::new(NodeView {
                    id,
                    rect: node.rect(),
                    kind: ViewKind::Split {
                        direction: split.direction,
                        ratio: split.ratio,
                        primary,
                        secondary,
                    },
                }),
            }
        }
    };
    index.insert(id, Arc::clone(&view));
    Ok(view)
}
