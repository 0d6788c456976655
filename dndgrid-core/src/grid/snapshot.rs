//! Snapshot and diff for change tracking
//!
//! A [`TreeSnapshot`] is a flat id-keyed record of every node's geometry and
//! split structure. Diffing the tree against a snapshot taken before a
//! mutation yields the set of node ids whose geometry or structural meaning
//! changed; every id outside that set is identical to its snapshot entry.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::node::GridSplit;
use super::tree::GridTree;
use super::types::{NodeId, Rect};
use crate::tracing::span_names;

/// Recorded state of a single node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSnapshot {
    /// Node identifier.
    pub id: NodeId,
    /// Geometry at snapshot time.
    pub rect: Rect,
    /// Direction, ratio and child ids if the node was a split.
    pub split: Option<GridSplit>,
}

/// Flat record of a whole tree, keyed by node id.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot {
    root: NodeId,
    nodes: BTreeMap<NodeId, NodeSnapshot>,
}

impl TreeSnapshot {
    /// Root id at snapshot time.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Recorded state of a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&NodeSnapshot> {
        self.nodes.get(&id)
    }

    /// Returns true if the node existed at snapshot time.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of recorded nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the recorded nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeSnapshot> {
        self.nodes.values()
    }
}

impl<T> GridTree<T> {
    /// Records every node's geometry and split structure.
    #[must_use]
    pub fn create_snapshot(&self) -> TreeSnapshot {
        let nodes = self
            .nodes()
            .map(|node| {
                let snapshot = NodeSnapshot {
                    id: node.id(),
                    rect: node.rect(),
                    split: node.as_split().copied(),
                };
                (node.id(), snapshot)
            })
            .collect();
        TreeSnapshot {
            root: self.root_id(),
            nodes,
        }
    }

    /// Computes the ids affected since `snapshot` was taken.
    ///
    /// A node is affected when it is new (with its whole subtree), when its
    /// geometry changed, or when it is a split whose direction or ratio
    /// changed. A split whose child ids changed is affected together with
    /// both of its current subtrees. Geometry is compared exactly.
    #[must_use]
    pub fn diff_with_snapshot(&self, snapshot: &TreeSnapshot) -> BTreeSet<NodeId> {
        let _span = crate::trace_operation!(span_names::GRID_DIFF).entered();
        let mut affected = BTreeSet::new();
        if snapshot.root() != self.root_id() {
            affected.insert(self.root_id());
        }
        self.diff_node(self.root_id(), snapshot, &mut affected);
        debug!(affected = affected.len(), "Diffed tree against snapshot");
        affected
    }

    /// Ids present in `snapshot` that no longer exist in the tree.
    #[must_use]
    pub fn removed_since(&self, snapshot: &TreeSnapshot) -> BTreeSet<NodeId> {
        snapshot
            .nodes
            .keys()
            .copied()
            .filter(|id| !self.contains(*id))
            .collect()
    }

    fn diff_node(&self, id: NodeId, snapshot: &TreeSnapshot, affected: &mut BTreeSet<NodeId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        let Some(before) = snapshot.get(id) else {
            affected.extend(self.subtree_ids(id));
            return;
        };
        if before.rect != node.rect() {
            affected.insert(id);
        }

        let Some(split) = node.as_split() else {
            if before.split.is_some() {
                affected.insert(id);
            }
            return;
        };
        match before.split {
            Some(prev) if prev.primary == split.primary && prev.secondary == split.secondary => {
                if prev.direction != split.direction || prev.ratio != split.ratio {
                    affected.insert(id);
                }
                self.diff_node(split.primary, snapshot, affected);
                self.diff_node(split.secondary, snapshot, affected);
            }
            _ => {
                affected.insert(id);
                affected.extend(self.subtree_ids(split.primary));
                affected.extend(self.subtree_ids(split.secondary));
            }
        }
    }
}
