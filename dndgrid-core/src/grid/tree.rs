//! Layout tree with drag-and-drop restructuring
//!
//! [`GridTree`] owns every node of a layout in an id-keyed arena. Geometry is
//! derived top-down from the container size and the chain of split ratios,
//! so it can always be recomputed from scratch and recomputation is
//! idempotent.
//!
//! # Restructuring
//!
//! [`GridTree::restructure_by_drop`] moves a dragged leaf next to a hovered
//! leaf:
//!
//! - **Same parent**: the parent adopts the quadrant's direction and swaps
//!   its children if the dragged leaf is not already on the requested side.
//! - **Different parents**: a new split holding both leaves replaces the
//!   hovered leaf, and the dragged leaf's old parent collapses into the
//!   dragged leaf's sibling.
//!
//! Every request is validated before the first mutation, so a rejected drop
//! leaves the tree exactly as it was.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::error::{GridError, GridResult};
use super::node::{GridItem, GridNode, GridSplit, NodeKind, ParentLayout, apply_layout};
use super::parser::{self, ComponentNode, IdScheme, LayoutDescription};
use super::types::{ChildRole, DropQuadrant, NodeId, Ratio, Rect};
use crate::tracing::span_names;

/// A binary-split layout tree.
///
/// The payload type `T` is an opaque content handle carried by leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTree<T> {
    nodes: BTreeMap<NodeId, GridNode<T>>,
    root: NodeId,
    width: f64,
    height: f64,
    next_id: NodeId,
}

/// Validated drop request, computed before anything is mutated.
#[derive(Debug, Clone, Copy)]
enum DropPlan {
    Reorder {
        parent: NodeId,
        swap: bool,
    },
    Graft {
        new_split: NodeId,
        next_id: NodeId,
        ratio: Ratio,
        dragged_parent: NodeId,
        sibling: NodeId,
        grandparent: Option<NodeId>,
        hovered_parent: NodeId,
    },
}

impl<T> GridTree<T> {
    // ========== Construction ==========

    /// Builds a tree from a construction tree and container size.
    ///
    /// # Errors
    ///
    /// - `GridError::InvalidContainer` if either dimension is not a positive finite number
    /// - `GridError::DuplicateId` if two nodes share an identifier
    /// - `GridError::IdOverflow` if the largest id is `u64::MAX`
    pub fn build(root: ComponentNode<T>, width: f64, height: f64) -> GridResult<Self> {
        let _span = crate::trace_operation!(span_names::GRID_BUILD, width, height).entered();
        validate_container(width, height)?;

        let root_id = root.id();
        let mut nodes = BTreeMap::new();
        insert_component(&mut nodes, root, None)?;

        let max_id = nodes.keys().next_back().copied().unwrap_or(root_id);
        let mut tree = Self {
            nodes,
            root: root_id,
            width,
            height,
            next_id: max_id.checked_next()?,
        };
        tree.recompute_layout();
        debug!(nodes = tree.nodes.len(), root = %root_id, "Built layout tree");
        Ok(tree)
    }

    /// Parses a description with binary ids and builds a tree from it.
    ///
    /// # Errors
    ///
    /// Returns any parse or build error; no tree is produced on failure.
    pub fn from_description(
        description: LayoutDescription<T>,
        width: f64,
        height: f64,
    ) -> GridResult<Self> {
        Self::from_description_with(description, IdScheme::Binary, width, height)
    }

    /// Parses a description with the given id scheme and builds a tree from it.
    ///
    /// # Errors
    ///
    /// Returns any parse or build error; no tree is produced on failure.
    pub fn from_description_with(
        description: LayoutDescription<T>,
        scheme: IdScheme,
        width: f64,
        height: f64,
    ) -> GridResult<Self> {
        let root = parser::parse(description, scheme)?;
        Self::build(root, width, height)
    }

    // ========== Accessors ==========

    /// Identifier of the root node.
    #[must_use]
    pub const fn root_id(&self) -> NodeId {
        self.root
    }

    /// The root node.
    ///
    /// # Errors
    ///
    /// Never fails on a tree built through this API.
    pub fn root(&self) -> GridResult<&GridNode<T>> {
        self.find(self.root)
    }

    /// Container width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Container height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Rectangle covering the whole container.
    #[must_use]
    pub const fn container(&self) -> Rect {
        Rect::container(self.width, self.height)
    }

    /// Identifier the next synthesized split will receive.
    #[must_use]
    pub const fn next_id(&self) -> NodeId {
        self.next_id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if a node with this id exists.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&GridNode<T>> {
        self.nodes.get(&id)
    }

    /// Looks up a node, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `GridError::NodeNotFound` if no node has this id.
    pub fn find(&self, id: NodeId) -> GridResult<&GridNode<T>> {
        self.nodes.get(&id).ok_or(GridError::NodeNotFound(id))
    }

    /// Iterates over all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &GridNode<T>> {
        self.nodes.values()
    }

    /// Node ids of the subtree rooted at `id`, in pre-order.
    ///
    /// Returns an empty list if `id` does not exist.
    #[must_use]
    pub fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            out.push(current);
            if let Some(split) = node.as_split() {
                stack.push(split.secondary);
                stack.push(split.primary);
            }
        }
        out
    }

    /// All nodes in pre-order, primary before secondary.
    #[must_use]
    pub fn pre_order(&self) -> Vec<&GridNode<T>> {
        self.subtree_ids(self.root)
            .into_iter()
            .filter_map(|id| self.nodes.get(&id))
            .collect()
    }

    /// All leaves in pre-order, primary before secondary.
    #[must_use]
    pub fn leaves(&self) -> Vec<&GridNode<T>> {
        self.pre_order().into_iter().filter(|node| node.is_leaf()).collect()
    }

    /// All splits in pre-order, primary before secondary.
    #[must_use]
    pub fn splits(&self) -> Vec<&GridNode<T>> {
        self.pre_order().into_iter().filter(|node| node.is_split()).collect()
    }

    /// Depth of a node, the root being at depth 0.
    ///
    /// # Errors
    ///
    /// Returns `GridError::NodeNotFound` if no node has this id.
    pub fn depth(&self, id: NodeId) -> GridResult<usize> {
        let mut depth = 0;
        let mut current = self.find(id)?;
        while let Some(parent) = current.parent() {
            current = self.find(parent)?;
            depth += 1;
        }
        Ok(depth)
    }

    /// Finds the leaf whose rectangle contains the point, if any.
    #[must_use]
    pub fn leaf_at(&self, x: f64, y: f64) -> Option<&GridNode<T>> {
        let mut current = self.nodes.get(&self.root)?;
        if !current.rect().contains(x, y) {
            return None;
        }
        while let Some(split) = current.as_split() {
            let primary = self.nodes.get(&split.primary)?;
            current = if primary.rect().contains(x, y) {
                primary
            } else {
                self.nodes.get(&split.secondary)?
            };
        }
        Some(current)
    }

    // ========== Geometry ==========

    /// Recomputes every node's rectangle from the container size.
    ///
    /// Calling this on an unchanged tree yields identical geometry.
    pub fn recompute_layout(&mut self) {
        let container = self.container();
        if let Some(root) = self.nodes.get_mut(&self.root) {
            root.set_rect(container);
        }
        self.layout_children(self.root);
    }

    fn layout_children(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let Some(split) = node.as_split().copied() else {
            return;
        };
        let mut frame = ParentLayout::of(node.rect(), &split);
        if let Some(primary) = self.nodes.get_mut(&split.primary) {
            apply_layout(primary, &frame);
            frame.primary_rect = Some(primary.rect());
        }
        if let Some(secondary) = self.nodes.get_mut(&split.secondary) {
            apply_layout(secondary, &frame);
        }
        self.layout_children(split.primary);
        self.layout_children(split.secondary);
    }

    /// Changes the container size and recomputes geometry.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidContainer` if either dimension is not a
    /// positive finite number. The tree is unchanged on error.
    pub fn resize(&mut self, width: f64, height: f64) -> GridResult<()> {
        validate_container(width, height)?;
        self.width = width;
        self.height = height;
        self.recompute_layout();
        debug!(width, height, "Resized layout tree");
        Ok(())
    }

    /// Changes a split's ratio and recomputes geometry.
    ///
    /// # Errors
    ///
    /// - `GridError::InvalidRatio` if the ratio is not strictly between 0 and 1
    /// - `GridError::NodeNotFound` if the node does not exist
    /// - `GridError::NotASplit` if the node is a leaf
    pub fn set_ratio(&mut self, id: NodeId, ratio: f64) -> GridResult<()> {
        let ratio = Ratio::new(ratio)?;
        let split = self
            .nodes
            .get_mut(&id)
            .ok_or(GridError::NodeNotFound(id))?
            .as_split_mut()
            .ok_or(GridError::NotASplit(id))?;
        split.ratio = ratio;
        self.recompute_layout();
        Ok(())
    }

    // ========== Leaf content ==========

    /// Replaces a leaf's payload, returning the previous one.
    ///
    /// # Errors
    ///
    /// - `GridError::NodeNotFound` if the node does not exist
    /// - `GridError::NotALeaf` if the node is a split
    pub fn set_payload(&mut self, id: NodeId, payload: T) -> GridResult<T> {
        let item = self.item_mut(id)?;
        Ok(std::mem::replace(&mut item.payload, payload))
    }

    /// Sets whether a leaf accepts drops.
    ///
    /// # Errors
    ///
    /// - `GridError::NodeNotFound` if the node does not exist
    /// - `GridError::NotALeaf` if the node is a split
    pub fn set_allow_drop(&mut self, id: NodeId, allow_drop: bool) -> GridResult<()> {
        self.item_mut(id)?.allow_drop = allow_drop;
        Ok(())
    }

    fn item_mut(&mut self, id: NodeId) -> GridResult<&mut GridItem<T>> {
        self.nodes
            .get_mut(&id)
            .ok_or(GridError::NodeNotFound(id))?
            .as_item_mut()
            .ok_or(GridError::NotALeaf(id))
    }

    // ========== Restructuring ==========

    /// Moves `dragged` next to `hovered` on the side given by `quadrant`.
    ///
    /// A split synthesized by the move gets an even ratio.
    ///
    /// # Errors
    ///
    /// See [`Self::restructure_by_drop_with_ratio`].
    pub fn restructure_by_drop(
        &mut self,
        dragged: NodeId,
        hovered: NodeId,
        quadrant: DropQuadrant,
    ) -> GridResult<()> {
        self.restructure_by_drop_with_ratio(dragged, hovered, quadrant, Ratio::HALF.get())
    }

    /// Moves `dragged` next to `hovered`, giving a synthesized split `ratio`.
    ///
    /// The tree is unchanged when an error is returned.
    ///
    /// # Errors
    ///
    /// - `GridError::SelfDrop` if `dragged == hovered`
    /// - `GridError::NodeNotFound` if either id does not exist
    /// - `GridError::RootNotMovable` if either id is the root
    /// - `GridError::NotALeaf` if either id is a split
    /// - `GridError::InvalidRatio` if `ratio` is not strictly between 0 and 1
    /// - `GridError::IdOverflow` if no fresh id is left
    pub fn restructure_by_drop_with_ratio(
        &mut self,
        dragged: NodeId,
        hovered: NodeId,
        quadrant: DropQuadrant,
        ratio: f64,
    ) -> GridResult<()> {
        let _span = crate::trace_operation!(
            span_names::GRID_RESTRUCTURE,
            dragged = %dragged,
            hovered = %hovered,
            quadrant = %quadrant
        )
        .entered();

        let plan = match self.plan_drop(dragged, hovered, quadrant, ratio) {
            Ok(plan) => plan,
            Err(e) => {
                warn!(%dragged, %hovered, %quadrant, error = %e, "Rejected drop");
                return Err(e);
            }
        };

        match plan {
            DropPlan::Reorder { parent, swap } => {
                if let Some(split) = self.nodes.get_mut(&parent).and_then(GridNode::as_split_mut) {
                    split.direction = quadrant.split_direction();
                    if swap {
                        split.swap_children();
                    }
                }
                info!(%dragged, %hovered, %quadrant, %parent, swap, "Reordered siblings");
            }
            DropPlan::Graft {
                new_split,
                next_id,
                ratio,
                dragged_parent,
                sibling,
                grandparent,
                hovered_parent,
            } => {
                let (primary, secondary) = match quadrant.dragged_role() {
                    ChildRole::Primary => (dragged, hovered),
                    ChildRole::Secondary => (hovered, dragged),
                };
                let split = GridSplit {
                    direction: quadrant.split_direction(),
                    ratio,
                    primary,
                    secondary,
                };
                self.nodes.insert(
                    new_split,
                    GridNode::new(new_split, Some(hovered_parent), NodeKind::Split(split)),
                );
                self.replace_child(hovered_parent, hovered, new_split);
                self.set_parent(dragged, Some(new_split));
                self.set_parent(hovered, Some(new_split));

                match grandparent {
                    Some(grandparent) => {
                        self.replace_child(grandparent, dragged_parent, sibling);
                        self.set_parent(sibling, Some(grandparent));
                    }
                    None => {
                        self.root = sibling;
                        self.set_parent(sibling, None);
                    }
                }
                self.nodes.remove(&dragged_parent);
                self.next_id = next_id;
                info!(
                    %dragged, %hovered, %quadrant, %new_split,
                    removed = %dragged_parent, promoted = %sibling,
                    "Grafted dragged leaf next to hovered leaf"
                );
            }
        }

        self.recompute_layout();
        Ok(())
    }

    fn plan_drop(
        &self,
        dragged: NodeId,
        hovered: NodeId,
        quadrant: DropQuadrant,
        ratio: f64,
    ) -> GridResult<DropPlan> {
        if dragged == hovered {
            return Err(GridError::SelfDrop(dragged));
        }
        let dragged_parent = self.movable_leaf_parent(dragged)?;
        let hovered_parent = self.movable_leaf_parent(hovered)?;
        let ratio = Ratio::new(ratio)?;

        let parent_split = self.split(dragged_parent)?;
        if dragged_parent == hovered_parent {
            let swap = parent_split.role_of(dragged) != Some(quadrant.dragged_role());
            return Ok(DropPlan::Reorder {
                parent: dragged_parent,
                swap,
            });
        }

        let sibling = parent_split
            .sibling_of(dragged)
            .ok_or(GridError::NodeNotFound(dragged))?;
        let grandparent = self.find(dragged_parent)?.parent();
        let new_split = self.next_id;
        let next_id = new_split.checked_next()?;

        Ok(DropPlan::Graft {
            new_split,
            next_id,
            ratio,
            dragged_parent,
            sibling,
            grandparent,
            hovered_parent,
        })
    }

    fn movable_leaf_parent(&self, id: NodeId) -> GridResult<NodeId> {
        let node = self.find(id)?;
        if !node.is_leaf() {
            return Err(GridError::NotALeaf(id));
        }
        node.parent().ok_or(GridError::RootNotMovable(id))
    }

    fn split(&self, id: NodeId) -> GridResult<&GridSplit> {
        self.find(id)?.as_split().ok_or(GridError::NotASplit(id))
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if let Some(split) = self.nodes.get_mut(&parent).and_then(GridNode::as_split_mut)
            && let Some(role) = split.role_of(old)
        {
            split.set_child(role, new);
        }
    }

    fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_parent(parent);
        }
    }
}

impl<T: Clone> GridTree<T> {
    // ========== Export ==========

    /// Exports the current structure as a construction tree.
    ///
    /// Building the result at the same container size reproduces this tree.
    ///
    /// # Errors
    ///
    /// Never fails on a tree built through this API.
    pub fn to_component_tree(&self) -> GridResult<ComponentNode<T>> {
        self.component_at(self.root)
    }

    /// Exports the current structure as an external description.
    ///
    /// # Errors
    ///
    /// Never fails on a tree built through this API.
    pub fn to_description(&self) -> GridResult<LayoutDescription<T>> {
        self.to_component_tree().map(ComponentNode::into_description)
    }

    fn component_at(&self, id: NodeId) -> GridResult<ComponentNode<T>> {
        let node = self.find(id)?;
        match node.kind() {
            NodeKind::Item(item) => Ok(ComponentNode::Leaf {
                id,
                payload: item.payload.clone(),
                allow_drop: item.allow_drop,
            }),
            NodeKind::Split(split) => Ok(ComponentNode::Split {
                id,
                direction: split.direction,
                ratio: split.ratio,
                primary: Box::new(self.component_at(split.primary)?),
                secondary: Box::new(self.component_at(split.secondary)?),
            }),
        }
    }
}

fn validate_container(width: f64, height: f64) -> GridResult<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidContainer { width, height })
    }
}

fn insert_component<T>(
    nodes: &mut BTreeMap<NodeId, GridNode<T>>,
    component: ComponentNode<T>,
    parent: Option<NodeId>,
) -> GridResult<()> {
    let id = component.id();
    if nodes.contains_key(&id) {
        return Err(GridError::DuplicateId(id));
    }
    match component {
        ComponentNode::Leaf {
            payload,
            allow_drop,
            ..
        } => {
            let item = GridItem {
                payload,
                allow_drop,
            };
            nodes.insert(id, GridNode::new(id, parent, NodeKind::Item(item)));
        }
        ComponentNode::Split {
            direction,
            ratio,
            primary,
            secondary,
            ..
        } => {
            let split = GridSplit {
                direction,
                ratio,
                primary: primary.id(),
                secondary: secondary.id(),
            };
            nodes.insert(id, GridNode::new(id, parent, NodeKind::Split(split)));
            insert_component(nodes, *primary, Some(id))?;
            insert_component(nodes, *secondary, Some(id))?;
        }
    }
    Ok(())
}
