//! Caller-owned drag session state
//!
//! A [`DragSession`] tracks one drag gesture: which leaf is being dragged,
//! which leaf is currently hovered and the quadrant under the pointer. The
//! tree itself holds no drag state; the session only touches it in
//! [`DragSession::finish`], which either cancels without mutation or runs
//! snapshot, restructure and diff in one call.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use tracing::debug;

use super::error::{GridError, GridResult};
use super::node::GridNode;
use super::quadrant::quadrant_at;
use super::tree::GridTree;
use super::types::{DropQuadrant, NodeId, Ratio};

/// Minimum interval between processed pointer-move events.
///
/// Moves arriving sooner than the interval after the last processed move
/// are skipped. Time is passed in explicitly so callers and tests control
/// the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl MoveThrottle {
    /// Creates a throttle with the given interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Creates a throttle with a 16ms interval (one frame at 60fps)
    #[must_use]
    pub const fn for_render() -> Self {
        Self::new(Duration::from_millis(16))
    }

    /// Configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if an event at `now` should be processed.
    pub fn should_proceed(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forgets the last processed event.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for MoveThrottle {
    fn default() -> Self {
        Self::for_render()
    }
}

/// Current drop target of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Hovered leaf.
    pub hovered: NodeId,
    /// Quadrant under the pointer, once a move has been processed.
    pub quadrant: Option<DropQuadrant>,
}

/// Result of finishing a drag session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No valid target; the tree was not touched.
    Cancelled,
    /// The tree was restructured.
    Applied {
        /// Ids whose geometry or structure changed.
        affected: BTreeSet<NodeId>,
        /// Ids that no longer exist.
        removed: BTreeSet<NodeId>,
    },
}

impl DropOutcome {
    /// Returns true if the tree was restructured.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Affected ids, if the drop was applied.
    #[must_use]
    pub const fn affected(&self) -> Option<&BTreeSet<NodeId>> {
        match self {
            Self::Applied { affected, .. } => Some(affected),
            Self::Cancelled => None,
        }
    }
}

/// State of one drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    dragged: NodeId,
    target: Option<DropTarget>,
    throttle: MoveThrottle,
    split_ratio: Ratio,
}

impl DragSession {
    /// Starts dragging a leaf.
    ///
    /// # Errors
    ///
    /// - `GridError::NodeNotFound` if the leaf does not exist
    /// - `GridError::NotALeaf` if the node is a split
    pub fn start<T>(tree: &GridTree<T>, dragged: NodeId) -> GridResult<Self> {
        if !tree.find(dragged)?.is_leaf() {
            return Err(GridError::NotALeaf(dragged));
        }
        debug!(%dragged, "Drag started");
        Ok(Self {
            dragged,
            target: None,
            throttle: MoveThrottle::default(),
            split_ratio: Ratio::HALF,
        })
    }

    /// Replaces the pointer-move throttle.
    #[must_use]
    pub const fn with_throttle(mut self, throttle: MoveThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Sets the ratio given to a split synthesized by the drop.
    #[must_use]
    pub const fn with_split_ratio(mut self, ratio: Ratio) -> Self {
        self.split_ratio = ratio;
        self
    }

    /// Leaf being dragged.
    #[must_use]
    pub const fn dragged(&self) -> NodeId {
        self.dragged
    }

    /// Current drop target.
    #[must_use]
    pub const fn target(&self) -> Option<DropTarget> {
        self.target
    }

    /// Updates the hovered leaf.
    ///
    /// The target is cleared when `hovered` is `None`, the dragged leaf
    /// itself, missing, not a leaf, or a leaf that refuses drops. Returns
    /// true if a target is set afterwards.
    pub fn hover<T>(&mut self, tree: &GridTree<T>, hovered: Option<NodeId>) -> bool {
        let accepted = hovered.filter(|id| self.accepts(tree, *id));
        match accepted {
            Some(id) if self.target.is_some_and(|t| t.hovered == id) => {}
            Some(id) => {
                self.target = Some(DropTarget {
                    hovered: id,
                    quadrant: None,
                });
                self.throttle.reset();
            }
            None => self.target = None,
        }
        debug!(dragged = %self.dragged, hovered = ?self.target.map(|t| t.hovered), "Hover updated");
        self.target.is_some()
    }

    fn accepts<T>(&self, tree: &GridTree<T>, hovered: NodeId) -> bool {
        hovered != self.dragged
            && tree
                .node(hovered)
                .and_then(GridNode::as_item)
                .is_some_and(|item| item.allow_drop)
    }

    /// Processes a pointer move at `(x, y)`, subject to throttling.
    ///
    /// Returns the quadrant currently recorded for the target.
    pub fn pointer_moved<T>(
        &mut self,
        tree: &GridTree<T>,
        x: f64,
        y: f64,
        now: Instant,
    ) -> Option<DropQuadrant> {
        let target = self.target.as_mut()?;
        if !self.throttle.should_proceed(now) {
            return target.quadrant;
        }
        let rect = tree.node(target.hovered)?.rect();
        target.quadrant = quadrant_at(&rect, x, y);
        target.quadrant
    }

    /// Ends the gesture.
    ///
    /// Without a target and quadrant the session is cancelled and the tree
    /// is left untouched. The target is checked again on release, so a leaf
    /// that stopped accepting drops after it was hovered also cancels.
    /// Otherwise the tree is restructured and the affected ids are reported.
    ///
    /// # Errors
    ///
    /// Returns the restructuring error; the tree is unchanged in that case.
    pub fn finish<T>(self, tree: &mut GridTree<T>) -> GridResult<DropOutcome> {
        let Some(DropTarget {
            hovered,
            quadrant: Some(quadrant),
        }) = self.target
        else {
            debug!(dragged = %self.dragged, "Drag cancelled");
            return Ok(DropOutcome::Cancelled);
        };
        if !self.accepts(tree, hovered) {
            debug!(dragged = %self.dragged, %hovered, "Drop target refused on release");
            return Ok(DropOutcome::Cancelled);
        }

        let snapshot = tree.create_snapshot();
        tree.restructure_by_drop_with_ratio(
            self.dragged,
            hovered,
            quadrant,
            self.split_ratio.get(),
        )?;
        Ok(DropOutcome::Applied {
            affected: tree.diff_with_snapshot(&snapshot),
            removed: tree.removed_since(&snapshot),
        })
    }
}
