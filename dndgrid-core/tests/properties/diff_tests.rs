//! Property-based tests for snapshot diffing and view reuse

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use dndgrid_core::grid::{GridTree, NodeId, NodeViews, TreeSnapshot};

use super::{build, container_strategy, description_strategy, quadrant_strategy};

/// Asserts every node outside `affected` matches its snapshot entry
fn assert_unaffected_unchanged(
    tree: &GridTree<u32>,
    snapshot: &TreeSnapshot,
    affected: &BTreeSet<NodeId>,
) -> Result<(), TestCaseError> {
    for node in tree.nodes() {
        if affected.contains(&node.id()) {
            continue;
        }
        let entry = snapshot.get(node.id());
        prop_assert!(entry.is_some(), "node {} is new but not affected", node.id());
        let entry = entry.unwrap();
        prop_assert_eq!(entry.rect, node.rect());
        prop_assert_eq!(entry.split, node.as_split().copied());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_unchanged_tree_has_empty_diff(
        description in description_strategy(),
        size in container_strategy(),
    ) {
        let mut tree = build(description, size);
        let snapshot = tree.create_snapshot();
        tree.recompute_layout();
        prop_assert!(tree.diff_with_snapshot(&snapshot).is_empty());
        prop_assert!(tree.removed_since(&snapshot).is_empty());
    }

    #[test]
    fn prop_diff_covers_every_change(
        description in description_strategy(),
        size in container_strategy(),
        dragged in 0usize..64,
        hovered in 0usize..64,
        quadrant in quadrant_strategy(),
    ) {
        let mut tree = build(description, size);
        let leaves = tree.leaves();
        let dragged = leaves[dragged % leaves.len()].id();
        let hovered = leaves[hovered % leaves.len()].id();
        if dragged == hovered {
            return Ok(());
        }

        let snapshot = tree.create_snapshot();
        tree.restructure_by_drop(dragged, hovered, quadrant).unwrap();
        let affected = tree.diff_with_snapshot(&snapshot);

        prop_assert!(affected.iter().all(|id| tree.contains(*id)));
        assert_unaffected_unchanged(&tree, &snapshot, &affected)?;

        let removed = tree.removed_since(&snapshot);
        for entry in snapshot.iter() {
            prop_assert_eq!(removed.contains(&entry.id), !tree.contains(entry.id));
        }
    }

    #[test]
    fn prop_ratio_change_is_tracked(
        description in description_strategy(),
        size in container_strategy(),
        index in 0usize..64,
        ratio in 0.05..0.95f64,
    ) {
        let mut tree = build(description, size);
        let Some(split) = ({
            let splits = tree.splits();
            (!splits.is_empty()).then(|| splits[index % splits.len()].id())
        }) else {
            return Ok(());
        };

        let snapshot = tree.create_snapshot();
        tree.set_ratio(split, ratio).unwrap();
        let affected = tree.diff_with_snapshot(&snapshot);

        assert_unaffected_unchanged(&tree, &snapshot, &affected)?;
        let unchanged = snapshot
            .get(split)
            .and_then(|entry| entry.split)
            .is_some_and(|before| before.ratio.get() == ratio);
        prop_assert_eq!(affected.contains(&split), !unchanged);
    }

    #[test]
    fn prop_views_share_unaffected_nodes(
        description in description_strategy(),
        size in container_strategy(),
        dragged in 0usize..64,
        hovered in 0usize..64,
        quadrant in quadrant_strategy(),
    ) {
        let mut tree = build(description, size);
        let leaves = tree.leaves();
        let dragged = leaves[dragged % leaves.len()].id();
        let hovered = leaves[hovered % leaves.len()].id();
        if dragged == hovered {
            return Ok(());
        }

        let views = NodeViews::new(&tree).unwrap();
        let snapshot = tree.create_snapshot();
        tree.restructure_by_drop(dragged, hovered, quadrant).unwrap();
        let affected = tree.diff_with_snapshot(&snapshot);
        let refreshed = views.refresh(&tree, &affected).unwrap();

        prop_assert_eq!(refreshed.len(), tree.node_count());
        for node in tree.nodes() {
            let view = refreshed.get(node.id()).unwrap();
            prop_assert_eq!(view.rect, node.rect());
        }
        for view in refreshed.changed_items(&views) {
            prop_assert!(affected.contains(&view.id));
        }
        for leaf in tree.leaves() {
            if !affected.contains(&leaf.id()) {
                let old = views.get(leaf.id()).unwrap();
                let new = refreshed.get(leaf.id()).unwrap();
                prop_assert!(Arc::ptr_eq(old, new));
            }
        }
    }
}
