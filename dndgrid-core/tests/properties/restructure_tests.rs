//! Property-based tests for drop restructuring

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use dndgrid_core::grid::{
    DropQuadrant, GridError, GridTree, LayoutDescription, NodeId, SplitDirection,
};

use super::{
    assert_tiles, assert_well_formed, build, container_strategy, description_strategy,
    quadrant_strategy,
};

/// Leaf payloads keyed by id
fn leaf_payloads(tree: &GridTree<u32>) -> BTreeMap<NodeId, u32> {
    tree.leaves()
        .into_iter()
        .filter_map(|leaf| leaf.payload().map(|payload| (leaf.id(), *payload)))
        .collect()
}

/// Picks two leaf ids by index, wrapping around the leaf count
fn pick_leaves(tree: &GridTree<u32>, dragged: usize, hovered: usize) -> (NodeId, NodeId) {
    let leaves = tree.leaves();
    (
        leaves[dragged % leaves.len()].id(),
        leaves[hovered % leaves.len()].id(),
    )
}

#[test]
fn test_self_drop_is_rejected() {
    let description = LayoutDescription::split(
        SplitDirection::Vertical,
        0.2,
        LayoutDescription::item(1),
        LayoutDescription::split(
            SplitDirection::Horizontal,
            0.7,
            LayoutDescription::item(2),
            LayoutDescription::item(3),
        ),
    );
    let mut tree = GridTree::from_description(description, 1000.0, 1000.0).unwrap();
    let before = tree.clone();
    let five = NodeId::new(5).unwrap();

    let result = tree.restructure_by_drop(five, five, DropQuadrant::Top);

    assert_eq!(result, Err(GridError::SelfDrop(five)));
    assert_eq!(tree, before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_drop_preserves_leaves_and_tiling(
        description in description_strategy(),
        size in container_strategy(),
        dragged in 0usize..64,
        hovered in 0usize..64,
        quadrant in quadrant_strategy(),
    ) {
        let mut tree = build(description, size);
        let (dragged, hovered) = pick_leaves(&tree, dragged, hovered);
        if dragged == hovered {
            return Ok(());
        }

        let payloads = leaf_payloads(&tree);
        let node_count = tree.node_count();

        tree.restructure_by_drop(dragged, hovered, quadrant).unwrap();

        prop_assert_eq!(leaf_payloads(&tree), payloads);
        prop_assert_eq!(tree.node_count(), node_count);
        assert_well_formed(&tree)?;
        assert_tiles(&tree)?;
    }

    #[test]
    fn prop_dragged_lands_beside_hovered(
        description in description_strategy(),
        size in container_strategy(),
        dragged in 0usize..64,
        hovered in 0usize..64,
        quadrant in quadrant_strategy(),
    ) {
        let mut tree = build(description, size);
        let (dragged, hovered) = pick_leaves(&tree, dragged, hovered);
        if dragged == hovered {
            return Ok(());
        }

        tree.restructure_by_drop(dragged, hovered, quadrant).unwrap();

        let parent = tree.node(dragged).and_then(|node| node.parent()).unwrap();
        prop_assert_eq!(tree.node(hovered).and_then(|node| node.parent()), Some(parent));

        let split = *tree.node(parent).and_then(|node| node.as_split()).unwrap();
        prop_assert_eq!(split.direction, quadrant.split_direction());
        prop_assert_eq!(split.role_of(dragged), Some(quadrant.dragged_role()));
        prop_assert_eq!(split.sibling_of(dragged), Some(hovered));
    }

    #[test]
    fn prop_rejected_drop_leaves_tree_unchanged(
        description in description_strategy(),
        size in container_strategy(),
        dragged in 0usize..64,
        quadrant in quadrant_strategy(),
        bad_ratio in prop_oneof![Just(0.0), Just(1.0), 1.0..10.0f64, -10.0..0.0f64],
    ) {
        let mut tree = build(description, size);
        let before = tree.clone();
        let (dragged, _) = pick_leaves(&tree, dragged, 0);

        prop_assert_eq!(
            tree.restructure_by_drop(dragged, dragged, quadrant),
            Err(GridError::SelfDrop(dragged))
        );
        prop_assert_eq!(&tree, &before);

        let missing = tree.next_id();
        prop_assert_eq!(
            tree.restructure_by_drop(missing, dragged, quadrant),
            Err(GridError::NodeNotFound(missing))
        );
        prop_assert_eq!(&tree, &before);

        if let Some(split) = tree.splits().first().map(|node| node.id()) {
            prop_assert!(tree.restructure_by_drop(split, dragged, quadrant).is_err());
            prop_assert_eq!(&tree, &before);
        }

        let leaves = tree.leaves();
        if leaves.len() >= 2 {
            let (a, b) = (leaves[0].id(), leaves[1].id());
            prop_assert_eq!(
                tree.restructure_by_drop_with_ratio(a, b, quadrant, bad_ratio),
                Err(GridError::InvalidRatio(bad_ratio))
            );
            prop_assert_eq!(&tree, &before);
        }
    }

    #[test]
    fn prop_fresh_ids_are_never_reused(
        description in description_strategy(),
        drops in proptest::collection::vec((0usize..64, 0usize..64, quadrant_strategy()), 1..8),
    ) {
        let mut tree = build(description, (1000.0, 1000.0));
        let mut seen: BTreeSet<NodeId> = tree.nodes().map(|node| node.id()).collect();

        for (dragged, hovered, quadrant) in drops {
            let (dragged, hovered) = pick_leaves(&tree, dragged, hovered);
            if dragged == hovered {
                continue;
            }
            let high_water = tree.next_id();
            let live: BTreeSet<NodeId> = tree.nodes().map(|node| node.id()).collect();
            tree.restructure_by_drop(dragged, hovered, quadrant).unwrap();

            for node in tree.nodes() {
                let id = node.id();
                if !live.contains(&id) {
                    prop_assert!(!seen.contains(&id), "id {} was reused", id);
                    prop_assert!(id >= high_water);
                }
                seen.insert(id);
            }
            prop_assert!(tree.next_id() >= high_water);
        }

        prop_assert!(seen.iter().all(|id| *id < tree.next_id()));
        assert_well_formed(&tree)?;
    }
}
