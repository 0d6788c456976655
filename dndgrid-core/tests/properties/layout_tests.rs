//! Property-based tests for tree construction and geometry

use proptest::prelude::*;

use dndgrid_core::grid::{
    GridError, GridTree, IdScheme, LayoutDescription, NodeId, SplitDirection, parse,
};

use super::{assert_tiles, assert_well_formed, build, container_strategy, description_strategy};

fn item(name: &str) -> LayoutDescription<String> {
    LayoutDescription::item(name.to_string())
}

#[test]
fn test_ide_layout_geometry() {
    let description = LayoutDescription::split(
        SplitDirection::Vertical,
        0.2,
        item("sidebar"),
        LayoutDescription::split(SplitDirection::Horizontal, 0.7, item("editor"), item("terminal")),
    );
    let tree = GridTree::from_description(description, 1000.0, 1000.0).unwrap();

    let geometry: Vec<(String, [f64; 4])> = tree
        .leaves()
        .into_iter()
        .map(|leaf| {
            let r = leaf.rect();
            (leaf.payload().cloned().unwrap(), [r.width, r.height, r.top, r.left])
        })
        .collect();

    let expected = [
        ("sidebar", [200.0, 1000.0, 0.0, 0.0]),
        ("editor", [800.0, 700.0, 0.0, 200.0]),
        ("terminal", [800.0, 300.0, 700.0, 200.0]),
    ];
    assert_eq!(geometry.len(), expected.len());
    for ((name, actual), (expected_name, values)) in geometry.iter().zip(expected) {
        assert_eq!(name, expected_name);
        for (a, e) in actual.iter().zip(values) {
            assert!((a - e).abs() < 1e-9, "{name}: {actual:?} != {values:?}");
        }
    }
}

#[test]
fn test_out_of_range_ratio_is_rejected() {
    let description = LayoutDescription::split(
        SplitDirection::Horizontal,
        0.5,
        item("a"),
        LayoutDescription::split(SplitDirection::Vertical, 1.5, item("b"), item("c")),
    );
    let result = GridTree::from_description(description, 800.0, 600.0);
    assert_eq!(result, Err(GridError::InvalidRatio(1.5)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_leaves_tile_container(
        description in description_strategy(),
        size in container_strategy(),
    ) {
        let tree = build(description, size);
        assert_tiles(&tree)?;
        assert_well_formed(&tree)?;
    }

    #[test]
    fn prop_split_children_share_parent_rect(
        description in description_strategy(),
        size in container_strategy(),
    ) {
        let tree = build(description, size);
        for node in tree.splits() {
            let split = node.as_split().unwrap();
            let primary = tree.node(split.primary).unwrap().rect();
            let secondary = tree.node(split.secondary).unwrap().rect();
            let rect = node.rect();
            let area_error = (primary.area() + secondary.area() - rect.area()).abs();
            prop_assert!(area_error <= 1e-6 * rect.area().max(1.0));
            match split.direction {
                SplitDirection::Horizontal => {
                    prop_assert!((primary.height - rect.height * split.ratio.get()).abs() < 1e-6);
                    prop_assert!((secondary.top - primary.bottom()).abs() < 1e-6);
                }
                SplitDirection::Vertical => {
                    prop_assert!((primary.width - rect.width * split.ratio.get()).abs() < 1e-6);
                    prop_assert!((secondary.left - primary.right()).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn prop_recompute_layout_is_idempotent(
        description in description_strategy(),
        size in container_strategy(),
    ) {
        let mut tree = build(description, size);
        let before = tree.clone();
        tree.recompute_layout();
        prop_assert_eq!(tree, before);
    }

    #[test]
    fn prop_binary_ids_follow_position(description in description_strategy()) {
        let root = parse(description, IdScheme::Binary).unwrap();
        let tree = GridTree::build(root, 100.0, 100.0).unwrap();
        for node in tree.splits() {
            let split = node.as_split().unwrap();
            prop_assert_eq!(split.primary.get(), node.id().get() * 2);
            prop_assert_eq!(split.secondary.get(), node.id().get() * 2 + 1);
        }
        prop_assert_eq!(tree.root_id(), NodeId::ROOT);
    }

    #[test]
    fn prop_description_round_trips(
        description in description_strategy(),
        size in container_strategy(),
    ) {
        let tree = build(description.clone(), size);
        prop_assert_eq!(tree.to_description().unwrap(), description);
    }

    #[test]
    fn prop_resize_scales_leaves(
        description in description_strategy(),
        size in container_strategy(),
        factor in 0.5..3.0f64,
    ) {
        let mut tree = build(description, size);
        let before: Vec<_> = tree.leaves().into_iter().map(|leaf| leaf.rect()).collect();
        tree.resize(size.0 * factor, size.1 * factor).unwrap();
        for (old, leaf) in before.iter().zip(tree.leaves()) {
            let new = leaf.rect();
            prop_assert!((new.width - old.width * factor).abs() < 1e-6 * size.0 * factor);
            prop_assert!((new.left - old.left * factor).abs() < 1e-6 * size.0 * factor);
        }
    }
}
