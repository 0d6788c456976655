//! Property test modules and shared strategies

mod diff_tests;
mod layout_tests;
mod restructure_tests;

use proptest::prelude::*;

use dndgrid_core::grid::{DropQuadrant, GridTree, LayoutDescription, Rect, SplitDirection};

/// Tolerance for sums of floating point areas
pub const EPSILON: f64 = 1e-6;

/// Strategy for generating split directions
pub fn split_direction_strategy() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![
        Just(SplitDirection::Horizontal),
        Just(SplitDirection::Vertical),
    ]
}

/// Strategy for generating drop quadrants
pub fn quadrant_strategy() -> impl Strategy<Value = DropQuadrant> {
    prop::sample::select(DropQuadrant::ALL.to_vec())
}

/// Strategy for generating valid layout descriptions up to depth 5
pub fn description_strategy() -> impl Strategy<Value = LayoutDescription<u32>> {
    let leaf = any::<u32>().prop_map(LayoutDescription::item);
    leaf.prop_recursive(5, 32, 2, |inner| {
        (split_direction_strategy(), 0.05..0.95f64, inner.clone(), inner).prop_map(
            |(direction, ratio, primary, secondary)| {
                LayoutDescription::split(direction, ratio, primary, secondary)
            },
        )
    })
}

/// Strategy for generating container sizes
pub fn container_strategy() -> impl Strategy<Value = (f64, f64)> {
    (50.0..4000.0f64, 50.0..4000.0f64)
}

/// Builds a tree, failing the test case on a construction error
pub fn build(description: LayoutDescription<u32>, (width, height): (f64, f64)) -> GridTree<u32> {
    GridTree::from_description(description, width, height).expect("generated layouts are valid")
}

/// Area shared by two rectangles
pub fn overlap(a: &Rect, b: &Rect) -> f64 {
    let width = a.right().min(b.right()) - a.left.max(b.left);
    let height = a.bottom().min(b.bottom()) - a.top.max(b.top);
    width.max(0.0) * height.max(0.0)
}

/// Asserts the leaves tile the container without gaps or overlap
pub fn assert_tiles(tree: &GridTree<u32>) -> Result<(), TestCaseError> {
    let container = tree.container();
    let leaves = tree.leaves();
    let total: f64 = leaves.iter().map(|leaf| leaf.rect().area()).sum();
    prop_assert!(
        (total - container.area()).abs() <= EPSILON * container.area(),
        "leaf areas sum to {} instead of {}",
        total,
        container.area()
    );

    for (i, a) in leaves.iter().enumerate() {
        let rect = a.rect();
        prop_assert!(rect.width >= 0.0 && rect.height >= 0.0);
        prop_assert!(rect.left >= -EPSILON && rect.top >= -EPSILON);
        prop_assert!(rect.right() <= container.width + EPSILON);
        prop_assert!(rect.bottom() <= container.height + EPSILON);
        for b in &leaves[i + 1..] {
            prop_assert!(
                overlap(&rect, &b.rect()) <= EPSILON * container.area(),
                "leaves {} and {} overlap",
                a.id(),
                b.id()
            );
        }
    }
    Ok(())
}

/// Asserts parent pointers and split children agree
pub fn assert_well_formed(tree: &GridTree<u32>) -> Result<(), TestCaseError> {
    let root = tree.root_id();
    prop_assert!(tree.node(root).is_some_and(|node| node.parent().is_none()));
    prop_assert_eq!(tree.subtree_ids(root).len(), tree.node_count());

    for node in tree.nodes() {
        prop_assert!(node.id() < tree.next_id());
        if let Some(split) = node.as_split() {
            prop_assert!(split.primary != split.secondary);
            for child in [split.primary, split.secondary] {
                let child = tree.node(child);
                prop_assert!(child.is_some_and(|c| c.parent() == Some(node.id())));
            }
        }
    }
    Ok(())
}
