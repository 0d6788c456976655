//! Drag session integration tests
//!
//! Tests that a full gesture (start, hover, pointer moves, release) ends in
//! the expected tree, affected set and refreshed views.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use dndgrid_core::config::GridSettings;
use dndgrid_core::grid::{
    DragSession, DropOutcome, DropQuadrant, GridError, GridTree, LayoutDescription, NodeId,
    NodeViews, SplitDirection,
};

fn id(raw: u64) -> NodeId {
    NodeId::new(raw).unwrap()
}

fn ids(raw: &[u64]) -> BTreeSet<NodeId> {
    raw.iter().copied().map(id).collect()
}

/// sidebar | (editor / terminal) in 1000x1000
///
/// Ids: 1 root, 2 sidebar, 3 right split, 6 editor, 7 terminal
fn ide_tree() -> GridTree<String> {
    let item = |name: &str| LayoutDescription::item(name.to_string());
    let description = LayoutDescription::split(
        SplitDirection::Vertical,
        0.2,
        item("sidebar"),
        LayoutDescription::split(SplitDirection::Horizontal, 0.7, item("editor"), item("terminal")),
    );
    GridTree::from_description(description, 1000.0, 1000.0).unwrap()
}

#[test]
fn test_full_gesture_moves_sidebar_beside_terminal() {
    let mut tree = ide_tree();
    let views = NodeViews::new(&tree).unwrap();
    let start = Instant::now();

    let mut session = DragSession::start(&tree, id(2)).unwrap();
    assert!(session.hover(&tree, Some(id(7))));
    assert_eq!(session.pointer_moved(&tree, 990.0, 850.0, start), Some(DropQuadrant::Right));

    let outcome = session.finish(&mut tree).unwrap();
    let DropOutcome::Applied { affected, removed } = outcome else {
        panic!("drop was not applied");
    };
    assert_eq!(removed, ids(&[1]));
    assert_eq!(affected, ids(&[2, 3, 6, 7, 8]));

    assert_eq!(tree.root_id(), id(3));
    let new_split = tree.node(id(8)).and_then(|node| node.as_split()).copied().unwrap();
    assert_eq!(new_split.direction, SplitDirection::Vertical);
    assert_eq!((new_split.primary, new_split.secondary), (id(7), id(2)));

    let sidebar = tree.node(id(2)).unwrap().rect();
    assert_eq!(
        [sidebar.width, sidebar.height, sidebar.top, sidebar.left],
        [500.0, 300.0, 700.0, 500.0]
    );

    let refreshed = views.refresh(&tree, &affected).unwrap();
    let repainted: Vec<&str> = refreshed
        .changed_items(&views)
        .into_iter()
        .filter_map(|view| view.payload().map(String::as_str))
        .collect();
    assert_eq!(repainted, vec!["editor", "terminal", "sidebar"]);
}

#[test]
fn test_pointer_moves_are_throttled() {
    let tree = ide_tree();
    let start = Instant::now();
    let mut session = DragSession::start(&tree, id(2)).unwrap();
    session.hover(&tree, Some(id(7)));

    assert_eq!(session.pointer_moved(&tree, 990.0, 850.0, start), Some(DropQuadrant::Right));
    // Within one frame the left half is ignored
    assert_eq!(
        session.pointer_moved(&tree, 210.0, 850.0, start + Duration::from_millis(5)),
        Some(DropQuadrant::Right)
    );
    assert_eq!(
        session.pointer_moved(&tree, 210.0, 850.0, start + Duration::from_millis(20)),
        Some(DropQuadrant::Left)
    );
}

#[test]
fn test_sibling_drop_reorders_in_place() {
    let mut tree = ide_tree();
    let start = Instant::now();

    let mut session = DragSession::start(&tree, id(7)).unwrap();
    session.hover(&tree, Some(id(6)));
    // Upper triangle of the editor
    assert_eq!(session.pointer_moved(&tree, 600.0, 10.0, start), Some(DropQuadrant::Top));

    let outcome = session.finish(&mut tree).unwrap();
    assert_eq!(outcome.affected(), Some(&ids(&[3, 6, 7])));
    assert_eq!(tree.node_count(), 5);

    let terminal = tree.node(id(7)).unwrap().rect();
    assert_eq!([terminal.top, terminal.left], [0.0, 200.0]);
}

#[test]
fn test_gesture_without_quadrant_is_cancelled() {
    let mut tree = ide_tree();
    let before = tree.clone();

    let mut session = DragSession::start(&tree, id(2)).unwrap();
    session.hover(&tree, Some(id(6)));
    assert_eq!(session.finish(&mut tree).unwrap(), DropOutcome::Cancelled);

    let mut session = DragSession::start(&tree, id(2)).unwrap();
    session.hover(&tree, Some(id(6)));
    session.pointer_moved(&tree, 500.0, 100.0, Instant::now());
    session.hover(&tree, None);
    assert_eq!(session.finish(&mut tree).unwrap(), DropOutcome::Cancelled);

    assert_eq!(tree, before);
}

#[test]
fn test_refused_targets_are_ignored() {
    let mut tree = ide_tree();
    tree.set_allow_drop(id(6), false).unwrap();

    let mut session = DragSession::start(&tree, id(2)).unwrap();
    assert!(!session.hover(&tree, Some(id(6))));
    assert!(!session.hover(&tree, Some(id(2))));
    assert!(!session.hover(&tree, Some(id(3))));
    assert!(session.target().is_none());

    assert_eq!(DragSession::start(&tree, id(3)), Err(GridError::NotALeaf(id(3))));
    assert_eq!(DragSession::start(&tree, id(99)), Err(GridError::NodeNotFound(id(99))));
}

#[test]
fn test_settings_drive_session() {
    let mut settings = GridSettings::default();
    settings.drag.new_split_ratio = 0.25;
    settings.drag.move_throttle_ms = 100;

    let mut tree = ide_tree();
    let start = Instant::now();
    let mut session = DragSession::start(&tree, id(6))
        .unwrap()
        .with_throttle(settings.drag.throttle())
        .with_split_ratio(settings.drag.split_ratio().unwrap());

    session.hover(&tree, Some(id(2)));
    assert_eq!(session.pointer_moved(&tree, 100.0, 990.0, start), Some(DropQuadrant::Bottom));
    assert_eq!(
        session.pointer_moved(&tree, 100.0, 10.0, start + Duration::from_millis(50)),
        Some(DropQuadrant::Bottom)
    );
    session.finish(&mut tree).unwrap();

    // Sidebar keeps a quarter of its column; the editor takes the rest
    let split = tree.node(id(2)).and_then(|node| node.parent()).unwrap();
    let ratio = tree.node(split).and_then(|node| node.as_split()).map(|s| s.ratio.get());
    assert_eq!(ratio, Some(0.25));
    let editor = tree.node(id(6)).unwrap().rect();
    assert_eq!([editor.height, editor.top], [750.0, 250.0]);
}
