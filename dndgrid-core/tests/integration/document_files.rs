//! Document and settings file integration tests
//!
//! Tests that layouts written to disk in each supported format load back
//! into identical trees, and that restructured trees survive a save.

use dndgrid_core::config::{ConfigManager, GridSettings};
use dndgrid_core::document::{DocumentError, DocumentFormat, LayoutDocument};
use dndgrid_core::error::ConfigError;
use dndgrid_core::grid::{DropQuadrant, GridError, LayoutDescription, NodeId, SplitDirection};
use tempfile::TempDir;

fn item(name: &str) -> LayoutDescription<String> {
    LayoutDescription::item(name.to_string())
}

/// Sidebar | (Editor / Terminal) in a 1000x1000 container
fn ide_document() -> LayoutDocument {
    LayoutDocument::new(
        1000.0,
        1000.0,
        LayoutDescription::split(
            SplitDirection::Vertical,
            0.2,
            item("Sidebar"),
            LayoutDescription::split(
                SplitDirection::Horizontal,
                0.7,
                item("Editor"),
                item("Terminal"),
            ),
        ),
    )
    .with_name("ide")
}

fn leaf_geometry(document: &LayoutDocument) -> Vec<(String, [f64; 4])> {
    let tree = document.build_tree().unwrap();
    tree.leaves()
        .into_iter()
        .map(|leaf| {
            let r = leaf.rect();
            (leaf.payload().cloned().unwrap(), [r.width, r.height, r.top, r.left])
        })
        .collect()
}

#[test]
fn test_every_format_round_trips_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let document = ide_document();

    for file in ["layout.json", "layout.yaml", "layout.yml", "layout.toml"] {
        let path = temp_dir.path().join(file);
        document.save(&path).unwrap();
        let loaded = LayoutDocument::load(&path).unwrap();
        assert_eq!(loaded, document, "round trip through {file}");
        assert_eq!(leaf_geometry(&loaded), leaf_geometry(&document));
    }
}

#[test]
fn test_unknown_extension_is_detected_from_content() {
    let temp_dir = TempDir::new().unwrap();
    let document = ide_document();

    for format in [DocumentFormat::Json, DocumentFormat::Yaml, DocumentFormat::Toml] {
        let path = temp_dir.path().join(format!("layout-{format}"));
        std::fs::write(&path, document.serialize(format).unwrap()).unwrap();
        assert_eq!(LayoutDocument::load(&path).unwrap(), document, "sniffing {format}");
    }
}

#[test]
fn test_hand_written_json_builds() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hand.json");
    std::fs::write(
        &path,
        r#"{
            "width": 1200,
            "height": 800,
            "child": {
                "type": "split",
                "direction": "horizontal",
                "ratio": 0.25,
                "primary": { "type": "item", "component": "Toolbar", "allow_drop": false },
                "secondary": { "type": "item", "component": "Canvas" }
            }
        }"#,
    )
    .unwrap();

    let document = LayoutDocument::load(&path).unwrap();
    let tree = document.build_tree().unwrap();
    let toolbar = tree.node(NodeId::new(2).unwrap()).unwrap();
    assert_eq!(toolbar.rect().height, 200.0);
    assert_eq!(toolbar.as_item().map(|item| item.allow_drop), Some(false));
    assert_eq!(document.component_names(), vec!["Toolbar", "Canvas"]);
}

#[test]
fn test_malformed_layouts_are_reported() {
    let temp_dir = TempDir::new().unwrap();

    let missing = temp_dir.path().join("missing.json");
    assert!(matches!(LayoutDocument::load(&missing), Err(DocumentError::IoError(_))));

    let garbage = temp_dir.path().join("garbage.json");
    std::fs::write(&garbage, "{ not json").unwrap();
    assert!(matches!(LayoutDocument::load(&garbage), Err(DocumentError::ParseError(_))));

    let bad_ratio = temp_dir.path().join("ratio.yaml");
    std::fs::write(
        &bad_ratio,
        r"
width: 1000
height: 1000
child:
  type: split
  direction: vertical
  ratio: 1.5
  primary: {type: item, component: A}
  secondary: {type: item, component: B}
",
    )
    .unwrap();
    let document = LayoutDocument::load(&bad_ratio).unwrap();
    assert_eq!(
        document.build_tree(),
        Err(DocumentError::InvalidLayout(GridError::InvalidRatio(1.5)))
    );
}

#[test]
fn test_unparseable_extensionless_file_reports_once() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("layout");
    std::fs::write(&path, "{ not json").unwrap();

    let err = LayoutDocument::load(&path).unwrap_err();
    assert!(matches!(err, DocumentError::ParseError(_)));
    assert_eq!(err.to_string().matches("Failed to parse document").count(), 1);
}

#[test]
fn test_restructured_tree_saves_and_reloads() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("after.toml");

    let mut tree = ide_document().build_tree().unwrap();
    // Sidebar onto the terminal's right half
    tree.restructure_by_drop(NodeId::new(2).unwrap(), NodeId::new(7).unwrap(), DropQuadrant::Right)
        .unwrap();

    LayoutDocument::from_tree(&tree).unwrap().save(&path).unwrap();
    let reloaded = LayoutDocument::load(&path).unwrap();

    assert_eq!(reloaded.component_names(), vec!["Editor", "Terminal", "Sidebar"]);
    assert_eq!(
        leaf_geometry(&reloaded),
        vec![
            ("Editor".to_string(), [1000.0, 700.0, 0.0, 0.0]),
            ("Terminal".to_string(), [500.0, 300.0, 700.0, 0.0]),
            ("Sidebar".to_string(), [500.0, 300.0, 700.0, 500.0]),
        ]
    );
}

#[test]
fn test_settings_round_trip_and_validation() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(temp_dir.path().join("dndgrid"));

    let mut settings = GridSettings::default();
    settings.drag.move_throttle_ms = 33;
    settings.drag.new_split_ratio = 0.3;
    settings.logging.level = "debug".to_string();
    manager.save_settings(&settings).unwrap();
    assert_eq!(manager.load_settings().unwrap(), settings);

    std::fs::write(manager.settings_path(), "[drag]\nnew_split_ratio = 1.5\n").unwrap();
    let err = manager.load_settings().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation { ref field, .. } if field == "drag.new_split_ratio"
    ));
}
