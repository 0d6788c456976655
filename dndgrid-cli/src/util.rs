//! Shared utility functions used across command modules.

use std::path::Path;

use dndgrid_core::config::{ConfigManager, GridSettings};
use dndgrid_core::document::LayoutDocument;
use dndgrid_core::grid::{NodeId, Rect};

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads settings, falling back to defaults when no config directory exists
///
/// An explicit `--config` directory must hold valid settings if it has a
/// settings file at all.
pub fn load_settings(config_path: Option<&Path>) -> Result<GridSettings, CliError> {
    let manager = match create_config_manager(config_path) {
        Ok(manager) => manager,
        Err(_) if config_path.is_none() => return Ok(GridSettings::default()),
        Err(e) => return Err(e),
    };
    manager
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))
}

/// Loads a layout document
pub fn load_document(path: &Path) -> Result<LayoutDocument, CliError> {
    LayoutDocument::load(path).map_err(|e| CliError::Document(format!("{}: {e}", path.display())))
}

/// Parses comma-separated numbers, requiring exactly `N` of them
fn parse_numbers<const N: usize>(s: &str, shape: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {shape}, got `{s}`"));
    }
    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part
            .parse::<f64>()
            .map_err(|e| format!("invalid number `{part}` in `{s}`: {e}"))?;
        if !value.is_finite() {
            return Err(format!("non-finite number `{part}` in `{s}`"));
        }
    }
    Ok(values)
}

/// Parse a rectangle given as `LEFT,TOP,WIDTH,HEIGHT`
pub fn parse_rect(s: &str) -> Result<Rect, String> {
    let [left, top, width, height] = parse_numbers::<4>(s, "LEFT,TOP,WIDTH,HEIGHT")?;
    Ok(Rect {
        width,
        height,
        top,
        left,
    })
}

/// Parse a point given as `X,Y`
pub fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let [x, y] = parse_numbers::<2>(s, "X,Y")?;
    Ok((x, y))
}

/// Parse a positive node id
pub fn parse_node_id(s: &str) -> Result<NodeId, String> {
    let raw = s
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid node id `{s}`: {e}"))?;
    NodeId::new(raw).map_err(|e| e.to_string())
}
