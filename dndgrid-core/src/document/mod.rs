//! Layout documents
//!
//! A [`LayoutDocument`] is the on-disk form of a layout: the container size
//! plus a root [`LayoutDescription`] whose leaves name the component to
//! render. Documents are stored as JSON, YAML or TOML, chosen by file
//! extension.
//!
//! # Example
//!
//! ```rust,ignore
//! use dndgrid_core::document::LayoutDocument;
//!
//! let document = LayoutDocument::load(Path::new("ide.yaml"))?;
//! let tree = document.build_tree()?;
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::DragSettings;
use crate::grid::{DropQuadrant, GridError, GridTree, LayoutDescription, NodeId};
use crate::tracing::span_names;

/// Errors that can occur during document operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DocumentError {
    /// Failed to parse document
    #[error("Failed to parse document: {0}")]
    ParseError(String),

    /// Failed to serialize document
    #[error("Failed to serialize document: {0}")]
    SerializeError(String),

    /// I/O error during document operation
    #[error("I/O error: {0}")]
    IoError(String),

    /// The document describes an invalid layout
    #[error("Invalid layout: {0}")]
    InvalidLayout(#[from] GridError),
}

/// Result type for document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// Document format version for compatibility
pub const DOCUMENT_FORMAT_VERSION: u32 = 1;

const fn default_format_version() -> u32 {
    DOCUMENT_FORMAT_VERSION
}

/// Serialization format of a document file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// JSON (`.json`)
    #[default]
    Json,
    /// YAML (`.yaml`, `.yml`)
    Yaml,
    /// TOML (`.toml`)
    Toml,
}

impl DocumentFormat {
    /// Detects the format from a file extension.
    ///
    /// Returns `None` for unknown or missing extensions.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

/// Result of [`LayoutDocument::apply_drop`]
#[derive(Debug, Clone)]
pub struct AppliedDrop {
    /// The restructured layout, named like the source document
    pub document: LayoutDocument,
    /// The restructured tree
    pub tree: GridTree<String>,
    /// Ids whose geometry or structure changed
    pub affected: BTreeSet<NodeId>,
    /// Ids that no longer exist
    pub removed: BTreeSet<NodeId>,
}

/// A layout stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Document format version for compatibility
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// Optional human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Container width
    pub width: f64,
    /// Container height
    pub height: f64,
    /// Root of the layout; leaf payloads are component names
    pub child: LayoutDescription<String>,
}

impl LayoutDocument {
    /// Creates a document for the given container and layout
    #[must_use]
    pub const fn new(width: f64, height: f64, child: LayoutDescription<String>) -> Self {
        Self {
            format_version: DOCUMENT_FORMAT_VERSION,
            name: None,
            width,
            height,
            child,
        }
    }

    /// Sets the document name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds a layout tree at the document's container size
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidLayout` if the layout is malformed
    pub fn build_tree(&self) -> DocumentResult<GridTree<String>> {
        self.build_tree_with_size(self.width, self.height)
    }

    /// Builds a layout tree at a different container size
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidLayout` if the layout is malformed
    pub fn build_tree_with_size(
        &self,
        width: f64,
        height: f64,
    ) -> DocumentResult<GridTree<String>> {
        Ok(GridTree::from_description(self.child.clone(), width, height)?)
    }

    /// Captures the current structure of a tree
    ///
    /// # Errors
    ///
    /// Never fails on a tree built through the grid API
    pub fn from_tree(tree: &GridTree<String>) -> DocumentResult<Self> {
        Ok(Self::new(tree.width(), tree.height(), tree.to_description()?))
    }

    /// Builds the layout and moves `dragged` next to `hovered`
    ///
    /// A split created by the move gets the configured ratio.
    ///
    /// # Errors
    ///
    /// - `DndGridError::Config` if the configured split ratio is out of range
    /// - `DndGridError::Document` if the layout is malformed
    /// - `DndGridError::Grid` if the drop is rejected
    pub fn apply_drop(
        &self,
        drag: &DragSettings,
        dragged: NodeId,
        hovered: NodeId,
        quadrant: DropQuadrant,
    ) -> crate::Result<AppliedDrop> {
        let ratio = drag.split_ratio()?;
        let mut tree = self.build_tree()?;

        let snapshot = tree.create_snapshot();
        tree.restructure_by_drop_with_ratio(dragged, hovered, quadrant, ratio.get())?;
        let affected = tree.diff_with_snapshot(&snapshot);
        let removed = tree.removed_since(&snapshot);

        let mut document = Self::from_tree(&tree)?;
        document.name.clone_from(&self.name);
        Ok(AppliedDrop {
            document,
            tree,
            affected,
            removed,
        })
    }

    /// Component names of all leaves, in pre-order
    #[must_use]
    pub fn component_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut stack = vec![&self.child];
        while let Some(node) = stack.pop() {
            match node {
                LayoutDescription::Item { payload, .. } => names.push(payload.as_str()),
                LayoutDescription::Split {
                    primary, secondary, ..
                } => {
                    if let Some(secondary) = secondary {
                        stack.push(secondary);
                    }
                    if let Some(primary) = primary {
                        stack.push(primary);
                    }
                }
            }
        }
        names
    }

    /// Serializes the document to JSON
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::SerializeError` if serialization fails
    pub fn to_json(&self) -> DocumentResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::SerializeError(e.to_string()))
    }

    /// Deserializes a document from JSON
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::ParseError` if parsing fails
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        serde_json::from_str(json).map_err(|e| DocumentError::ParseError(e.to_string()))
    }

    /// Serializes the document to YAML
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::SerializeError` if serialization fails
    pub fn to_yaml(&self) -> DocumentResult<String> {
        serde_yaml::to_string(self).map_err(|e| DocumentError::SerializeError(e.to_string()))
    }

    /// Deserializes a document from YAML
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::ParseError` if parsing fails
    pub fn from_yaml(yaml: &str) -> DocumentResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| DocumentError::ParseError(e.to_string()))
    }

    /// Serializes the document to TOML
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::SerializeError` if serialization fails
    pub fn to_toml(&self) -> DocumentResult<String> {
        toml::to_string_pretty(self).map_err(|e| DocumentError::SerializeError(e.to_string()))
    }

    /// Deserializes a document from TOML
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::ParseError` if parsing fails
    pub fn from_toml(content: &str) -> DocumentResult<Self> {
        toml::from_str(content).map_err(|e| DocumentError::ParseError(e.to_string()))
    }

    /// Serializes the document in the given format
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::SerializeError` if serialization fails
    pub fn serialize(&self, format: DocumentFormat) -> DocumentResult<String> {
        match format {
            DocumentFormat::Json => self.to_json(),
            DocumentFormat::Yaml => self.to_yaml(),
            DocumentFormat::Toml => self.to_toml(),
        }
    }

    /// Deserializes a document in the given format
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::ParseError` if parsing fails
    pub fn deserialize(content: &str, format: DocumentFormat) -> DocumentResult<Self> {
        match format {
            DocumentFormat::Json => Self::from_json(content),
            DocumentFormat::Yaml => Self::from_yaml(content),
            DocumentFormat::Toml => Self::from_toml(content),
        }
    }

    /// Loads a document from a file
    ///
    /// The format follows the file extension. Files without a known
    /// extension are tried as JSON, then YAML, then TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> DocumentResult<Self> {
        let _span =
            crate::trace_operation!(span_names::DOCUMENT_LOAD, path = %path.display()).entered();
        let content =
            std::fs::read_to_string(path).map_err(|e| DocumentError::IoError(e.to_string()))?;

        let document = match DocumentFormat::from_path(path) {
            Some(format) => Self::deserialize(&content, format)?,
            None => Self::from_json(&content)
                .or_else(|_| Self::from_yaml(&content))
                .or_else(|_| Self::from_toml(&content))?,
        };
        debug!(path = %path.display(), "Loaded layout document");
        Ok(document)
    }

    /// Saves the document to a file, in the format given by its extension
    ///
    /// Files without a known extension are written as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or written
    pub fn save(&self, path: &Path) -> DocumentResult<()> {
        let _span =
            crate::trace_operation!(span_names::DOCUMENT_SAVE, path = %path.display()).entered();
        let format = DocumentFormat::from_path(path).unwrap_or_default();
        let content = self.serialize(format)?;
        std::fs::write(path, content).map_err(|e| DocumentError::IoError(e.to_string()))?;
        debug!(path = %path.display(), %format, "Saved layout document");
        Ok(())
    }
}
