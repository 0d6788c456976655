//! `DndGrid` Core Library
//!
//! This crate provides the layout engine behind a drag-and-drop panel grid:
//! a binary-split layout tree, geometry derivation, restructuring on drop,
//! snapshot diffing, and the document and settings formats around them.
//!
//! # Crate Structure
//!
//! - [`grid`] - Layout tree, parser, geometry, restructuring, diff and views
//! - [`document`] - Layout documents in JSON, YAML and TOML
//! - [`analysis`] - Complexity metrics and document validation
//! - [`config`] - Settings and persistence
//! - [`tracing`] - Structured logging setup and span names
//! - [`error`] - Aggregated error types

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod grid;
pub mod tracing;

// Convenience re-exports for the types most callers touch. Everything else
// is reachable through its module path.
pub use analysis::{LayoutMetadata, PerformanceRating, ValidationReport, Validator};
pub use config::{ConfigManager, GridSettings};
pub use document::{AppliedDrop, DocumentError, DocumentFormat, DocumentResult, LayoutDocument};
pub use error::{ConfigError, ConfigResult, DndGridError, Result};
pub use grid::{
    ChildRole, ComponentNode, DragSession, DropOutcome, DropQuadrant, GridError, GridNode,
    GridResult, GridTree, IdScheme, LayoutDescription, NodeId, Ratio, Rect, SplitDirection,
    TreeSnapshot,
};
pub use crate::tracing::{TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing};
