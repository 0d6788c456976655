//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use dndgrid_core::grid::{DropQuadrant, NodeId, Rect};

use crate::util::{parse_node_id, parse_point, parse_rect};

/// `DndGrid` command-line interface for inspecting and rearranging layouts
#[derive(Parser)]
#[command(name = "dndgrid")]
#[command(author, version, about = "DndGrid layout command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "DNDGRID_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build a layout and print leaf geometry
    #[command(about = "Build a layout file and print every leaf with its rectangle")]
    Layout {
        /// Layout document (JSON, YAML or TOML)
        file: PathBuf,

        /// Override the container width
        #[arg(short = 'W', long)]
        width: Option<f64>,

        /// Override the container height
        #[arg(short = 'H', long)]
        height: Option<f64>,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Validate a layout document
    #[command(about = "Check a layout file and report errors, warnings and suggestions")]
    Validate {
        /// Layout document (JSON, YAML or TOML)
        file: PathBuf,

        /// Enforce item count and depth limits
        #[arg(long)]
        strict: bool,
    },

    /// Print layout metadata
    #[command(about = "Count splits and items and rate the layout's complexity")]
    Analyze {
        /// Layout document (JSON, YAML or TOML)
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Drop one leaf onto another
    #[command(about = "Restructure a layout as if a leaf were dragged onto another")]
    Drop {
        /// Layout document (JSON, YAML or TOML)
        file: PathBuf,

        /// Id of the dragged leaf
        #[arg(short, long, value_parser = parse_node_id)]
        dragged: NodeId,

        /// Id of the leaf it is dropped on
        #[arg(long, value_parser = parse_node_id)]
        hovered: NodeId,

        /// Side of the hovered leaf
        #[arg(short = 'Q', long, value_enum)]
        quadrant: QuadrantArg,

        /// Write the restructured layout to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Hit-test a point against a rectangle
    #[command(about = "Print which drop quadrant of a rectangle a point falls in")]
    Quadrant {
        /// Rectangle as LEFT,TOP,WIDTH,HEIGHT
        #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
        rect: Rect,

        /// Point as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        point: (f64, f64),
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    #[default]
    Table,
    /// Output as JSON
    Json,
}

/// Drop quadrant options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum QuadrantArg {
    /// Above the hovered leaf
    Top,
    /// Left of the hovered leaf
    Left,
    /// Right of the hovered leaf
    Right,
    /// Below the hovered leaf
    Bottom,
}

impl From<QuadrantArg> for DropQuadrant {
    fn from(arg: QuadrantArg) -> Self {
        match arg {
            QuadrantArg::Top => Self::Top,
            QuadrantArg::Left => Self::Left,
            QuadrantArg::Right => Self::Right,
            QuadrantArg::Bottom => Self::Bottom,
        }
    }
}
