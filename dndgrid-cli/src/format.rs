//! Output formatting helpers shared by command modules.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use dndgrid_core::grid::{GridTree, NodeId, Rect};
use serde::Serialize;

/// One leaf of a built layout, as printed by `layout` and `drop`
#[derive(Debug, Serialize)]
pub struct LeafRow<'a> {
    /// Node id
    pub id: u64,
    /// Component name
    pub component: &'a str,
    /// Absolute rectangle
    pub rect: Rect,
}

/// Collects leaves in pre-order
pub fn leaf_rows(tree: &GridTree<String>) -> Vec<LeafRow<'_>> {
    tree.leaves()
        .into_iter()
        .map(|leaf| LeafRow {
            id: leaf.id().get(),
            component: leaf.payload().map_or("", String::as_str),
            rect: leaf.rect(),
        })
        .collect()
}

/// Formats leaves as an aligned table
#[must_use]
pub fn format_leaf_table(rows: &[LeafRow<'_>]) -> String {
    let id_width = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(2).max(2);
    let name_width = rows.iter().map(|r| r.component.len()).max().unwrap_or(9).max(9);

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<id_width$}  {:<name_width$}  {:>10}  {:>10}  {:>10}  {:>10}",
        "ID", "COMPONENT", "WIDTH", "HEIGHT", "TOP", "LEFT"
    );
    let _ = writeln!(output, "{}", "-".repeat(id_width + name_width + 4 + 4 * 12));
    for row in rows {
        let _ = writeln!(
            output,
            "{:<id_width$}  {:<name_width$}  {:>10}  {:>10}  {:>10}  {:>10}",
            row.id,
            row.component,
            format_number(row.rect.width),
            format_number(row.rect.height),
            format_number(row.rect.top),
            format_number(row.rect.left),
        );
    }
    output.trim_end().to_string()
}

/// Formats a coordinate with at most two decimals, trimming trailing zeros
#[must_use]
pub fn format_number(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats ids as a comma-separated list, or `none`
#[must_use]
pub fn format_ids(ids: &BTreeSet<NodeId>) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
