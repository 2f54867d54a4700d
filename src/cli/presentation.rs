//! CLI presentation: format domain results for the console.

use crate::error::AppError;
use crate::graph::Graph;
use crate::render;
use crate::source::BuiltTree;
use serde_json::json;

/// Format a build result as a summary (text or json).
pub fn format_build_summary(built: &BuiltTree, format: &str) -> Result<String, AppError> {
    let graph = &built.graph;
    let root = graph.root();
    let root_key = graph.key(root)?;
    let root_kind = graph.kind(root)?;

    if format == "json" {
        let out = json!({
            "root": root_key,
            "kind": root_kind.to_string(),
            "nodes": graph.node_count(),
            "skipped": built
                .skipped
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        });
        return serde_json::to_string_pretty(&out).map_err(|e| AppError::Config(e.to_string()));
    }

    let mut s = format!(
        "Successfully built graph\nRoot node: {} ({})\nNodes: {}",
        root_key,
        root_kind,
        graph.node_count()
    );
    if !built.skipped.is_empty() {
        s.push_str(&format!(
            "\n\nSkipped unreadable files ({}):",
            built.skipped.len()
        ));
        for path in &built.skipped {
            s.push_str(&format!("\n  - {}", path.display()));
        }
    }
    Ok(s)
}

/// Format a graph as its indented listing.
pub fn format_listing(graph: &Graph) -> String {
    render::render_tree(graph).join("\n")
}

/// Format a merge result: the merged listing plus any skipped-file report.
pub fn format_merge_result(merged: &Graph, skipped: &[std::path::PathBuf]) -> String {
    let mut s = format_listing(merged);
    if !skipped.is_empty() {
        s.push_str(&format!(
            "\n\nSkipped unreadable files ({}):",
            skipped.len()
        ));
        for path in skipped {
            s.push_str(&format!("\n  - {}", path.display()));
        }
    }
    s
}
