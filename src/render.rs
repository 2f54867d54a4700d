//! Console rendering of a graph as an indented listing
//!
//! Read-only over the graph; one line per node, two-space indentation per
//! level, directories tagged `[DIR]` and files tagged with their action.

use crate::graph::{Graph, NodeKind};
use crate::types::NodeId;

/// Render the whole graph starting at its root.
pub fn render_tree(graph: &Graph) -> Vec<String> {
    render_node(graph, graph.root(), 0)
}

/// Render a node and its descendants, depth-first in link order.
pub fn render_node(graph: &Graph, id: NodeId, depth: usize) -> Vec<String> {
    let mut lines = Vec::new();

    let tag = match graph.kind(id) {
        Ok(NodeKind::Directory) => "[DIR]".to_string(),
        Ok(NodeKind::File) => match graph.action(id) {
            Ok(action) => format!("[FILE:{}]", action),
            Err(_) => "[FILE]".to_string(),
        },
        Err(_) => return lines,
    };
    let key = match graph.key(id) {
        Ok(key) => key,
        Err(_) => return lines,
    };

    lines.push(format!("{}{} {}", "  ".repeat(depth), tag, key));

    for child in graph.children(id) {
        lines.extend(render_node(graph, child, depth + 1));
    }
    lines
}
