//! N-way union of directory graphs
//!
//! Combines a control graph with overlay graphs sharing the same root key.
//! Control-side structure and content win at each key unless the collision
//! policy says otherwise; children discovered only in overlays are appended
//! after the control children, in overlay supply order.

use crate::error::GraphError;
use crate::graph::node::{CollisionAction, Graph, NodeKind};
use crate::types::NodeId;
use tracing::{debug, trace};

/// Merge configuration. The default collision action applies wherever a
/// colliding node declares [`CollisionAction::Default`].
#[derive(Debug, Clone)]
pub struct MergeOptions {
    default_collision_action: CollisionAction,
}

impl MergeOptions {
    /// Create merge options. `Default` is not a valid default action: it
    /// would leave a collision with nothing to defer to.
    pub fn new(default_collision_action: CollisionAction) -> Result<Self, GraphError> {
        if default_collision_action == CollisionAction::Default {
            return Err(GraphError::InvalidValue(
                "DEFAULT is not a valid default collision action".to_string(),
            ));
        }
        Ok(MergeOptions {
            default_collision_action,
        })
    }

    pub fn default_collision_action(&self) -> CollisionAction {
        self.default_collision_action
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            default_collision_action: CollisionAction::Overwrite,
        }
    }
}

/// Merge zero or more overlay graphs into a control graph.
///
/// Every overlay root key must equal the control root key. The first error
/// aborts the whole call; no partially merged graph is returned. On success
/// the returned graph is the control graph, mutated in place: shared
/// directories were recursed into, file collisions resolved per policy, and
/// overlay-only children appended.
pub fn union(
    opts: &MergeOptions,
    control: Graph,
    overlays: Vec<Graph>,
) -> Result<Graph, GraphError> {
    if overlays.is_empty() {
        return Ok(control);
    }

    let mut graph = control;
    let control_key = graph.key(graph.root())?.to_string();
    let mut overlay_roots = Vec::with_capacity(overlays.len());
    for overlay in overlays {
        let overlay_key = overlay.key(overlay.root())?.to_string();
        if overlay_key != control_key {
            return Err(GraphError::MismatchedRoot {
                control: control_key,
                overlay: overlay_key,
            });
        }
        overlay_roots.push(graph.absorb(overlay));
    }

    debug!(
        root = %control_key,
        overlays = overlay_roots.len(),
        "starting union"
    );

    let root = graph.root();
    let mut path = Vec::new();
    merge_nodes(opts, &mut graph, root, &overlay_roots, &mut path)?;

    debug!(node_count = graph.node_count(), "union completed");
    Ok(graph)
}

/// Merge a group of same-key nodes into the control-side node.
fn merge_nodes(
    opts: &MergeOptions,
    graph: &mut Graph,
    control: NodeId,
    overlays: &[NodeId],
    path: &mut Vec<String>,
) -> Result<(), GraphError> {
    if overlays.is_empty() {
        return Ok(());
    }

    let key = graph.key(control)?.to_string();
    match graph.kind(control)? {
        NodeKind::File => {
            for &overlay in overlays {
                if graph.kind(overlay)? == NodeKind::Directory {
                    return Err(GraphError::TypeMismatch {
                        path: path.join("/"),
                        key,
                    });
                }
            }
            resolve_file_content(opts, graph, control, overlays, path, &key)
        }
        NodeKind::Directory => {
            for &overlay in overlays {
                if graph.kind(overlay)? == NodeKind::File {
                    return Err(GraphError::TypeMismatch {
                        path: path.join("/"),
                        key,
                    });
                }
            }
            path.push(key);
            let result = merge_children(opts, graph, control, overlays, path);
            path.pop();
            result
        }
    }
}

/// Merge the children of same-key directories level by level.
fn merge_children(
    opts: &MergeOptions,
    graph: &mut Graph,
    control: NodeId,
    overlays: &[NodeId],
    path: &mut Vec<String>,
) -> Result<(), GraphError> {
    let mut merged_keys: Vec<String> = Vec::new();

    for child in graph.children(control) {
        let key = graph.key(child)?.to_string();
        // Duplicate sibling keys are degenerate input; the first occurrence
        // is canonical and later ones are left untouched.
        if merged_keys.contains(&key) {
            continue;
        }
        merged_keys.push(key.clone());

        let mut matches = Vec::new();
        for &overlay in overlays {
            for overlay_child in graph.children(overlay) {
                if graph.key(overlay_child)? == key {
                    matches.push(overlay_child);
                }
            }
        }

        merge_nodes(opts, graph, child, &matches, path)?;
    }

    // Combine the overlays among themselves, then append every key of the
    // combined view not already merged above. Appended subtrees carry over
    // unmodified from whichever overlay contributed them.
    let combined = overlays[0];
    if overlays.len() > 1 {
        merge_children(opts, graph, combined, &overlays[1..], path)?;
    }

    for link in graph.links(combined).to_vec() {
        let key = graph.key(link.target)?.to_string();
        if merged_keys.contains(&key) {
            continue;
        }
        trace!(key = %key, at = %path.join("/"), "appending overlay child");
        graph.add_child(control, link.target)?;
        merged_keys.push(key);
    }

    Ok(())
}

/// Resolve content for a group of same-key file nodes.
///
/// Overlays fold left-to-right against the current winner (initially the
/// control node), so under `Yield` the last colliding overlay wins. If every
/// contributing node declared `Yield` the control node keeps its content,
/// the last-resort tie-break.
fn resolve_file_content(
    opts: &MergeOptions,
    graph: &mut Graph,
    control: NodeId,
    overlays: &[NodeId],
    path: &[String],
    key: &str,
) -> Result<(), GraphError> {
    let mut all_declared_yield = graph.collision_action(control)? == CollisionAction::Yield;
    for &overlay in overlays {
        if graph.collision_action(overlay)? != CollisionAction::Yield {
            all_declared_yield = false;
        }
    }

    let mut winner: Option<NodeId> = None;
    for &overlay in overlays {
        let overlay_fp = match graph.fingerprint(overlay)? {
            Some(fp) => fp,
            None => continue,
        };
        let current = winner.unwrap_or(control);
        let current_fp = match graph.fingerprint(current)? {
            Some(fp) => fp,
            None => continue,
        };
        if current_fp == overlay_fp {
            continue;
        }

        let action = effective_action(
            graph.collision_action(current)?,
            graph.collision_action(overlay)?,
            opts.default_collision_action,
        );
        trace!(
            key = %key,
            at = %path.join("/"),
            action = %action,
            "resolving content collision"
        );
        match action {
            CollisionAction::Error => {
                return Err(GraphError::ContentCollision {
                    path: path.join("/"),
                    key: key.to_string(),
                });
            }
            CollisionAction::Overwrite => {}
            CollisionAction::Yield => {
                if !all_declared_yield {
                    winner = Some(overlay);
                }
            }
            // MergeOptions::new keeps Default out of the fold.
            CollisionAction::Default => {}
        }
    }

    if let Some(winner) = winner {
        graph.adopt_file_content(control, winner)?;
    }
    Ok(())
}

/// Per-pair effective action: the control side's declared preference wins,
/// then the overlay's, then the configured default.
fn effective_action(
    control: CollisionAction,
    overlay: CollisionAction,
    default: CollisionAction,
) -> CollisionAction {
    if control != CollisionAction::Default {
        control
    } else if overlay != CollisionAction::Default {
        overlay
    } else {
        default
    }
}
