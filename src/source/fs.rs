//! Filesystem source: build a directory graph from a real directory tree

use crate::error::SourceError;
use crate::graph::Graph;
use crate::source::walker::{Entry, Walker, WalkerConfig};
use crate::types::NodeId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, trace, warn};

/// A graph built from the filesystem, plus the files whose content could not
/// be read. Skipped files are present in the graph but contentless.
#[derive(Debug)]
pub struct BuiltTree {
    pub graph: Graph,
    pub skipped: Vec<PathBuf>,
}

/// Builds directory graphs from a filesystem root
pub struct TreeSource {
    root: PathBuf,
    walker_config: Option<WalkerConfig>,
}

impl TreeSource {
    /// Create a new source for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: None,
        }
    }

    /// Set walker config (ignore patterns, etc.). When set, the walker uses
    /// this config instead of the default.
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = Some(config);
        self
    }

    /// Build a graph mirroring the filesystem under the root.
    ///
    /// Subdirectories become directory nodes, regular files become file
    /// nodes with their content fingerprinted. A file whose bytes cannot be
    /// read stays in the graph contentless and is reported in
    /// [`BuiltTree::skipped`].
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<BuiltTree, SourceError> {
        let start = Instant::now();

        let root = dunce::canonicalize(&self.root).map_err(|e| {
            SourceError::InvalidPath(format!(
                "failed to canonicalize {}: {}",
                self.root.display(),
                e
            ))
        })?;
        let metadata = std::fs::metadata(&root)?;
        if !metadata.is_dir() {
            return Err(SourceError::NotADirectory(root));
        }

        let walker = match &self.walker_config {
            Some(config) => Walker::with_config(root.clone(), config.clone()),
            None => Walker::new(root.clone()),
        };
        let entries = walker.walk()?;
        debug!(entry_count = entries.len(), "walked filesystem");

        let root_key = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.to_string_lossy().into_owned());
        let mut graph = Graph::with_directory_root(root_key);

        let mut dir_ids: HashMap<PathBuf, NodeId> = HashMap::new();
        dir_ids.insert(root.clone(), graph.root());
        let mut skipped = Vec::new();

        // Entries are path-sorted, so every parent directory is registered
        // before its children show up.
        for entry in entries {
            let parent_id = entry
                .path()
                .parent()
                .and_then(|parent| dir_ids.get(parent).copied())
                .ok_or_else(|| {
                    SourceError::InvalidPath(format!(
                        "no parent directory for {}",
                        entry.path().display()
                    ))
                })?;

            match entry {
                Entry::Directory { path } => {
                    let key = node_key(&path);
                    let id = graph.add_directory(key);
                    graph.add_child(parent_id, id)?;
                    dir_ids.insert(path, id);
                }
                Entry::File { path } => {
                    let key = node_key(&path);
                    let id = graph.add_file(key);
                    match std::fs::read(&path) {
                        Ok(content) => {
                            graph.set_content(id, &content)?;
                            if let Ok(Some(fp)) = graph.fingerprint(id) {
                                trace!(path = %path.display(), fingerprint = %hex::encode(fp), "fingerprinted file");
                            }
                        }
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "skipping unreadable file");
                            skipped.push(path.clone());
                        }
                    }
                    graph.add_child(parent_id, id)?;
                }
            }
        }

        info!(
            node_count = graph.node_count(),
            skipped = skipped.len(),
            duration_ms = start.elapsed().as_millis(),
            "tree build completed"
        );

        Ok(BuiltTree { graph, skipped })
    }
}

fn node_key(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Build a graph from a directory with the default walker configuration.
pub fn build_tree(root: &Path) -> Result<BuiltTree, SourceError> {
    TreeSource::new(root.to_path_buf()).build()
}
