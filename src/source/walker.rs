//! Filesystem walker for traversing directory structures

use crate::error::SourceError;
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// Filesystem entry types
#[derive(Debug, Clone)]
pub enum Entry {
    /// A regular file
    File { path: PathBuf },
    /// A directory
    Directory { path: PathBuf },
}

impl Entry {
    pub fn path(&self) -> &PathBuf {
        match self {
            Entry::File { path } | Entry::Directory { path } => path,
        }
    }
}

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    pub follow_symlinks: bool,
    /// Directory or file names to skip entirely
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: vec![".git".to_string()],
            max_depth: None,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the filesystem and collect all entries
    ///
    /// Returns entries sorted by path, so a parent directory always sorts
    /// before anything beneath it.
    pub fn walk(&self) -> Result<Vec<Entry>, SourceError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            let entry = entry.map_err(|e| {
                SourceError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("failed to walk directory: {}", e),
                ))
            })?;

            if self.should_ignore(&entry) {
                continue;
            }

            let path = entry.path().to_path_buf();

            // The root itself is represented by the graph root node.
            if path == self.root {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_file() {
                entries.push(Entry::File { path });
            } else if file_type.is_dir() {
                entries.push(Entry::Directory { path });
            }
            // Symlinks are skipped when not followed.
        }

        entries.sort_by(|a, b| a.path().cmp(b.path()));

        Ok(entries)
    }

    fn should_ignore(&self, entry: &DirEntry) -> bool {
        for component in entry.path().components() {
            if let std::path::Component::Normal(name) = component {
                let name = name.to_string_lossy();
                if self
                    .config
                    .ignore_patterns
                    .iter()
                    .any(|pattern| name == pattern.as_str())
                {
                    return true;
                }
            }
        }
        false
    }
}
