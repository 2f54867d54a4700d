//! CLI route: single route table and run context. Dispatches to the source,
//! merge, and presentation layers.

use crate::cli::parse::{Commands, GraphCommands};
use crate::cli::presentation;
use crate::config::{ConfigLoader, SkaConfig};
use crate::error::AppError;
use crate::graph::{union, CollisionAction, MergeOptions};
use crate::source::{TreeSource, WalkerConfig};
use std::path::{Path, PathBuf};

/// Runtime context for CLI execution: resolved configuration.
pub struct RunContext {
    config: SkaConfig,
}

impl RunContext {
    /// Create a run context from an optional config path. Without one, the
    /// working directory's `ska.toml` (if any) plus environment overrides
    /// apply.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, AppError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(Path::new("."))?,
        };
        Ok(Self { config })
    }

    /// Resolved configuration.
    pub fn config(&self) -> &SkaConfig {
        &self.config
    }

    /// Execute a parsed command, returning its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, AppError> {
        match command {
            Commands::Graph { command } => match command {
                GraphCommands::Build { path, format } => {
                    let built = self.source(path).build()?;
                    presentation::format_build_summary(&built, format)
                }
                GraphCommands::Print { path } => {
                    let built = self.source(path).build()?;
                    Ok(presentation::format_listing(&built.graph))
                }
                GraphCommands::Merge {
                    control,
                    overlays,
                    on_collision,
                } => {
                    let opts = self.merge_options(on_collision.as_deref())?;

                    let control_tree = self.source(control).build()?;
                    let mut skipped = control_tree.skipped;
                    let mut overlay_graphs = Vec::with_capacity(overlays.len());
                    for path in overlays {
                        let tree = self.source(path).build()?;
                        skipped.extend(tree.skipped);
                        overlay_graphs.push(tree.graph);
                    }

                    let merged = union(&opts, control_tree.graph, overlay_graphs)?;
                    Ok(presentation::format_merge_result(&merged, &skipped))
                }
            },
        }
    }

    fn merge_options(&self, on_collision: Option<&str>) -> Result<MergeOptions, AppError> {
        match on_collision {
            Some(value) => {
                let action = CollisionAction::parse(value)?;
                Ok(MergeOptions::new(action)?)
            }
            None => self.config.merge.merge_options(),
        }
    }

    fn source(&self, path: &Path) -> TreeSource {
        let walker_config = WalkerConfig {
            ignore_patterns: self.config.walker.ignore_patterns.clone(),
            ..WalkerConfig::default()
        };
        TreeSource::new(path.to_path_buf()).with_walker_config(walker_config)
    }
}
