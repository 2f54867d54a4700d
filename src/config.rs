//! Configuration System
//!
//! Layered configuration: built-in defaults, then an optional `ska.toml` in
//! the working directory, then `SKA_`-prefixed environment variables.

use crate::error::AppError;
use crate::graph::{CollisionAction, MergeOptions};
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkaConfig {
    /// Merge behavior
    #[serde(default)]
    pub merge: MergeConfig,

    /// Traversal behavior
    #[serde(default)]
    pub walker: WalkerSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SkaConfig {
    fn default() -> Self {
        Self {
            merge: MergeConfig::default(),
            walker: WalkerSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Merge behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Collision action applied when a colliding node declares no preference:
    /// error, overwrite, or yield
    #[serde(default = "default_collision_action")]
    pub default_collision_action: String,
}

fn default_collision_action() -> String {
    "overwrite".to_string()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            default_collision_action: default_collision_action(),
        }
    }
}

impl MergeConfig {
    /// Resolve the configured default into merge options.
    pub fn merge_options(&self) -> Result<MergeOptions, AppError> {
        let action = CollisionAction::parse(&self.default_collision_action)?;
        Ok(MergeOptions::new(action)?)
    }
}

/// Traversal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerSettings {
    /// Directory or file names to skip entirely
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

fn default_ignore_patterns() -> Vec<String> {
    vec![".git".to_string()]
}

impl Default for WalkerSettings {
    fn default() -> Self {
        Self {
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

/// Configuration loader facade
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a working directory: defaults, `ska.toml` if
    /// present, then `SKA_`-prefixed environment overrides.
    pub fn load(dir: &Path) -> Result<SkaConfig, AppError> {
        let mut builder = Config::builder()
            .set_default("merge.default_collision_action", default_collision_action())?;

        let config_path = dir.join("ska.toml");
        if config_path.exists() {
            builder = builder.add_source(File::from(config_path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("SKA").separator("__"));

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load configuration from an explicit file path.
    pub fn load_from_file(path: &Path) -> Result<SkaConfig, AppError> {
        let config = Config::builder()
            .set_default("merge.default_collision_action", default_collision_action())?
            .add_source(File::from(path.to_path_buf()))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
