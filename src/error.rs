//! Error types for the Ska scaffolding system.

use crate::types::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Graph model and merge errors
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{reason}: {key}")]
    InvalidOperation { key: String, reason: String },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("node {0} has no parent")]
    NoParent(String),

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("mismatched roots: {overlay} does not match {control}")]
    MismatchedRoot { control: String, overlay: String },

    #[error("content collision at {path} on key {key}")]
    ContentCollision { path: String, key: String },

    #[error("type mismatch at {path} on key {key}")]
    TypeMismatch { path: String, key: String },
}

/// Traversal errors raised while building a graph from a directory
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("root path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Application-level errors for the CLI and configuration surface
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
