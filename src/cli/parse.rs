//! CLI parse: clap types for Ska. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ska CLI - scaffold repository and directory structures
#[derive(Parser)]
#[command(name = "ska")]
#[command(about = "A tool for scaffolding repository or directory structures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Operations on directory graphs
    Graph {
        #[command(subcommand)]
        command: GraphCommands,
    },
}

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Build a graph from a directory
    Build {
        /// Path to the directory to build the graph from
        #[arg(long, short)]
        path: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the graph structure of a directory
    Print {
        /// Path to the directory to print the graph for
        #[arg(long, short)]
        path: PathBuf,
    },
    /// Merge overlay directories into a control directory and print the result
    Merge {
        /// Path to the control directory
        #[arg(long)]
        control: PathBuf,

        /// Path to an overlay directory (repeatable)
        #[arg(long = "overlay")]
        overlays: Vec<PathBuf>,

        /// Collision action when no node declares one (error, overwrite, yield)
        #[arg(long)]
        on_collision: Option<String>,
    },
}
