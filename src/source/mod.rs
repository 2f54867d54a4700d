//! Graph sources
//!
//! Builds graph instances from external inputs. The filesystem source walks
//! a real directory and mirrors it as a directory graph.

pub mod fs;
pub mod walker;

pub use fs::{build_tree, BuiltTree, TreeSource};
pub use walker::{Entry, Walker, WalkerConfig};
