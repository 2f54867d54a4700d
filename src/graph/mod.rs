//! Directory graph model and merge engine
//!
//! Models a filesystem subtree as an in-memory labelled tree of directory and
//! file nodes, and provides the N-way union that combines a control graph with
//! overlay graphs under a declared collision policy.

pub mod fingerprint;
pub mod merge;
pub mod node;

pub use merge::{union, MergeOptions};
pub use node::{CollisionAction, FileAction, Graph, Link, LinkKind, Node, NodeKind};
