//! Core type definitions shared across the crate.

use std::fmt;

/// Content fingerprint: 32-byte BLAKE3 digest of a file's bytes.
pub type Fingerprint = [u8; 32];

/// Handle identifying a node within a [`Graph`](crate::graph::Graph) arena.
///
/// Ids are allocated by the owning graph and are only meaningful against it.
/// Links and parent back-references hold `NodeId`s, never owning pointers,
/// so ownership flows strictly graph -> nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        NodeId(raw)
    }

    pub(crate) fn offset(self, by: u64) -> Self {
        NodeId(self.0 + by)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
