//! Node types and the graph arena that owns them

use crate::error::GraphError;
use crate::graph::fingerprint;
use crate::types::{Fingerprint, NodeId};
use std::collections::HashMap;
use std::fmt;

/// Node classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Directory => write!(f, "DIRECTORY"),
            NodeKind::File => write!(f, "FILE"),
        }
    }
}

/// Per-node collision preference consulted when merging same-key nodes.
///
/// A collision is two same-key file nodes at the same graph level with
/// differing, both-present content fingerprints. `Default` defers to the
/// merge options supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionAction {
    /// Abort and return an error when merging nodes collide
    Error,
    /// The controlling graph node keeps its content
    Overwrite,
    /// The controlling graph node yields to the overlay node
    Yield,
    /// Defer to the merge options
    Default,
}

impl CollisionAction {
    /// Parse a collision action from its string form.
    pub fn parse(s: &str) -> Result<Self, GraphError> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(CollisionAction::Error),
            "overwrite" => Ok(CollisionAction::Overwrite),
            "yield" => Ok(CollisionAction::Yield),
            "default" => Ok(CollisionAction::Default),
            other => Err(GraphError::InvalidValue(format!(
                "unknown collision action '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for CollisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionAction::Error => write!(f, "ERROR"),
            CollisionAction::Overwrite => write!(f, "OVERWRITE"),
            CollisionAction::Yield => write!(f, "YIELD"),
            CollisionAction::Default => write!(f, "DEFAULT"),
        }
    }
}

/// How a file node is materialized by a later scaffolding stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Copy bytes verbatim
    Copy,
    /// Run the file through the templating stage
    Template,
}

impl FileAction {
    /// Parse a file action from its string form.
    pub fn parse(s: &str) -> Result<Self, GraphError> {
        match s.to_ascii_lowercase().as_str() {
            "copy" => Ok(FileAction::Copy),
            "template" => Ok(FileAction::Template),
            other => Err(GraphError::InvalidValue(format!(
                "unknown file action '{}'",
                other
            ))),
        }
    }

    /// Derive the action from a file name. `.tmpl` files are templates.
    fn derive(name: &str) -> Self {
        if name.ends_with(".tmpl") {
            FileAction::Template
        } else {
            FileAction::Copy
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAction::Copy => write!(f, "COPY"),
            FileAction::Template => write!(f, "TEMPLATE"),
        }
    }
}

/// Link classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Regular,
}

/// Named edge from a directory to a child node.
///
/// The name duplicates the child's key today; it is stored separately so a
/// future link kind can let the two diverge (symbolic aliasing).
#[derive(Debug, Clone)]
pub struct Link {
    pub target: NodeId,
    pub kind: LinkKind,
    pub name: String,
}

/// Directory node: ordered links to children, insertion order significant
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    key: String,
    links: Vec<Link>,
    collision: CollisionAction,
}

/// File node: leaf carrying the derived action and optional content facts
#[derive(Debug, Clone)]
pub struct FileNode {
    key: String,
    action: FileAction,
    fingerprint: Option<Fingerprint>,
    content_type: Option<String>,
    collision: CollisionAction,
}

/// A labelled element of the graph, either a directory or a file
#[derive(Debug, Clone)]
pub enum Node {
    Directory(DirectoryNode),
    File(FileNode),
}

impl Node {
    pub fn key(&self) -> &str {
        match self {
            Node::Directory(d) => &d.key,
            Node::File(f) => &f.key,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory(_) => NodeKind::Directory,
            Node::File(_) => NodeKind::File,
        }
    }

    pub fn collision_action(&self) -> CollisionAction {
        match self {
            Node::Directory(d) => d.collision,
            Node::File(f) => f.collision,
        }
    }
}

const NO_LINKS: &[Link] = &[];

/// Arena owning every node of one directory graph.
///
/// Parent back-references live in a separate map keyed by child id, so the
/// child list is the only ownership path. The merge engine is the only place
/// besides [`Graph::add_child`] that establishes parent entries.
#[derive(Debug, Clone)]
pub struct Graph {
    root: NodeId,
    nodes: HashMap<NodeId, Node>,
    parents: HashMap<NodeId, NodeId>,
    next_id: u64,
}

impl Graph {
    /// Create a graph whose root is a directory with the given key.
    pub fn with_directory_root(key: impl Into<String>) -> Self {
        let mut graph = Graph {
            root: NodeId::from_raw(0),
            nodes: HashMap::new(),
            parents: HashMap::new(),
            next_id: 0,
        };
        let root = graph.insert(Node::Directory(DirectoryNode {
            key: key.into(),
            links: Vec::new(),
            collision: CollisionAction::Default,
        }));
        graph.root = root;
        graph
    }

    /// Root node of this graph.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes owned by this graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached directory node. Attach it with [`Graph::add_child`].
    pub fn add_directory(&mut self, key: impl Into<String>) -> NodeId {
        self.insert(Node::Directory(DirectoryNode {
            key: key.into(),
            links: Vec::new(),
            collision: CollisionAction::Default,
        }))
    }

    /// Create a detached file node. The action is derived from the key once,
    /// at construction, and never recomputed.
    pub fn add_file(&mut self, key: impl Into<String>) -> NodeId {
        let key = key.into();
        let action = FileAction::derive(&key);
        self.insert(Node::File(FileNode {
            key,
            action,
            fingerprint: None,
            content_type: None,
            collision: CollisionAction::Default,
        }))
    }

    /// Child node ids in insertion order. Empty for file nodes.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.links(id).iter().map(|link| link.target).collect()
    }

    /// Child links in insertion order. Empty for file nodes.
    pub fn links(&self, id: NodeId) -> &[Link] {
        match self.nodes.get(&id) {
            Some(Node::Directory(d)) => &d.links,
            _ => NO_LINKS,
        }
    }

    /// First child of `dir` with the given key, if any.
    ///
    /// Duplicate sibling keys are degenerate input; the first match is
    /// canonical.
    pub fn find_child(&self, dir: NodeId, key: &str) -> Option<NodeId> {
        self.links(dir)
            .iter()
            .find(|link| link.name == key)
            .map(|link| link.target)
    }

    /// Append `child` to `parent` as a regular link named after the child's
    /// key, and record the parent back-reference.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), GraphError> {
        let name = self.node(child)?.key().to_string();
        match self.node_mut(parent)? {
            Node::Directory(dir) => {
                dir.links.push(Link {
                    target: child,
                    kind: LinkKind::Regular,
                    name,
                });
            }
            Node::File(file) => {
                return Err(GraphError::InvalidOperation {
                    key: file.key.clone(),
                    reason: "cannot add child to a file node".to_string(),
                });
            }
        }
        self.parents.insert(child, parent);
        Ok(())
    }

    /// Parent of `id`, or `NoParent` if the node is a root.
    pub fn parent(&self, id: NodeId) -> Result<NodeId, GraphError> {
        let key = self.node(id)?.key();
        self.parents
            .get(&id)
            .copied()
            .ok_or_else(|| GraphError::NoParent(key.to_string()))
    }

    /// Unconditionally overwrite the parent back-reference of `id`.
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.parents.insert(id, parent);
    }

    /// Identifying name of the node within its parent's scope.
    pub fn key(&self, id: NodeId) -> Result<&str, GraphError> {
        Ok(self.node(id)?.key())
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind, GraphError> {
        Ok(self.node(id)?.kind())
    }

    pub fn collision_action(&self, id: NodeId) -> Result<CollisionAction, GraphError> {
        Ok(self.node(id)?.collision_action())
    }

    /// Declare a non-default collision preference for this node.
    pub fn set_collision_action(
        &mut self,
        id: NodeId,
        action: CollisionAction,
    ) -> Result<(), GraphError> {
        match self.node_mut(id)? {
            Node::Directory(d) => d.collision = action,
            Node::File(f) => f.collision = action,
        }
        Ok(())
    }

    /// File action. Fails on directory nodes.
    pub fn action(&self, id: NodeId) -> Result<FileAction, GraphError> {
        match self.node(id)? {
            Node::File(f) => Ok(f.action),
            Node::Directory(d) => Err(GraphError::InvalidOperation {
                key: d.key.clone(),
                reason: "no action on a directory node".to_string(),
            }),
        }
    }

    /// Override the derived file action. Fails on directory nodes.
    pub fn set_action(&mut self, id: NodeId, action: FileAction) -> Result<(), GraphError> {
        match self.node_mut(id)? {
            Node::File(f) => {
                f.action = action;
                Ok(())
            }
            Node::Directory(d) => Err(GraphError::InvalidOperation {
                key: d.key.clone(),
                reason: "no action on a directory node".to_string(),
            }),
        }
    }

    /// Sniffed media type, if content was supplied and recognized.
    pub fn content_type(&self, id: NodeId) -> Result<Option<&str>, GraphError> {
        match self.node(id)? {
            Node::File(f) => Ok(f.content_type.as_deref()),
            Node::Directory(d) => Err(GraphError::InvalidOperation {
                key: d.key.clone(),
                reason: "no content type on a directory node".to_string(),
            }),
        }
    }

    /// Content fingerprint, if content was supplied.
    pub fn fingerprint(&self, id: NodeId) -> Result<Option<Fingerprint>, GraphError> {
        match self.node(id)? {
            Node::File(f) => Ok(f.fingerprint),
            Node::Directory(d) => Err(GraphError::InvalidOperation {
                key: d.key.clone(),
                reason: "no fingerprint on a directory node".to_string(),
            }),
        }
    }

    /// Record content facts for a file node: fingerprint and sniffed media
    /// type. An empty byte slice means "no content" and is a no-op.
    pub fn set_content(&mut self, id: NodeId, content: &[u8]) -> Result<(), GraphError> {
        match self.node_mut(id)? {
            Node::File(f) => {
                if content.is_empty() {
                    return Ok(());
                }
                f.content_type = fingerprint::sniff_content_type(content);
                f.fingerprint = Some(fingerprint::content_fingerprint(content));
                Ok(())
            }
            Node::Directory(d) => Err(GraphError::InvalidOperation {
                key: d.key.clone(),
                reason: "cannot set content on a directory node".to_string(),
            }),
        }
    }

    /// Move every node of `other` into this arena, remapping ids, and return
    /// the new id of `other`'s root. Used by the merge engine to bring
    /// overlay graphs into the control arena before walking them.
    pub(crate) fn absorb(&mut self, other: Graph) -> NodeId {
        let offset = self.next_id;
        self.next_id += other.next_id;
        for (id, mut node) in other.nodes {
            if let Node::Directory(dir) = &mut node {
                for link in &mut dir.links {
                    link.target = link.target.offset(offset);
                }
            }
            self.nodes.insert(id.offset(offset), node);
        }
        for (child, parent) in other.parents {
            self.parents.insert(child.offset(offset), parent.offset(offset));
        }
        other.root.offset(offset)
    }

    /// Copy the content facts (fingerprint, media type, action) of file `src`
    /// onto file `dst`. Used when an overlay's content wins a collision.
    pub(crate) fn adopt_file_content(
        &mut self,
        dst: NodeId,
        src: NodeId,
    ) -> Result<(), GraphError> {
        let (fp, content_type, action) = match self.node(src)? {
            Node::File(f) => (f.fingerprint, f.content_type.clone(), f.action),
            Node::Directory(d) => {
                return Err(GraphError::InvalidOperation {
                    key: d.key.clone(),
                    reason: "no content on a directory node".to_string(),
                })
            }
        };
        match self.node_mut(dst)? {
            Node::File(f) => {
                f.fingerprint = fp;
                f.content_type = content_type;
                f.action = action;
                Ok(())
            }
            Node::Directory(d) => Err(GraphError::InvalidOperation {
                key: d.key.clone(),
                reason: "cannot set content on a directory node".to_string(),
            }),
        }
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode(id))
    }
}
