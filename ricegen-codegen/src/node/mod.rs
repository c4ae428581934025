//! The node tree: one node per wrapped entity, stored in an arena.
//!
//! A tree goes through three passes, strictly in order:
//!
//! 1. [`NodeTree::build`] creates a node for every eligible entity and fills
//!    in its fragments;
//! 2. [`NodeTree::sort`] stably reorders siblings by hierarchy rank so base
//!    classes are registered before the classes deriving from them;
//! 3. [`Emitter::process`](crate::emitter::Emitter::process) moves every
//!    node's fragments up into the root.
//!
//! Each node carries a [`NodeState`] and every pass checks it, so running a
//! pass out of order is an [`Error::OutOfOrder`](crate::Error::OutOfOrder)
//! instead of silently wrong output.

mod fragments;
mod kind;
pub(crate) mod rice;
mod tree;

use std::fmt;

use ricegen_ir::EntityId;
use serde::Serialize;

pub use fragments::Fragments;
pub use kind::NodeKind;
pub use tree::{NodeSnapshot, NodeTree, hierarchy_rank};

/// Handle to a node inside a [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Lifecycle of a node. Passes move nodes forward, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Created,
    Built,
    Sorted,
    /// Fragments have been handed to the parent; the node is spent.
    Processed,
}

impl NodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Created => "created",
            NodeState::Built => "built",
            NodeState::Sorted => "sorted",
            NodeState::Processed => "processed",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The generated variable a node exposes so nested registrations can attach
/// to it, e.g. `rb_cShape` of type `Rice::Data_Type<Shape>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub variable: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Binding {
    pub fn new(variable: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            ty: ty.into(),
        }
    }
}

/// One generation unit, bound to exactly one entity of the hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) entity: EntityId,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) fragments: Fragments,
    pub(crate) binding: Option<Binding>,
    pub(crate) state: NodeState,
}

impl Node {
    fn new(entity: EntityId, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            entity,
            kind,
            parent,
            children: Vec::new(),
            fragments: Fragments::new(),
            binding: None,
            state: NodeState::Created,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Owning node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes, in build order until sorted.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Fragments currently held by this node. After processing, only the
    /// root holds any.
    pub fn fragments(&self) -> &Fragments {
        &self.fragments
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    pub fn state(&self) -> NodeState {
        self.state
    }
}
