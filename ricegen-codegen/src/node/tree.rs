use std::collections::HashSet;

use ricegen_ir::{EntityId, Hierarchy};
use serde::Serialize;

use super::{Binding, Fragments, Node, NodeId, NodeKind, NodeState};
use crate::{Error, GenerationContext, Result};

/// Count the superclass links reachable from `entity`.
///
/// # Errors
///
/// Returns [`Error::CyclicHierarchy`] if the superclass chain revisits an
/// entity.
pub fn hierarchy_rank(hierarchy: &dyn Hierarchy, entity: EntityId) -> Result<usize> {
    let mut visited = HashSet::from([entity]);
    let mut current = entity;
    let mut rank = 0;

    while let Some(superclass) = hierarchy.superclass(current) {
        if !visited.insert(superclass) {
            return Err(Error::CyclicHierarchy {
                entity: hierarchy.qualified_name(entity).to_string(),
            });
        }
        rank += 1;
        current = superclass;
    }

    Ok(rank)
}

/// An arena of nodes generated from one [`Hierarchy`].
///
/// The root is an [`NodeKind::Extension`] node bound to the hierarchy's root
/// entity. Parent links are plain [`NodeId`]s; the arena owns every node.
///
/// # Example
///
/// ```
/// use ricegen_codegen::{GenerationContext, node::NodeTree};
/// use ricegen_ir::{Declaration, Hierarchy, Library};
///
/// let mut lib = Library::new("shapes");
/// let shape = lib.add(lib.root(), Declaration::class("Shape")).unwrap();
/// lib.add(lib.root(), Declaration::class("Circle").with_superclass(shape))
///     .unwrap();
///
/// let mut tree = NodeTree::new(&lib);
/// let root = tree.root();
/// tree.build(root, &mut GenerationContext::new()).unwrap();
/// tree.sort(root).unwrap();
///
/// let names: Vec<&str> = tree.node(root).children().iter().map(|&id| tree.name(id)).collect();
/// assert_eq!(names, ["Shape", "Circle"]);
/// ```
pub struct NodeTree<'h> {
    hierarchy: &'h dyn Hierarchy,
    nodes: Vec<Node>,
}

impl<'h> NodeTree<'h> {
    /// Create a tree holding only an unbuilt root node.
    pub fn new(hierarchy: &'h dyn Hierarchy) -> Self {
        Self {
            hierarchy,
            nodes: vec![Node::new(hierarchy.root(), NodeKind::Extension, None)],
        }
    }

    pub fn hierarchy(&self) -> &'h dyn Hierarchy {
        self.hierarchy
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Name of the unit this tree generates (the library name).
    pub fn unit_name(&self) -> &'h str {
        let hierarchy = self.hierarchy;
        hierarchy.name(hierarchy.root())
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.node(id).has_children()
    }

    /// Qualified name of the node's entity, or the library name for the root.
    pub fn name(&self, id: NodeId) -> &'h str {
        let hierarchy = self.hierarchy;
        let entity = self.node(id).entity;
        match hierarchy.qualified_name(entity) {
            "" => hierarchy.name(entity),
            qualified => qualified,
        }
    }

    /// Nodes of the subtree rooted at `id`, parents before children.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.node(current).children.iter().rev());
        }
        out
    }

    /// Build the subtree rooted at `id`.
    ///
    /// The node contributes its own fragments first, then every eligible
    /// child entity (not ignored, not moved, public) becomes a child node,
    /// is built recursively and appended to `children`. Ineligible entities
    /// produce nothing.
    ///
    /// # Errors
    ///
    /// Fails if the node was already built, or if a child entity has no node
    /// kind at this position.
    pub fn build(&mut self, id: NodeId, ctx: &mut GenerationContext) -> Result<()> {
        self.expect_state(id, "build", &[NodeState::Created], "created")?;

        let hierarchy = self.hierarchy;
        let (entity, kind) = (self.node(id).entity, self.node(id).kind);

        let fragments = kind.contribute(hierarchy, entity, ctx);
        let binding = kind.binding(hierarchy, entity);
        {
            let node = self.node_mut(id);
            node.fragments = fragments;
            node.binding = binding;
        }

        for &candidate in hierarchy.children(entity) {
            if !hierarchy.is_eligible(candidate) {
                tracing::trace!(
                    entity = hierarchy.qualified_name(candidate),
                    "skipping ineligible entity"
                );
                continue;
            }

            let entity_kind = hierarchy.kind(candidate);
            let child_kind = kind.child_kind(entity_kind).ok_or_else(|| Error::UnsupportedEntity {
                kind: entity_kind,
                name: hierarchy.qualified_name(candidate).to_string(),
                parent: kind,
            })?;

            let child = NodeId(self.nodes.len());
            self.nodes.push(Node::new(candidate, child_kind, Some(id)));
            self.build(child, ctx)?;
            self.node_mut(id).children.push(child);
        }

        let node = self.node_mut(id);
        node.state = NodeState::Built;
        tracing::debug!(
            node = self.name(id),
            kind = %kind,
            children = self.node(id).children.len(),
            fragments = self.node(id).fragments.len(),
            "built node"
        );

        Ok(())
    }

    /// Hierarchy rank of a node: its superclass count for classes, 0 for
    /// every other kind.
    pub fn rank(&self, id: NodeId) -> Result<usize> {
        let node = self.node(id);
        match node.kind {
            NodeKind::Class => hierarchy_rank(self.hierarchy, node.entity),
            _ => Ok(0),
        }
    }

    /// Sort the subtree rooted at `id`.
    ///
    /// Children's subtrees are sorted first, then the node's own children
    /// are stably ordered by ascending rank. Sorting a sorted tree changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Fails if any node of the subtree is not built (or already processed),
    /// or if a class hierarchy is cyclic.
    pub fn sort(&mut self, id: NodeId) -> Result<()> {
        self.expect_state(id, "sort", &[NodeState::Built, NodeState::Sorted], "built")?;

        let children = self.node(id).children.clone();
        for &child in &children {
            self.sort(child)?;
        }

        let mut ranked = children
            .iter()
            .map(|&child| Ok((self.rank(child)?, child)))
            .collect::<Result<Vec<_>>>()?;
        // Vec::sort_by_key is stable: equal ranks keep build order.
        ranked.sort_by_key(|&(rank, _)| rank);
        let sorted: Vec<NodeId> = ranked.into_iter().map(|(_, child)| child).collect();

        if sorted != children {
            tracing::debug!(node = self.name(id), "reordered children by hierarchy rank");
        }

        let node = self.node_mut(id);
        node.children = sorted;
        node.state = NodeState::Sorted;

        Ok(())
    }

    /// The node's own immediate text. Does not modify the tree.
    pub fn emit(&self, id: NodeId) -> Result<String> {
        self.expect_state(
            id,
            "emit",
            &[NodeState::Built, NodeState::Sorted, NodeState::Processed],
            "built",
        )?;
        let node = self.node(id);
        Ok(node.kind.emit(self.hierarchy, node.entity))
    }

    /// Check that every node of the subtree rooted at `id` is in `state`.
    pub(crate) fn expect_subtree(
        &self,
        id: NodeId,
        operation: &'static str,
        state: NodeState,
        expected: &'static str,
    ) -> Result<()> {
        self.descendants(id)
            .into_iter()
            .try_for_each(|node| self.expect_state(node, operation, &[state], expected))
    }

    fn expect_state(
        &self,
        id: NodeId,
        operation: &'static str,
        allowed: &[NodeState],
        expected: &'static str,
    ) -> Result<()> {
        let found = self.node(id).state;
        if allowed.contains(&found) {
            Ok(())
        } else {
            Err(Error::OutOfOrder {
                operation,
                node: self.name(id).to_string(),
                expected,
                found,
            })
        }
    }

    /// A serializable view of the subtree rooted at `id`.
    pub fn snapshot(&self, id: NodeId) -> NodeSnapshot {
        let node = self.node(id);
        NodeSnapshot {
            id,
            kind: node.kind,
            name: self.name(id).to_string(),
            state: node.state,
            binding: node.binding.clone(),
            fragments: node.fragments.clone(),
            children: node
                .children
                .iter()
                .map(|&child| self.snapshot(child))
                .collect(),
        }
    }
}

impl std::fmt::Debug for NodeTree<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTree")
            .field("unit", &self.unit_name())
            .field("nodes", &self.nodes)
            .finish()
    }
}

/// Serializable view of a node and its subtree.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub state: NodeState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<Binding>,
    #[serde(skip_serializing_if = "Fragments::is_empty")]
    pub fragments: Fragments,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}
