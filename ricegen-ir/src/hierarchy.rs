//! The query interface code generation runs against.

use crate::{Declaration, EntityId, EntityKind};

/// Read-only view of a declaration hierarchy.
///
/// The code generator only ever talks to the wrapped library through this
/// trait. [`Library`](crate::Library) is the in-memory implementation; other
/// front ends can provide their own.
pub trait Hierarchy {
    /// The top-level entity (the global namespace of the wrapped library).
    fn root(&self) -> EntityId;

    /// Enclosing entity, `None` for the root.
    fn parent(&self, id: EntityId) -> Option<EntityId>;

    /// Directly nested entities, in declaration order.
    fn children(&self, id: EntityId) -> &[EntityId];

    /// Full declaration details.
    fn declaration(&self, id: EntityId) -> &Declaration;

    /// Fully qualified C++ name (e.g. `geo::Circle`). Empty for the root.
    fn qualified_name(&self, id: EntityId) -> &str;

    /// Headers every generated unit must include.
    fn headers(&self) -> &[String];

    /// Unqualified name. For the root this is the library name.
    fn name(&self, id: EntityId) -> &str {
        &self.declaration(id).name
    }

    fn kind(&self, id: EntityId) -> EntityKind {
        self.declaration(id).kind
    }

    fn superclass(&self, id: EntityId) -> Option<EntityId> {
        self.declaration(id).superclass
    }

    fn is_ignored(&self, id: EntityId) -> bool {
        self.declaration(id).ignored
    }

    fn is_moved(&self, id: EntityId) -> bool {
        self.declaration(id).moved
    }

    fn is_public(&self, id: EntityId) -> bool {
        self.declaration(id).public
    }

    /// Should this entity be wrapped where it is declared?
    fn is_eligible(&self, id: EntityId) -> bool {
        !self.is_ignored(id) && !self.is_moved(id) && self.is_public(id)
    }

    /// Will this entity end up in the generated code, i.e. is it eligible
    /// along with every scope enclosing it?
    fn is_wrapped(&self, id: EntityId) -> bool {
        let mut current = Some(id);
        while let Some(entity) = current {
            let parent = self.parent(entity);
            if parent.is_some() && !self.is_eligible(entity) {
                return false;
            }
            current = parent;
        }
        true
    }
}
