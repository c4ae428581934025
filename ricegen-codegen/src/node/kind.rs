use std::fmt;

use ricegen_ir::{EntityId, EntityKind, Hierarchy};
use serde::Serialize;

use super::{Binding, Fragments, rice};
use crate::GenerationContext;

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The root: one Ruby extension per wrapped library.
    Extension,
    Module,
    Class,
    Constructor,
    /// Instance or static member function.
    Method,
    /// Free function.
    Function,
    Enum,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Extension => "extension",
            NodeKind::Module => "module",
            NodeKind::Class => "class",
            NodeKind::Constructor => "constructor",
            NodeKind::Method => "method",
            NodeKind::Function => "function",
            NodeKind::Enum => "enum",
        }
    }

    /// Kind of node an entity becomes when nested in a node of this kind,
    /// or `None` if it cannot be wrapped there.
    pub fn child_kind(self, entity: EntityKind) -> Option<NodeKind> {
        match (self, entity) {
            (NodeKind::Extension | NodeKind::Module, EntityKind::Namespace) => {
                Some(NodeKind::Module)
            }
            (NodeKind::Extension | NodeKind::Module, EntityKind::Function) => {
                Some(NodeKind::Function)
            }
            (NodeKind::Class, EntityKind::Constructor) => Some(NodeKind::Constructor),
            (NodeKind::Class, EntityKind::Method) => Some(NodeKind::Method),
            (NodeKind::Extension | NodeKind::Module | NodeKind::Class, EntityKind::Class) => {
                Some(NodeKind::Class)
            }
            (NodeKind::Extension | NodeKind::Module | NodeKind::Class, EntityKind::Enum) => {
                Some(NodeKind::Enum)
            }
            _ => None,
        }
    }

    /// Fragments a node of this kind contributes for `entity`.
    pub(crate) fn contribute(
        self,
        hierarchy: &dyn Hierarchy,
        entity: EntityId,
        ctx: &mut GenerationContext,
    ) -> Fragments {
        match self {
            NodeKind::Extension => rice::extension::contribute(hierarchy, ctx),
            NodeKind::Module => rice::module::contribute(hierarchy, entity, ctx),
            NodeKind::Class => rice::class::contribute(hierarchy, entity, ctx),
            NodeKind::Constructor => rice::constructor::contribute(hierarchy, entity, ctx),
            NodeKind::Method | NodeKind::Function => {
                rice::method::contribute(hierarchy, entity, ctx)
            }
            NodeKind::Enum => rice::enumeration::contribute(hierarchy, entity, ctx),
        }
    }

    /// The node's own immediate text.
    pub(crate) fn emit(self, hierarchy: &dyn Hierarchy, entity: EntityId) -> String {
        match self {
            NodeKind::Extension => rice::extension::emit(hierarchy),
            NodeKind::Module => rice::module::emit(hierarchy, entity),
            NodeKind::Class => rice::class::emit(hierarchy, entity),
            NodeKind::Constructor => rice::constructor::emit(hierarchy, entity),
            NodeKind::Method | NodeKind::Function => rice::method::emit(hierarchy, entity),
            NodeKind::Enum => rice::enumeration::emit(hierarchy, entity),
        }
    }

    pub(crate) fn binding(self, hierarchy: &dyn Hierarchy, entity: EntityId) -> Option<Binding> {
        match self {
            NodeKind::Module | NodeKind::Class | NodeKind::Enum => {
                rice::naming::binding_for(hierarchy, entity)
            }
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
