use miette::Diagnostic;
use ricegen_ir::EntityKind;
use thiserror::Error;

use crate::node::{NodeKind, NodeState};

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal generation errors. Any of these aborts generation of the root
/// being processed; nothing is written for it.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("cyclic class hierarchy detected at '{entity}'")]
    #[diagnostic(
        code(ricegen::cyclic_hierarchy),
        help("a class cannot be its own direct or indirect superclass")
    )]
    CyclicHierarchy { entity: String },

    #[error("cannot {operation} '{node}': node is {found}, expected {expected}")]
    #[diagnostic(
        code(ricegen::out_of_order),
        help("a tree must be built, then sorted, then emitted exactly once")
    )]
    OutOfOrder {
        operation: &'static str,
        node: String,
        expected: &'static str,
        found: NodeState,
    },

    #[error("{kind} '{name}' cannot be wrapped inside {parent} node")]
    #[diagnostic(code(ricegen::unsupported_entity))]
    UnsupportedEntity {
        kind: EntityKind,
        name: String,
        parent: NodeKind,
    },

    #[error("cannot generate unit '{name}': {reason}")]
    #[diagnostic(
        code(ricegen::invalid_unit_name),
        help("the library name becomes the `Init_` function and the file name, so it must be a C identifier")
    )]
    InvalidUnitName { name: String, reason: &'static str },
}
