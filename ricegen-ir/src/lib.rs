//! Described-entity model for the ricegen Ruby extension generator.
//!
//! This crate is the code generator's view of the C++ library being wrapped:
//! a tree of declarations with superclass links and wrap-eligibility flags.
//!
//! # Architecture
//!
//! ```text
//! library.toml → LibrarySpec (parsing) → Library (Hierarchy) → codegen
//! ```
//!
//! The generator depends only on the [`Hierarchy`] trait; [`Library`] is the
//! in-memory implementation shipped with the workspace.

mod entity;
mod error;
mod hierarchy;
mod library;
mod spec;
mod validate;

pub use entity::{Declaration, EntityId, EntityKind, Param};
pub use error::{Error, Result};
pub use hierarchy::Hierarchy;
pub use library::Library;
pub use spec::{EntitySpec, LibrarySpec};
pub use validate::validate_identifier;
