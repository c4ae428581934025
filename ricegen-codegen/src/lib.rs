//! Node tree, ordering and emission for the ricegen Ruby extension generator.
//!
//! Generation runs in three passes over a tree of nodes, one node per
//! wrapped entity:
//!
//! ```text
//! Hierarchy → NodeTree::build → NodeTree::sort → Emitter::write → OutputSink
//! ```
//!
//! # Module Organization
//!
//! - [`node`] - The node tree: build, hierarchy rank, stable sort, emit
//! - [`emitter`] - Fragment aggregation and output strategies
//! - [`pipeline`] - The passes as phases with plugin hooks
//! - [`builder`] - Code generation building blocks (CodeBuilder, Indent)

pub mod builder;
mod context;
mod diagnostic;
pub mod emitter;
mod error;
pub mod node;
mod options;
pub mod pipeline;

pub use context::GenerationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, Result};
pub use options::GeneratorOptions;
