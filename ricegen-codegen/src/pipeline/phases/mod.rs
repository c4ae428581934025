//! Built-in pipeline phases.
//!
//! - [`BuildPhase`] - builds the node tree from the hierarchy
//! - [`SortPhase`] - orders siblings by hierarchy rank
//! - [`EmitPhase`] - aggregates fragments and renders the unit

mod build;
mod emit;
mod sort;

pub use build::BuildPhase;
pub use emit::EmitPhase;
pub use sort::SortPhase;
