//! Pipeline phase trait.

use eyre::Result;

use super::PipelineContext;

/// A phase in the generation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase can read and
/// modify the pipeline context.
///
/// Built-in phases:
/// - `BuildPhase` - builds the node tree from the hierarchy
/// - `SortPhase` - orders siblings by hierarchy rank
/// - `EmitPhase` - aggregates fragments and renders the unit
///
/// Custom phases run after the built-in ones, before the unit is written.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// What this phase does, logged when it starts.
    fn description(&self) -> &'static str;

    /// Run this phase on the pipeline context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut PipelineContext<'_>) -> Result<()>;
}
