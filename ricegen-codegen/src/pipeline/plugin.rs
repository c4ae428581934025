//! Pipeline plugin trait for extensibility.

use eyre::Result;

use super::PipelineContext;

/// A plugin that can hook into the generation pipeline.
///
/// Plugins receive callbacks before and after each phase runs, allowing
/// them to inspect or modify the pipeline context.
///
/// # Example
///
/// ```
/// use eyre::Result;
/// use ricegen_codegen::pipeline::{PipelineContext, Plugin};
///
/// struct NodeCount;
///
/// impl Plugin for NodeCount {
///     fn name(&self) -> &'static str {
///         "node-count"
///     }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut PipelineContext<'_>) -> Result<()> {
///         if phase == "build" {
///             ctx.generation
///                 .add_info(phase, format!("{} nodes", ctx.tree.len()));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut PipelineContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut PipelineContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Lets a caller keep a handle on a plugin (e.g. to read collected state)
/// while the pipeline owns a clone.
impl<P: Plugin + ?Sized> Plugin for std::sync::Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut PipelineContext<'_>) -> Result<()> {
        (**self).on_before_phase(phase, ctx)
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut PipelineContext<'_>) -> Result<()> {
        (**self).on_after_phase(phase, ctx)
    }
}
