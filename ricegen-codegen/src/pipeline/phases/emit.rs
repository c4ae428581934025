use eyre::Result;

use crate::{
    emitter::Emitter,
    pipeline::{Phase, PipelineContext},
};

/// Aggregates the sorted tree and renders the unit into the context.
///
/// Writing the unit is left to the pipeline, after every phase has run.
pub struct EmitPhase<'e> {
    emitter: &'e Emitter,
}

impl<'e> EmitPhase<'e> {
    pub fn new(emitter: &'e Emitter) -> Self {
        Self { emitter }
    }
}

impl Phase for EmitPhase<'_> {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn description(&self) -> &'static str {
        "Aggregate fragments into the root and render the unit"
    }

    fn run(&self, ctx: &mut PipelineContext<'_>) -> Result<()> {
        ctx.unit = Some(self.emitter.render(&mut ctx.tree)?);
        Ok(())
    }
}
