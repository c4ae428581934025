use eyre::Result;

use crate::pipeline::{Phase, PipelineContext};

/// Builds the whole node tree, starting at the root.
pub struct BuildPhase;

impl Phase for BuildPhase {
    fn name(&self) -> &'static str {
        "build"
    }

    fn description(&self) -> &'static str {
        "Create a node for every wrapped entity and collect its fragments"
    }

    fn run(&self, ctx: &mut PipelineContext<'_>) -> Result<()> {
        let root = ctx.tree.root();
        ctx.tree.build(root, &mut ctx.generation)?;
        Ok(())
    }
}
