use eyre::Result;

use crate::pipeline::{Phase, PipelineContext};

/// Sorts every node's children by hierarchy rank.
pub struct SortPhase;

impl Phase for SortPhase {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn description(&self) -> &'static str {
        "Order siblings so base classes precede derived classes"
    }

    fn run(&self, ctx: &mut PipelineContext<'_>) -> Result<()> {
        let root = ctx.tree.root();
        ctx.tree.sort(root)?;
        Ok(())
    }
}
