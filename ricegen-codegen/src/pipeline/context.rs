//! State passed through pipeline phases.

use ricegen_core::OutputUnit;
use ricegen_ir::Hierarchy;

use crate::{GenerationContext, node::NodeTree};

/// Context passed through all pipeline phases.
#[derive(Debug)]
pub struct PipelineContext<'h> {
    /// The node tree being generated.
    pub tree: NodeTree<'h>,
    /// Headers and diagnostics shared by the nodes.
    pub generation: GenerationContext,
    /// The rendered unit (populated by EmitPhase).
    pub unit: Option<OutputUnit>,
}

impl<'h> PipelineContext<'h> {
    /// Create a context holding an unbuilt tree for `hierarchy`.
    pub fn new(hierarchy: &'h dyn Hierarchy) -> Self {
        Self {
            tree: NodeTree::new(hierarchy),
            generation: GenerationContext::new(),
            unit: None,
        }
    }
}
