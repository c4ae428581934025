use ricegen_ir::Hierarchy;

use super::naming::include_line;
use crate::{GenerationContext, node::Fragments};

pub(crate) const RICE_HEADER: &str = "<rice/rice.hpp>";

/// Rice itself plus every library-wide header, each included once.
pub(crate) fn contribute(hierarchy: &dyn Hierarchy, ctx: &mut GenerationContext) -> Fragments {
    let mut fragments = Fragments::new();
    for header in std::iter::once(RICE_HEADER).chain(hierarchy.headers().iter().map(String::as_str))
    {
        if ctx.claim_header(header) {
            fragments.includes.push(include_line(header));
        }
    }
    fragments
}

pub(crate) fn emit(hierarchy: &dyn Hierarchy) -> String {
    format!(
        "// Ruby extension `{}`. Generated by ricegen, do not edit.",
        hierarchy.name(hierarchy.root())
    )
}
