use ricegen_ir::{EntityId, Hierarchy};

use super::naming::{binding_for, header_include, owner_binding, ruby_constant};
use crate::{GenerationContext, builder::CodeBuilder, node::Fragments};

pub(crate) fn contribute(
    hierarchy: &dyn Hierarchy,
    entity: EntityId,
    ctx: &mut GenerationContext,
) -> Fragments {
    let mut fragments = Fragments::new();
    fragments
        .includes
        .extend(header_include(hierarchy, entity, ctx));
    fragments.registrations.push(emit(hierarchy, entity));
    fragments
}

/// `Rice::define_enum` chained with one `define_value` per enumerator.
pub(crate) fn emit(hierarchy: &dyn Hierarchy, entity: EntityId) -> String {
    let Some(binding) = binding_for(hierarchy, entity) else {
        return String::new();
    };
    let qualified = hierarchy.qualified_name(entity);
    let name = ruby_constant(hierarchy.name(entity));
    let owner = owner_binding(hierarchy, entity)
        .map(|owner| format!(", {}", owner.variable))
        .unwrap_or_default();
    let values = &hierarchy.declaration(entity).values;

    let head = format!(
        "{} {} = Rice::define_enum<{qualified}>(\"{name}\"{owner})",
        binding.ty, binding.variable
    );
    if values.is_empty() {
        return format!("{head};");
    }

    let last = values.len() - 1;
    CodeBuilder::cpp()
        .line(&head)
        .indent()
        .each(values.iter().enumerate(), |b, (i, value)| {
            let end = if i == last { ";" } else { "" };
            b.line(&format!(
                ".define_value(\"{}\", {qualified}::{value}){end}",
                ruby_constant(value)
            ))
        })
        .build_fragment()
}
