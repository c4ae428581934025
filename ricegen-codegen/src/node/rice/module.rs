use ricegen_core::to_pascal_case;
use ricegen_ir::{EntityId, Hierarchy};

use super::naming::{binding_for, header_include, owner_binding};
use crate::{GenerationContext, node::Fragments};

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

/// `Rice::Module rb_mX = Rice::define_module[_under](...)`.
pub(crate) fn emit(hierarchy: &dyn Hierarchy, entity: EntityId) -> String {
    let name = to_pascal_case(hierarchy.name(entity));
    let Some(binding) = binding_for(hierarchy, entity) else {
        return String::new();
    };

    match owner_binding(hierarchy, entity) {
        Some(owner) => format!(
            "{} {} = Rice::define_module_under({}, \"{name}\");",
            binding.ty, binding.variable, owner.variable
        ),
        None => format!(
            "{} {} = Rice::define_module(\"{name}\");",
            binding.ty, binding.variable
        ),
    }
}
