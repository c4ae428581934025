use ricegen_ir::{EntityId, Hierarchy};

use super::naming::{binding_for, header_include, owner_binding, ruby_constant};
use crate::{Diagnostic, GenerationContext, node::Fragments};

/// Superclass to pass to Rice, if it is wrapped in this run. Rice rejects a
/// base class it has no `Data_Type` for.
fn wrapped_base(hierarchy: &dyn Hierarchy, entity: EntityId) -> Option<EntityId> {
    hierarchy
        .superclass(entity)
        .filter(|&superclass| hierarchy.is_wrapped(superclass))
}

pub(crate) fn contribute(
    hierarchy: &dyn Hierarchy,
    entity: EntityId,
    ctx: &mut GenerationContext,
) -> Fragments {
    let mut fragments = Fragments::new();
    fragments
        .includes
        .extend(header_include(hierarchy, entity, ctx));

    let unwrapped = hierarchy
        .superclass(entity)
        .filter(|_| wrapped_base(hierarchy, entity).is_none());
    if let Some(superclass) = unwrapped {
        ctx.add_diagnostic(
            Diagnostic::warning(
                "build",
                format!(
                    "superclass '{}' is not wrapped, registering without a base class",
                    hierarchy.qualified_name(superclass)
                ),
            )
            .at(hierarchy.qualified_name(entity)),
        );
    }

    fragments.registrations.push(emit(hierarchy, entity));
    fragments
}

/// `Rice::Data_Type<Q> rb_cQ = Rice::define_class[_under]<Q[, Base]>(...)`.
pub(crate) fn emit(hierarchy: &dyn Hierarchy, entity: EntityId) -> String {
    let Some(binding) = binding_for(hierarchy, entity) else {
        return String::new();
    };
    let qualified = hierarchy.qualified_name(entity);
    let name = ruby_constant(hierarchy.name(entity));
    let template = match wrapped_base(hierarchy, entity) {
        Some(base) => format!("{qualified}, {}", hierarchy.qualified_name(base)),
        None => qualified.to_string(),
    };

    match owner_binding(hierarchy, entity) {
        Some(owner) => format!(
            "{} {} = Rice::define_class_under<{template}>({}, \"{name}\");",
            binding.ty, binding.variable, owner.variable
        ),
        None => format!(
            "{} {} = Rice::define_class<{template}>(\"{name}\");",
            binding.ty, binding.variable
        ),
    }
}
