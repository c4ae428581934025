//! Member functions and free functions.
//!
//! Overloads cannot be taken by plain address, so every overloaded callable
//! gets a function pointer typedef in the declarations and is registered
//! through a cast to it. The first overload keeps the Ruby name, later ones
//! are suffixed with the next number no sibling is named with.

use ricegen_core::as_variable;
use ricegen_ir::{EntityId, EntityKind, Hierarchy};

use super::naming::{header_include, overload, owner_binding, ruby_callable_name};
use crate::{GenerationContext, node::Fragments};

fn overload_alias(hierarchy: &dyn Hierarchy, entity: EntityId) -> Option<String> {
    let (index, count) = overload(hierarchy, entity);
    (count > 1).then(|| {
        format!(
            "{}_{index}_type",
            as_variable(hierarchy.qualified_name(entity))
        )
    })
}

fn typedef(hierarchy: &dyn Hierarchy, entity: EntityId, alias: &str) -> String {
    let decl = hierarchy.declaration(entity);
    let is_member = decl.kind == EntityKind::Method && !decl.is_static;
    let scope = match hierarchy.parent(entity) {
        Some(class) if is_member => format!("{}::", hierarchy.qualified_name(class)),
        _ => String::new(),
    };
    format!(
        "typedef {} ({scope}*{alias})({});",
        decl.return_type(),
        decl.param_types()
    )
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
    if let Some(alias) = overload_alias(hierarchy, entity) {
        fragments
            .declarations
            .push(typedef(hierarchy, entity, &alias));
    }
    fragments.registrations.push(emit(hierarchy, entity));
    fragments
}

pub(crate) fn emit(hierarchy: &dyn Hierarchy, entity: EntityId) -> String {
    let decl = hierarchy.declaration(entity);
    let qualified = hierarchy.qualified_name(entity);

    let ruby_name = ruby_callable_name(hierarchy, entity);

    let pointer = match overload_alias(hierarchy, entity) {
        Some(alias) => format!("{alias}(&{qualified})"),
        None => format!("&{qualified}"),
    };

    match owner_binding(hierarchy, entity) {
        None => format!("Rice::define_global_function(\"{ruby_name}\", {pointer});"),
        Some(owner) => {
            let define = match (decl.kind, decl.is_static) {
                (EntityKind::Method, false) => "define_method",
                (EntityKind::Method, true) => "define_singleton_function",
                _ => "define_module_function",
            };
            format!(
                "{}.{define}(\"{ruby_name}\", {pointer});",
                owner.variable
            )
        }
    }
}
