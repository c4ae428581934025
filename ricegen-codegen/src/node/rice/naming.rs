//! Names shared between node kinds: generated variables, Ruby constants,
//! include lines.

use std::collections::HashSet;

use ricegen_core::{as_variable, to_snake_case};
use ricegen_ir::{EntityId, EntityKind, Hierarchy};

use crate::{GenerationContext, node::Binding};

/// The variable a scope or type entity is registered into, `None` for the
/// root and for callables.
pub(crate) fn binding_for(hierarchy: &dyn Hierarchy, entity: EntityId) -> Option<Binding> {
    hierarchy.parent(entity)?;

    let qualified = hierarchy.qualified_name(entity);
    let var = as_variable(qualified);
    match hierarchy.kind(entity) {
        EntityKind::Namespace => Some(Binding::new(format!("rb_m{var}"), "Rice::Module")),
        EntityKind::Class => Some(Binding::new(
            format!("rb_c{var}"),
            format!("Rice::Data_Type<{qualified}>"),
        )),
        EntityKind::Enum => Some(Binding::new(
            format!("rb_e{var}"),
            format!("Rice::Enum<{qualified}>"),
        )),
        _ => None,
    }
}

/// Binding of the scope enclosing `entity`; `None` at the top level.
pub(crate) fn owner_binding(hierarchy: &dyn Hierarchy, entity: EntityId) -> Option<Binding> {
    hierarchy
        .parent(entity)
        .and_then(|parent| binding_for(hierarchy, parent))
}

/// Ruby constant name for a C++ type name: identifier-safe, capitalised.
pub(crate) fn ruby_constant(name: &str) -> String {
    let var = as_variable(name);
    let trimmed = var.trim_matches('_');
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `#include <...>` for system headers (given with brackets), quoted
/// otherwise.
pub(crate) fn include_line(header: &str) -> String {
    if header.starts_with('<') {
        format!("#include {header}")
    } else {
        format!("#include \"{header}\"")
    }
}

/// Include for the entity's own header, if it declares one that no node
/// has included yet.
pub(crate) fn header_include(
    hierarchy: &dyn Hierarchy,
    entity: EntityId,
    ctx: &mut GenerationContext,
) -> Option<String> {
    let header = hierarchy.declaration(entity).header.as_deref()?;
    ctx.claim_header(header).then(|| include_line(header))
}

/// Position of `entity` among the wrapped siblings sharing its kind and
/// name, and how many such siblings there are.
pub(crate) fn overload(hierarchy: &dyn Hierarchy, entity: EntityId) -> (usize, usize) {
    let Some(parent) = hierarchy.parent(entity) else {
        return (0, 1);
    };
    let decl = hierarchy.declaration(entity);
    let overloads: Vec<EntityId> = hierarchy
        .children(parent)
        .iter()
        .copied()
        .filter(|&sibling| {
            let other = hierarchy.declaration(sibling);
            hierarchy.is_eligible(sibling) && other.kind == decl.kind && other.name == decl.name
        })
        .collect();
    let index = overloads
        .iter()
        .position(|&sibling| sibling == entity)
        .unwrap_or(0);
    (index, overloads.len().max(1))
}

/// Ruby name of a method or function.
///
/// The first overload keeps the snake_case name. Each later overload takes
/// the next `_<n>` suffix that no sibling callable is already named.
pub(crate) fn ruby_callable_name(hierarchy: &dyn Hierarchy, entity: EntityId) -> String {
    let decl = hierarchy.declaration(entity);
    let base = to_snake_case(&decl.name);
    let (index, _) = overload(hierarchy, entity);
    let Some(parent) = hierarchy.parent(entity).filter(|_| index > 0) else {
        return base;
    };

    let taken: HashSet<String> = hierarchy
        .children(parent)
        .iter()
        .copied()
        .filter(|&sibling| {
            let other = hierarchy.declaration(sibling);
            hierarchy.is_eligible(sibling)
                && matches!(other.kind, EntityKind::Method | EntityKind::Function)
                && !(other.kind == decl.kind && other.name == decl.name)
        })
        .map(|sibling| to_snake_case(hierarchy.name(sibling)))
        .collect();

    let mut suffix = 0;
    let mut name = base.clone();
    for _ in 0..index {
        loop {
            suffix += 1;
            name = format!("{base}_{suffix}");
            if !taken.contains(&name) {
                break;
            }
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use ricegen_ir::{Declaration, Library};

    use super::*;

    #[test]
    fn test_bindings_by_kind() {
        let mut lib = Library::new("lib");
        let geo = lib.add(lib.root(), Declaration::namespace("geo")).unwrap();
        let shape = lib.add(geo, Declaration::class("Shape")).unwrap();
        let color = lib.add(geo, Declaration::enumeration("Color")).unwrap();
        let area = lib.add(shape, Declaration::method("area")).unwrap();

        assert_eq!(binding_for(&lib, lib.root()), None);
        assert_eq!(
            binding_for(&lib, geo),
            Some(Binding::new("rb_mgeo", "Rice::Module"))
        );
        assert_eq!(
            binding_for(&lib, color),
            Some(Binding::new("rb_egeo_Color", "Rice::Enum<geo::Color>"))
        );
        assert_eq!(binding_for(&lib, area), None);
        assert_eq!(
            owner_binding(&lib, area).map(|b| b.variable),
            Some("rb_cgeo_Shape".to_string())
        );
        assert_eq!(owner_binding(&lib, geo), None);
    }

    #[test]
    fn test_ruby_constant() {
        assert_eq!(ruby_constant("Shape"), "Shape");
        assert_eq!(ruby_constant("vector<int>"), "Vector_int");
        assert_eq!(ruby_constant("RED"), "RED");
        assert_eq!(ruby_constant("kind"), "Kind");
    }

    #[test]
    fn test_include_line() {
        assert_eq!(include_line("shapes.h"), "#include \"shapes.h\"");
        assert_eq!(include_line("<vector>"), "#include <vector>");
    }

    #[test]
    fn test_header_is_claimed_once() {
        let mut lib = Library::new("lib");
        let a = lib
            .add(lib.root(), Declaration::class("A").header("a.h"))
            .unwrap();
        let b = lib
            .add(lib.root(), Declaration::class("B").header("a.h"))
            .unwrap();
        let mut ctx = GenerationContext::new();

        assert_eq!(
            header_include(&lib, a, &mut ctx).as_deref(),
            Some("#include \"a.h\"")
        );
        assert_eq!(header_include(&lib, b, &mut ctx), None);
    }

    #[test]
    fn test_overload_positions_skip_ineligible() {
        let mut lib = Library::new("lib");
        let shape = lib.add(lib.root(), Declaration::class("Shape")).unwrap();
        let first = lib.add(shape, Declaration::method("scale")).unwrap();
        lib.add(shape, Declaration::method("scale").private())
            .unwrap();
        let third = lib.add(shape, Declaration::method("scale")).unwrap();
        let other = lib.add(shape, Declaration::method("area")).unwrap();

        assert_eq!(overload(&lib, first), (0, 2));
        assert_eq!(overload(&lib, third), (1, 2));
        assert_eq!(overload(&lib, other), (0, 1));
    }

    #[test]
    fn test_overload_suffix_skips_taken_names() {
        let mut lib = Library::new("lib");
        let shape = lib.add(lib.root(), Declaration::class("Shape")).unwrap();
        let first = lib.add(shape, Declaration::method("scale")).unwrap();
        let second = lib.add(shape, Declaration::method("scale")).unwrap();
        let third = lib.add(shape, Declaration::method("scale")).unwrap();
        let taken = lib.add(shape, Declaration::method("scale_1")).unwrap();
        lib.add(shape, Declaration::method("scale_3").private())
            .unwrap();

        assert_eq!(ruby_callable_name(&lib, first), "scale");
        assert_eq!(ruby_callable_name(&lib, second), "scale_2");
        assert_eq!(ruby_callable_name(&lib, third), "scale_3");
        assert_eq!(ruby_callable_name(&lib, taken), "scale_1");
    }
}
