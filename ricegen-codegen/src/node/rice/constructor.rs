use ricegen_ir::{EntityId, Hierarchy};

use super::naming::{header_include, owner_binding};
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

/// `rb_cQ.define_constructor(Rice::Constructor<Q, Args...>());`
pub(crate) fn emit(hierarchy: &dyn Hierarchy, entity: EntityId) -> String {
    let (Some(class), Some(owner)) = (
        hierarchy.parent(entity),
        owner_binding(hierarchy, entity),
    ) else {
        return String::new();
    };

    let mut arguments = hierarchy.qualified_name(class).to_string();
    let params = hierarchy.declaration(entity).param_types();
    if !params.is_empty() {
        arguments.push_str(", ");
        arguments.push_str(&params);
    }

    format!(
        "{}.define_constructor(Rice::Constructor<{arguments}>());",
        owner.variable
    )
}

#[cfg(test)]
mod tests {
    use ricegen_ir::{Declaration, Library, Param};

    use super::*;

    #[test]
    fn test_constructor_arguments() {
        let mut lib = Library::new("lib");
        let geo = lib.add(lib.root(), Declaration::namespace("geo")).unwrap();
        let circle = lib.add(geo, Declaration::class("Circle")).unwrap();
        let default = lib.add(circle, Declaration::constructor()).unwrap();
        let sized = lib
            .add(
                circle,
                Declaration::constructor()
                    .param(Param::named("radius", "double"))
                    .param(Param::new("const geo::Point&")),
            )
            .unwrap();

        assert_eq!(
            emit(&lib, default),
            "rb_cgeo_Circle.define_constructor(Rice::Constructor<geo::Circle>());"
        );
        assert_eq!(
            emit(&lib, sized),
            "rb_cgeo_Circle.define_constructor(\
             Rice::Constructor<geo::Circle, double, const geo::Point&>());"
        );
    }
}
