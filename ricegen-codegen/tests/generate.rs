//! End-to-end generation tests: TOML library description in, Rice C++ out.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::{fs, str::FromStr};

use ricegen_codegen::{
    GenerationContext, Severity,
    emitter::Emitter,
    node::{NodeState, NodeTree},
    pipeline::Pipeline,
};
use ricegen_core::{FileSink, MemorySink};
use ricegen_ir::Library;
use tempfile::TempDir;

const SHAPES: &str = r#"
name = "shapes"
headers = ["shapes.h"]

[[entities]]
kind = "namespace"
name = "geo"
header = "geo/geo.h"

[[entities.children]]
kind = "class"
name = "Circle"
superclass = "geo::Shape"

[[entities.children.children]]
kind = "constructor"
params = [{ name = "radius", type = "double" }]

[[entities.children]]
kind = "class"
name = "Shape"

[[entities.children.children]]
kind = "method"
name = "getArea"
returns = "double"

[[entities.children.children]]
kind = "method"
name = "scale"
params = [{ type = "double" }]

[[entities.children.children]]
kind = "method"
name = "scale"
params = [{ type = "double" }, { type = "double" }]

[[entities.children.children]]
kind = "method"
name = "count"
returns = "int"
static = true

[[entities.children.children]]
kind = "method"
name = "debugDump"
public = false

[[entities.children]]
kind = "enum"
name = "Color"
values = ["Red", "Green"]

[[entities.children]]
kind = "function"
name = "unitCircle"
returns = "geo::Circle"

[[entities]]
kind = "class"
name = "Legacy"
ignored = true

[[entities]]
kind = "function"
name = "version"
returns = "int"
"#;

fn shapes() -> Library {
    Library::from_str(SHAPES).expect("Failed to parse library")
}

/// Generate through the pipeline and return the unit's content.
fn generate(lib: &Library) -> String {
    let mut sink = MemorySink::new();
    Pipeline::new()
        .run(lib, &mut sink)
        .expect("generation should succeed");
    sink.into_units()
        .pop()
        .expect("one unit should be written")
        .content
}

#[test]
fn test_shapes_extension() {
    let content = generate(&shapes());
    insta::assert_snapshot!("shapes_extension", content);
}

#[test]
fn test_categories_are_ordered() {
    let content = generate(&shapes());

    let last_include = content.rfind("#include").unwrap();
    let first_typedef = content.find("typedef").unwrap();
    let last_typedef = content.rfind("typedef").unwrap();
    let first_registration = content.find("Rice::define_module").unwrap();

    assert!(last_include < first_typedef);
    assert!(last_typedef < first_registration);
}

#[test]
fn test_ineligible_entities_are_absent() {
    let content = generate(&shapes());

    assert!(!content.contains("Legacy"));
    assert!(!content.contains("debugDump"));
    assert!(!content.contains("debug_dump"));
}

#[test]
fn test_base_class_registered_before_derived() {
    let content = generate(&shapes());

    let shape = content.find("rb_cgeo_Shape =").unwrap();
    let circle = content.find("rb_cgeo_Circle =").unwrap();
    assert!(shape < circle);
}

#[test]
fn test_file_sink_writes_named_source() {
    let lib = shapes();
    let temp = TempDir::new().unwrap();
    let mut sink = FileSink::new(temp.path().join("ext"));

    let ctx = Pipeline::new().run(&lib, &mut sink).unwrap();

    let path = temp.path().join("ext").join("shapes.rb.cpp");
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(Some(written.as_str()), ctx.unit.as_ref().map(|u| u.content.as_str()));
    assert_eq!(sink.written(), &[path]);
}

#[test]
fn test_manual_passes_match_pipeline() {
    let lib = shapes();
    let mut tree = NodeTree::new(&lib);
    let root = tree.root();
    let mut ctx = GenerationContext::new();

    tree.build(root, &mut ctx).unwrap();
    tree.sort(root).unwrap();
    let mut sink = MemorySink::new();
    let unit = Emitter::new().write(&mut tree, &mut sink).unwrap();

    assert_eq!(unit.content, generate(&lib));
    assert_eq!(tree.node(root).state(), NodeState::Processed);
    assert!(ctx.diagnostics.is_empty());
}

#[test]
fn test_unwrapped_superclass_warns() {
    let lib = Library::from_str(
        r#"
        name = "widgets"

        [[entities]]
        kind = "class"
        name = "Base"
        public = false

        [[entities]]
        kind = "class"
        name = "Button"
        superclass = "Base"
        "#,
    )
    .unwrap();
    let mut sink = MemorySink::new();

    let ctx = Pipeline::new().run(&lib, &mut sink).unwrap();

    let warnings: Vec<_> = ctx
        .generation
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].location.as_deref(), Some("Button"));

    let content = &sink.units()[0].content;
    assert!(content.contains("Rice::define_class<Button>(\"Button\");"));
}
