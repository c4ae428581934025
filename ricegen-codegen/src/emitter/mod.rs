//! Fragment aggregation and unit output.
//!
//! The [`Emitter`] turns a built, sorted [`NodeTree`] into one
//! [`OutputUnit`]: it moves every node's fragments up into the root, asks
//! the root for its own text, and lets an [`OutputStrategy`] lay the result
//! out. Only a finished unit ever reaches the [`OutputSink`].

mod single_file;

use eyre::{Context, Result};
use ricegen_core::{OutputSink, OutputUnit};
use ricegen_ir::validate_identifier;

use crate::node::{Fragments, NodeId, NodeState, NodeTree};

pub use single_file::SingleFileWriter;

/// Lays out an aggregated root as final text.
pub trait OutputStrategy: Send + Sync {
    /// The name of this strategy (for logging).
    fn name(&self) -> &'static str;

    /// Render the unit. `preamble` is the root's own text; `fragments` are
    /// the root's fully aggregated sequences.
    fn render(&self, unit_name: &str, preamble: &str, fragments: &Fragments) -> String;
}

/// Aggregates a node tree and writes it through an [`OutputStrategy`].
///
/// # Example
///
/// ```
/// use ricegen_codegen::{GenerationContext, emitter::Emitter, node::NodeTree};
/// use ricegen_core::MemorySink;
/// use ricegen_ir::{Declaration, Hierarchy, Library};
///
/// let mut lib = Library::new("shapes");
/// lib.add(lib.root(), Declaration::class("Shape")).unwrap();
///
/// let mut tree = NodeTree::new(&lib);
/// let root = tree.root();
/// tree.build(root, &mut GenerationContext::new()).unwrap();
/// tree.sort(root).unwrap();
///
/// let mut sink = MemorySink::new();
/// Emitter::new().write(&mut tree, &mut sink).unwrap();
///
/// let unit = sink.get("shapes").unwrap();
/// assert!(unit.content.contains("Rice::define_class<Shape>(\"Shape\");"));
/// ```
pub struct Emitter {
    strategy: Box<dyn OutputStrategy>,
}

impl Emitter {
    /// An emitter producing one Rice source file per root.
    pub fn new() -> Self {
        Self::with_strategy(SingleFileWriter::default())
    }

    pub fn with_strategy(strategy: impl OutputStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    pub fn strategy(&self) -> &dyn OutputStrategy {
        self.strategy.as_ref()
    }

    /// Aggregate the subtree rooted at `id`.
    ///
    /// Children are processed first, in sorted order; then the node's
    /// fragments are moved onto its parent's sequences. Within each category
    /// the result is the node's own fragments followed by each child's
    /// aggregated fragments. The root keeps everything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfOrder`](crate::Error::OutOfOrder) unless every
    /// node of the subtree is sorted and not yet processed. Nothing is
    /// modified in that case.
    pub fn process(&self, tree: &mut NodeTree<'_>, id: NodeId) -> crate::Result<()> {
        tree.expect_subtree(id, "process", NodeState::Sorted, "sorted")?;
        aggregate(tree, id);
        Ok(())
    }

    /// Process the whole tree and render the unit, without writing it.
    ///
    /// The unit name must be a valid identifier; the tree is left untouched
    /// otherwise.
    pub fn render(&self, tree: &mut NodeTree<'_>) -> crate::Result<OutputUnit> {
        if let Some(reason) = validate_identifier(tree.unit_name()) {
            return Err(crate::Error::InvalidUnitName {
                name: tree.unit_name().to_string(),
                reason,
            });
        }

        let root = tree.root();
        self.process(tree, root)?;
        let preamble = tree.emit(root)?;
        let content = self
            .strategy
            .render(tree.unit_name(), &preamble, tree.node(root).fragments());

        Ok(OutputUnit::new(tree.unit_name(), content))
    }

    /// Process the whole tree, render it, and hand the unit to `sink`.
    ///
    /// The sink is called exactly once, and only if rendering succeeded.
    pub fn write(&self, tree: &mut NodeTree<'_>, sink: &mut dyn OutputSink) -> Result<OutputUnit> {
        let unit = self
            .render(tree)
            .wrap_err_with(|| format!("failed to generate '{}'", tree.unit_name()))?;

        sink.accept(&unit)
            .wrap_err_with(|| format!("failed to write '{}'", unit.name))?;
        tracing::info!(
            unit = %unit.name,
            strategy = self.strategy.name(),
            bytes = unit.content.len(),
            "wrote unit"
        );

        Ok(unit)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

fn aggregate(tree: &mut NodeTree<'_>, id: NodeId) {
    let children = tree.node(id).children().to_vec();
    for child in children {
        aggregate(tree, child);
    }

    let node = tree.node_mut(id);
    node.state = NodeState::Processed;
    if let Some(parent) = node.parent {
        let mut fragments = std::mem::take(&mut node.fragments);
        tree.node_mut(parent).fragments.append(&mut fragments);
    }
}

#[cfg(test)]
mod tests {
    use ricegen_core::MemorySink;
    use ricegen_ir::{Declaration, Hierarchy, Library};

    use super::*;
    use crate::{Error, GenerationContext};

    fn sorted(lib: &Library) -> NodeTree<'_> {
        let mut tree = NodeTree::new(lib);
        let root = tree.root();
        tree.build(root, &mut GenerationContext::new()).unwrap();
        tree.sort(root).unwrap();
        tree
    }

    fn nested_library() -> Library {
        let mut lib = Library::new("r");
        lib.add_header("inc_R.h");
        let m = lib
            .add(lib.root(), Declaration::namespace("m").header("inc_M.h"))
            .unwrap();
        lib.add(m, Declaration::namespace("l").header("inc_L.h"))
            .unwrap();
        lib
    }

    #[test]
    fn test_includes_propagate_own_first() {
        let lib = nested_library();
        let mut tree = sorted(&lib);
        let root = tree.root();

        Emitter::new().process(&mut tree, root).unwrap();

        assert_eq!(
            tree.node(root).fragments().includes,
            [
                "#include <rice/rice.hpp>",
                "#include \"inc_R.h\"",
                "#include \"inc_M.h\"",
                "#include \"inc_L.h\""
            ]
        );
    }

    #[test]
    fn test_injected_fragments_keep_preorder() {
        let lib = nested_library();
        let mut tree = sorted(&lib);
        let root = tree.root();
        let m = tree.node(root).children()[0];
        let l = tree.node(m).children()[0];
        for (id, include) in [(root, "inc_R"), (m, "inc_M"), (l, "inc_L")] {
            tree.node_mut(id).fragments = Fragments {
                includes: vec![include.to_string()],
                ..Fragments::default()
            };
        }

        Emitter::new().process(&mut tree, root).unwrap();

        assert_eq!(
            tree.node(root).fragments().includes,
            ["inc_R", "inc_M", "inc_L"]
        );
        assert!(tree.node(m).fragments().is_empty());
        assert!(tree.node(l).fragments().is_empty());
    }

    #[test]
    fn test_siblings_propagate_in_sorted_order() {
        let mut lib = Library::new("lib");
        let base = lib.add(lib.root(), Declaration::class("Base")).unwrap();
        lib.add(lib.root(), Declaration::class("Derived").with_superclass(base))
            .unwrap();
        lib.add(lib.root(), Declaration::function("helper"))
            .unwrap();
        let mut tree = sorted(&lib);
        let root = tree.root();

        Emitter::new().process(&mut tree, root).unwrap();

        let registrations = &tree.node(root).fragments().registrations;
        let position = |needle: &str| {
            registrations
                .iter()
                .position(|r| r.contains(needle))
                .unwrap()
        };
        assert!(position("rb_cBase =") < position("\"helper\""));
        assert!(position("\"helper\"") < position("rb_cDerived ="));
    }

    #[test]
    fn test_no_fragment_is_lost_or_duplicated() {
        let mut lib = Library::new("shapes");
        lib.add_header("shapes.h");
        let geo = lib.add(lib.root(), Declaration::namespace("geo")).unwrap();
        let shape = lib
            .add(geo, Declaration::class("Shape").header("geo/shape.h"))
            .unwrap();
        lib.add(shape, Declaration::constructor()).unwrap();
        lib.add(shape, Declaration::method("scale")).unwrap();
        lib.add(shape, Declaration::method("scale")).unwrap();
        lib.add(geo, Declaration::enumeration("Color").value("Red"))
            .unwrap();
        lib.add(lib.root(), Declaration::class("Circle").with_superclass(shape))
            .unwrap();

        let mut tree = sorted(&lib);
        let root = tree.root();
        let mut before: Vec<String> = tree
            .descendants(root)
            .iter()
            .flat_map(|&id| tree.node(id).fragments().iter().cloned())
            .collect();

        Emitter::new().process(&mut tree, root).unwrap();

        let mut after: Vec<String> = tree.node(root).fragments().iter().cloned().collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert!(
            tree.descendants(root)
                .iter()
                .all(|&id| tree.node(id).state() == NodeState::Processed)
        );
    }

    #[test]
    fn test_process_requires_sorted_tree() {
        let mut lib = Library::new("lib");
        lib.add(lib.root(), Declaration::class("Shape")).unwrap();
        let mut tree = NodeTree::new(&lib);
        let root = tree.root();
        tree.build(root, &mut GenerationContext::new()).unwrap();

        let err = Emitter::new().process(&mut tree, root).unwrap_err();

        assert!(matches!(
            err,
            Error::OutOfOrder { operation: "process", found: NodeState::Built, .. }
        ));
        assert_eq!(tree.node(root).state(), NodeState::Built);
    }

    #[test]
    fn test_process_twice_is_rejected() {
        let lib = Library::new("lib");
        let mut tree = sorted(&lib);
        let root = tree.root();
        let emitter = Emitter::new();

        emitter.process(&mut tree, root).unwrap();
        let err = emitter.process(&mut tree, root).unwrap_err();

        assert!(matches!(
            err,
            Error::OutOfOrder { found: NodeState::Processed, .. }
        ));
    }

    #[test]
    fn test_failed_write_leaves_sink_untouched() {
        let mut lib = Library::new("lib");
        lib.add(lib.root(), Declaration::class("Shape")).unwrap();
        let mut tree = NodeTree::new(&lib);
        let root = tree.root();
        tree.build(root, &mut GenerationContext::new()).unwrap();
        let mut sink = MemorySink::new();

        let err = Emitter::new().write(&mut tree, &mut sink).unwrap_err();

        assert!(sink.is_empty());
        assert!(err.to_string().contains("failed to generate 'lib'"));
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_invalid_unit_name_is_not_written() {
        for name in ["", "my-ext"] {
            let lib = Library::new(name);
            let mut tree = sorted(&lib);
            let mut sink = MemorySink::new();

            let err = Emitter::new().write(&mut tree, &mut sink).unwrap_err();

            assert!(sink.is_empty());
            assert!(matches!(
                err.downcast_ref::<Error>(),
                Some(Error::InvalidUnitName { .. })
            ));
            assert_eq!(tree.node(tree.root()).state(), NodeState::Sorted);
        }
    }

    struct Listing;

    impl OutputStrategy for Listing {
        fn name(&self) -> &'static str {
            "listing"
        }

        fn render(&self, unit_name: &str, _preamble: &str, fragments: &Fragments) -> String {
            format!("{unit_name}: {} fragments", fragments.len())
        }
    }

    #[test]
    fn test_custom_strategy() {
        let mut lib = Library::new("lib");
        lib.add(lib.root(), Declaration::class("Shape")).unwrap();
        let mut tree = sorted(&lib);
        let mut sink = MemorySink::new();

        let unit = Emitter::with_strategy(Listing)
            .write(&mut tree, &mut sink)
            .unwrap();

        assert_eq!(unit.content, "lib: 2 fragments");
        assert_eq!(sink.units(), [unit]);
    }
}
