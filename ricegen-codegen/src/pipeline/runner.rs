//! Pipeline orchestrator.

use eyre::{Context, Result, bail, eyre};
use ricegen_core::OutputSink;
use ricegen_ir::Hierarchy;

use super::{
    Phase, PipelineContext, Plugin,
    phases::{BuildPhase, EmitPhase, SortPhase},
};
use crate::emitter::Emitter;

/// The generation pipeline orchestrator.
///
/// The pipeline runs the built-in phases (build, sort, emit) followed by any
/// user phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::with_output_dir(".ricegen/debug"))
///     .phase(MyCheckPhase);
///
/// let ctx = pipeline.run(&library, &mut FileSink::new("ext"))?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
    emitter: Emitter,
}

impl Pipeline {
    /// Create a new pipeline with the default emitter.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
            emitter: Emitter::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Use a different emitter (e.g. one with another output strategy).
    pub fn emitter(mut self, emitter: Emitter) -> Self {
        self.emitter = emitter;
        self
    }

    /// Run every phase on `hierarchy` without writing anything.
    ///
    /// Executes all phases in order:
    /// 1. BuildPhase - builds the node tree
    /// 2. SortPhase - orders siblings by hierarchy rank
    /// 3. EmitPhase - aggregates fragments and renders the unit
    /// 4. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin fails, or if a phase leaves
    /// error diagnostics behind.
    pub fn generate<'h>(&self, hierarchy: &'h dyn Hierarchy) -> Result<PipelineContext<'h>> {
        let mut ctx = PipelineContext::new(hierarchy);
        let emit = EmitPhase::new(&self.emitter);

        // Built-in phases in execution order
        let builtin_phases: [&dyn Phase; 3] = [&BuildPhase, &SortPhase, &emit];
        for phase in builtin_phases {
            self.run_phase(phase, &mut ctx)?;
        }
        for phase in &self.phases {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Generate `hierarchy` and hand the unit to `sink`.
    ///
    /// The sink is called exactly once, after every phase succeeded; on any
    /// failure it is not called at all.
    pub fn run<'h>(
        &self,
        hierarchy: &'h dyn Hierarchy,
        sink: &mut dyn OutputSink,
    ) -> Result<PipelineContext<'h>> {
        let ctx = self.generate(hierarchy)?;
        let unit = ctx
            .unit
            .as_ref()
            .ok_or_else(|| eyre!("no unit was rendered for '{}'", ctx.tree.unit_name()))?;

        sink.accept(unit)
            .wrap_err_with(|| format!("failed to write '{}'", unit.name))?;
        tracing::info!(
            unit = %unit.name,
            warnings = ctx.generation.warning_count(),
            "generation finished"
        );

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut PipelineContext<'_>) -> Result<()> {
        let phase_name = phase.name();
        tracing::info!(
            phase = phase_name,
            description = phase.description(),
            "running phase"
        );

        for plugin in &self.plugins {
            plugin
                .on_before_phase(phase_name, ctx)
                .wrap_err_with(|| format!("plugin '{}' failed before {phase_name}", plugin.name()))?;
        }

        phase
            .run(ctx)
            .wrap_err_with(|| format!("{phase_name} phase failed"))?;

        for plugin in &self.plugins {
            plugin
                .on_after_phase(phase_name, ctx)
                .wrap_err_with(|| format!("plugin '{}' failed after {phase_name}", plugin.name()))?;
        }

        if ctx.generation.has_errors() {
            for error in ctx.generation.errors() {
                tracing::error!("{error}");
            }
            bail!(
                "{} error(s) reported during {phase_name}",
                ctx.generation.error_count()
            );
        }

        tracing::debug!(
            phase = phase_name,
            diagnostics = ctx.generation.diagnostics.len(),
            "phase complete"
        );
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use ricegen_core::MemorySink;
    use ricegen_ir::{Declaration, Library};

    use super::*;
    use crate::node::NodeState;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut PipelineContext<'_>) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut PipelineContext<'_>) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Reports an error diagnostic, as a lint would.
    struct RejectAll;

    impl Phase for RejectAll {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn description(&self) -> &'static str {
            "Rejects every unit"
        }

        fn run(&self, ctx: &mut PipelineContext<'_>) -> Result<()> {
            ctx.generation.add_error(self.name(), "rejected");
            Ok(())
        }
    }

    fn make_test_library() -> Library {
        let mut lib = Library::new("shapes");
        let shape = lib.add(lib.root(), Declaration::class("Shape")).unwrap();
        lib.add(lib.root(), Declaration::class("Circle").with_superclass(shape))
            .unwrap();
        lib
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let lib = make_test_library();

        let ctx = Pipeline::new()
            .generate(&lib)
            .expect("pipeline should succeed");

        assert!(ctx.unit.is_some());
        let root = ctx.tree.root();
        assert_eq!(ctx.tree.node(root).state(), NodeState::Processed);
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let lib = make_test_library();
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline.generate(&lib).expect("pipeline should succeed");

        // 3 built-in phases = 3 before + 3 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 3);
        assert_eq!(after_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_run_writes_once() {
        let lib = make_test_library();
        let mut sink = MemorySink::new();

        let ctx = Pipeline::new().run(&lib, &mut sink).unwrap();

        assert_eq!(sink.units().len(), 1);
        assert_eq!(Some(&sink.units()[0]), ctx.unit.as_ref());
    }

    #[test]
    fn test_error_diagnostics_stop_the_write() {
        let lib = make_test_library();
        let mut sink = MemorySink::new();

        let err = Pipeline::new()
            .phase(RejectAll)
            .run(&lib, &mut sink)
            .unwrap_err();

        assert!(sink.is_empty());
        assert_eq!(err.to_string(), "1 error(s) reported during reject");
    }

    #[test]
    fn test_cycle_aborts_before_write() {
        let mut lib = make_test_library();
        let shape = lib.lookup("Shape").unwrap();
        let circle = lib.lookup("Circle").unwrap();
        lib.set_superclass(shape, circle).unwrap();
        let mut sink = MemorySink::new();

        let err = Pipeline::new().run(&lib, &mut sink).unwrap_err();

        assert!(sink.is_empty());
        assert_eq!(err.to_string(), "sort phase failed");
        assert!(matches!(
            err.downcast_ref::<crate::Error>(),
            Some(crate::Error::CyclicHierarchy { .. })
        ));
    }
}
