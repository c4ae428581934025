//! Pipeline snapshot plugin for debugging.
//!
//! Captures the node tree after each phase, so the effect of build, sort and
//! aggregation can be inspected as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use eyre::{Context, Result};
use serde::Serialize;

use super::{PipelineContext, Plugin};
use crate::{Diagnostic, node::NodeSnapshot};

/// A snapshot of the pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// The node tree, from the root down.
    pub tree: NodeSnapshot,

    /// The rendered unit (available after the "emit" phase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures pipeline state after each phase.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use ricegen_codegen::pipeline::{Pipeline, SnapshotPlugin};
/// use ricegen_ir::Library;
///
/// let library = Library::new("shapes");
/// let snapshots = Arc::new(SnapshotPlugin::new());
/// Pipeline::new()
///     .plugin(snapshots.clone())
///     .generate(&library)
///     .unwrap();
///
/// let phases: Vec<String> = snapshots.snapshots().into_iter().map(|s| s.phase).collect();
/// assert_eq!(phases, ["build", "sort", "emit"]);
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots.
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that also writes each snapshot to a
    /// directory as `<phase>.json`.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn capture_snapshot(&self, phase: &str, ctx: &PipelineContext<'_>) -> PhaseSnapshot {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            tree: ctx.tree.snapshot(ctx.tree.root()),
            unit: ctx.unit.as_ref().map(|unit| unit.content.clone()),
            diagnostics: ctx.generation.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(snapshot.clone());
        snapshot
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote phase snapshot");
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut PipelineContext<'_>) -> Result<()> {
        let snapshot = self.capture_snapshot(phase, ctx);

        if let Some(dir) = &self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }

        Ok(())
    }
}
