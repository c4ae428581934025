//! Generation pipeline.
//!
//! A [`Pipeline`] runs the three passes of a generation as named phases
//! (`build` → `sort` → `emit`), followed by any user phases, and calls
//! plugin hooks before and after each one. Only once every phase succeeded
//! and no error diagnostic was recorded is the unit handed to the sink.
//!
//! # Example
//!
//! ```
//! use ricegen_codegen::pipeline::Pipeline;
//! use ricegen_core::MemorySink;
//! use ricegen_ir::{Declaration, Hierarchy, Library};
//!
//! let mut lib = Library::new("shapes");
//! lib.add(lib.root(), Declaration::class("Shape")).unwrap();
//!
//! let mut sink = MemorySink::new();
//! let ctx = Pipeline::new().run(&lib, &mut sink).unwrap();
//!
//! for warning in ctx.generation.warnings() {
//!     eprintln!("{warning}");
//! }
//! assert_eq!(sink.units().len(), 1);
//! ```

mod context;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::PipelineContext;
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
