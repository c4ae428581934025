//! Core utilities and types for the ricegen Ruby extension generator.
//!
//! This crate provides output handling and identifier utilities shared by
//! the rest of the workspace.

mod file;
mod sink;
mod utils;

// Write rules
pub use file::{FileRules, Overwrite};
// Output sinks
pub use sink::{FileSink, MemorySink, OutputSink, OutputUnit};
// String utilities
pub use utils::{as_variable, to_pascal_case, to_snake_case};
