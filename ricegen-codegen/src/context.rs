//! State shared by all nodes during one generation run.

use indexmap::IndexSet;

use crate::Diagnostic;

/// Context passed through build, scoped to one generation run.
///
/// Holds what used to be cross-cutting global state: which headers some
/// node already includes, and the diagnostics collected along the way.
#[derive(Debug, Default)]
pub struct GenerationContext {
    claimed_headers: IndexSet<String>,
    /// Diagnostics collected during generation.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `header` is included. Returns false if it already was.
    pub fn claim_header(&mut self, header: &str) -> bool {
        if self.claimed_headers.contains(header) {
            return false;
        }
        self.claimed_headers.insert(header.to_string())
    }

    /// Headers included so far, in first-claim order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.claimed_headers.iter().map(String::as_str)
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
    }
}
