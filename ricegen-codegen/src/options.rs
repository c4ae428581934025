//! Generation options.

use crate::builder::Indent;

/// Options for rendering the generated unit.
///
/// There is no configuration file; callers build this value directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Indentation used inside the init function body.
    pub indent: Indent,
    /// Whether to start the unit with the root's banner comment.
    pub banner: bool,
}

impl GeneratorOptions {
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn without_banner(mut self) -> Self {
        self.banner = false;
        self
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent: Indent::CPP,
            banner: true,
        }
    }
}
