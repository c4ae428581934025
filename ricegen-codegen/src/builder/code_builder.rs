//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for incremental rendering.
///
/// # Example (Consuming API)
///
/// ```
/// use ricegen_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::cpp()
///     .line("void Init_shapes()")
///     .line("{")
///     .indent()
///     .line("Rice::define_module(\"Shapes\");")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "void Init_shapes()\n{\n    Rice::define_module(\"Shapes\");\n}\n");
/// ```
///
/// # Example (Mutable API)
///
/// ```
/// use ricegen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::cpp();
/// builder
///     .push_line("{")
///     .push_indent()
///     .push_lines("first();\nsecond();")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "{\n    first();\n    second();\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation.
    pub fn cpp() -> Self {
        Self::new(Indent::CPP)
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add every line of a multi-line fragment at the current indentation.
    /// Empty lines stay empty.
    pub fn push_lines(&mut self, s: &str) -> &mut Self {
        for line in s.lines() {
            if line.is_empty() {
                self.push_blank();
            } else {
                self.push_line(line);
            }
        }
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Build the final string.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Build the final string without its trailing newline, for fragments
    /// that are placed by someone else.
    pub fn build_fragment(self) -> String {
        let mut buffer = self.buffer;
        if buffer.ends_with('\n') {
            buffer.pop();
        }
        buffer
    }

    fn write_indent(&mut self) {
        self.indent.write(&mut self.buffer, self.indent_level);
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}
