use ricegen_core::as_variable;

use super::OutputStrategy;
use crate::{GeneratorOptions, builder::CodeBuilder, node::Fragments};

/// Writes a whole extension as one C++ source file.
///
/// Layout: banner, includes, declarations, then every registration inside
/// the `Init_<name>` function Ruby calls when loading the extension.
#[derive(Debug, Clone, Default)]
pub struct SingleFileWriter {
    options: GeneratorOptions,
}

impl SingleFileWriter {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }
}

impl OutputStrategy for SingleFileWriter {
    fn name(&self) -> &'static str {
        "single_file"
    }

    fn render(&self, unit_name: &str, preamble: &str, fragments: &Fragments) -> String {
        let mut builder = CodeBuilder::new(self.options.indent);

        if self.options.banner && !preamble.is_empty() {
            builder.push_lines(preamble).push_blank();
        }

        for include in &fragments.includes {
            builder.push_line(include);
        }
        if !fragments.includes.is_empty() {
            builder.push_blank();
        }

        for declaration in &fragments.declarations {
            builder.push_lines(declaration);
        }
        if !fragments.declarations.is_empty() {
            builder.push_blank();
        }

        builder
            .push_line("extern \"C\"")
            .push_line(&format!("void Init_{}()", as_variable(unit_name)))
            .push_line("{")
            .push_indent();
        for registration in &fragments.registrations {
            builder.push_lines(registration);
        }
        builder.push_dedent().push_line("}");

        builder.build()
    }
}
