//! Output sinks for generated units.
//!
//! A unit is the complete text generated for one root node. Sinks decide
//! where it goes; path derivation from the unit name is their concern, not
//! the generator's.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};

use crate::{
    FileRules,
    file::{WriteResult, write_with_rules},
};

/// The final, fully aggregated output for one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Name of the root the unit was generated from (the extension name).
    pub name: String,
    /// Complete generated source.
    pub content: String,
}

impl OutputUnit {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Destination for generated units.
///
/// A sink is invoked exactly once per root, and only after generation for
/// that root has fully succeeded.
pub trait OutputSink {
    /// Accept a finished unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit could not be persisted.
    fn accept(&mut self, unit: &OutputUnit) -> Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn accept(&mut self, unit: &OutputUnit) -> Result<()> {
        (**self).accept(unit)
    }
}

/// Writes each unit to `<dir>/<name>.<extension>`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    extension: String,
    rules: FileRules,
    written: Vec<PathBuf>,
}

impl FileSink {
    /// Default extension for Rice extension sources.
    pub const DEFAULT_EXTENSION: &'static str = "rb.cpp";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: Self::DEFAULT_EXTENSION.to_string(),
            rules: FileRules::default(),
            written: Vec::new(),
        }
    }

    /// Use a different file extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Use custom write rules (overwrite behavior, header).
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Path a unit with the given name is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.extension))
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl OutputSink for FileSink {
    fn accept(&mut self, unit: &OutputUnit) -> Result<()> {
        let path = self.path_for(&unit.name);
        match write_with_rules(&path, &unit.content, &self.rules)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?
        {
            WriteResult::Written => {
                tracing::info!(path = %path.display(), "wrote extension source");
                self.written.push(path);
            }
            WriteResult::Skipped => {
                tracing::debug!(path = %path.display(), "kept existing extension source");
            }
        }

        Ok(())
    }
}

/// Collects units in memory, for previews and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    units: Vec<OutputUnit>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All units received so far, in order.
    pub fn units(&self) -> &[OutputUnit] {
        &self.units
    }

    /// Find a unit by name.
    pub fn get(&self, name: &str) -> Option<&OutputUnit> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn into_units(self) -> Vec<OutputUnit> {
        self.units
    }
}

impl OutputSink for MemorySink {
    fn accept(&mut self, unit: &OutputUnit) -> Result<()> {
        self.units.push(unit.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::Overwrite;

    #[test]
    fn test_file_sink_derives_path_from_name() {
        let temp = TempDir::new().unwrap();
        let mut sink = FileSink::new(temp.path());

        sink.accept(&OutputUnit::new("shapes", "// code\n")).unwrap();

        let path = temp.path().join("shapes.rb.cpp");
        assert_eq!(fs::read_to_string(&path).unwrap(), "// code\n");
        assert_eq!(sink.written(), &[path]);
    }

    #[test]
    fn test_file_sink_custom_extension() {
        let temp = TempDir::new().unwrap();
        let sink = FileSink::new(temp.path()).with_extension("cpp");

        assert_eq!(sink.path_for("shapes"), temp.path().join("shapes.cpp"));
    }

    #[test]
    fn test_file_sink_if_missing_keeps_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shapes.rb.cpp");
        fs::write(&path, "hand edited").unwrap();

        let mut sink = FileSink::new(temp.path()).with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
            header: None,
        });
        sink.accept(&OutputUnit::new("shapes", "generated")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hand edited");
        assert!(sink.written().is_empty());
    }

    #[test]
    fn test_memory_sink_collects_units() {
        let mut sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.accept(&OutputUnit::new("a", "1")).unwrap();
        sink.accept(&OutputUnit::new("b", "2")).unwrap();

        assert_eq!(sink.units().len(), 2);
        assert_eq!(sink.get("b").map(|u| u.content.as_str()), Some("2"));
        assert!(sink.get("c").is_none());
    }
}
