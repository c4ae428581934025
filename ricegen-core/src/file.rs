//! Write rules for generated sources on disk.

use std::path::Path;

use eyre::Result;

/// How to handle an extension source that already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Regenerate on every run
    #[default]
    Always,
    /// Keep a file the user may have edited
    IfMissing,
}

/// Rules applied when a unit is written to disk
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
    /// Line placed above the generated content, e.g. a license comment
    pub header: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteResult {
    Written,
    Skipped,
}

/// Write `content` to `path` as `rules` say, creating parent directories.
pub(crate) fn write_with_rules(path: &Path, content: &str, rules: &FileRules) -> Result<WriteResult> {
    if rules.overwrite == Overwrite::IfMissing && path.exists() {
        return Ok(WriteResult::Skipped);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    match rules.header {
        Some(header) => std::fs::write(path, format!("{header}\n{content}"))?,
        None => std::fs::write(path, content)?,
    }
    Ok(WriteResult::Written)
}
