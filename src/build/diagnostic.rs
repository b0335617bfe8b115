//! Warnings collected while building the block graph.
//!
//! Diagnostics never change the shape of the graph; they explain why a file
//! or directory is missing from it.

use std::fmt;
use std::path::{Path, PathBuf};

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// No language resolver handles the file.
    UnsupportedFile,
    /// A directory inside a category while `allowSubdirectories` is off.
    SubdirectoryDisallowed,
    /// A second file or directory produced an already-used block name.
    DuplicateBlockName,
}

/// A single warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The kind of issue.
    pub kind: DiagnosticKind,
    /// The skipped path, relative to the registry root.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing the issue.
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(kind: DiagnosticKind, path: &Path, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_path_buf(),
            message: message.into(),
            hint: None,
        }
    }

    /// Add a fix suggestion.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({})", hint)?;
        }
        Ok(())
    }
}

/// Append-only sink the builder reports into.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    /// All recorded diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_and_hint() {
        let diag = Diagnostic::new(
            DiagnosticKind::SubdirectoryDisallowed,
            Path::new("src/utils/array"),
            "Skipped subdirectory",
        )
        .with_hint("set allowSubdirectories: true");

        let text = diag.to_string();
        assert!(text.contains("src/utils/array"));
        assert!(text.contains("allowSubdirectories"));
    }

    #[test]
    fn sink_filters_by_kind() {
        let mut sink = Diagnostics::new();
        sink.push(Diagnostic::new(
            DiagnosticKind::UnsupportedFile,
            Path::new("a.rb"),
            "unsupported",
        ));
        sink.push(Diagnostic::new(
            DiagnosticKind::SubdirectoryDisallowed,
            Path::new("dir"),
            "disallowed",
        ));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.of_kind(DiagnosticKind::UnsupportedFile).count(), 1);
    }
}
