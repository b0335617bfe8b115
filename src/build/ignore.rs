//! Gitignore-style path filtering for the builder.
//!
//! Supported syntax: `#` comments, a trailing `/` for directory-only
//! patterns, a leading `/` (or any inner `/`) to anchor a pattern to the
//! registry root, and glob wildcards. Negated patterns (`!`) are ignored.

use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct Rule {
    pattern: Pattern,
    anchored: bool,
    dir_only: bool,
}

/// A set of ignore patterns evaluated against paths relative to the
/// registry root.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<Rule>,
}

impl IgnoreRules {
    /// No patterns; nothing is ignored.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build rules from pattern lines.
    pub fn from_patterns<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self::empty();
        for line in lines {
            rules.add(line.as_ref());
        }
        rules
    }

    /// Rules from `<root>/.gitignore` plus `extra` patterns.
    pub fn load(root: &Path, extra: &[String]) -> Self {
        let mut rules = match fs::read_to_string(root.join(".gitignore")) {
            Ok(content) => Self::from_patterns(content.lines()),
            Err(_) => Self::empty(),
        };
        for line in extra {
            rules.add(line);
        }
        rules
    }

    /// Add a single pattern line.
    pub fn add(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        if line.starts_with('!') {
            tracing::debug!("Negated ignore pattern '{}' is not supported", line);
            return;
        }

        let dir_only = line.ends_with('/');
        let body = line.trim_end_matches('/');
        let anchored = body.contains('/');
        let body = body.trim_start_matches('/');

        match Pattern::new(body) {
            Ok(pattern) => self.rules.push(Rule {
                pattern,
                anchored,
                dir_only,
            }),
            Err(e) => tracing::warn!("Skipping invalid ignore pattern '{}': {}", line, e),
        }
    }

    /// Number of active patterns.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no patterns are active.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Is `path` (relative to the registry root) ignored?
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let full = path.to_string_lossy().replace('\\', "/");
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.rules.iter().any(|rule| {
            if rule.dir_only && !is_dir {
                return false;
            }
            if rule.anchored {
                rule.pattern.matches_with(&full, MATCH_OPTIONS)
            } else {
                rule.pattern.matches_with(&name, MATCH_OPTIONS)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unanchored_pattern_matches_name_anywhere() {
        let rules = IgnoreRules::from_patterns(["node_modules", "*.log"]);
        assert!(rules.is_ignored(Path::new("src/node_modules"), true));
        assert!(rules.is_ignored(Path::new("src/ui/debug.log"), false));
        assert!(!rules.is_ignored(Path::new("src/ui/button.ts"), false));
    }

    #[test]
    fn anchored_pattern_matches_full_path() {
        let rules = IgnoreRules::from_patterns(["/src/internal", "src/*/legacy"]);
        assert!(rules.is_ignored(Path::new("src/internal"), true));
        assert!(rules.is_ignored(Path::new("src/ui/legacy"), true));
        assert!(!rules.is_ignored(Path::new("lib/src/internal"), true));
    }

    #[test]
    fn directory_only_pattern_skips_files() {
        let rules = IgnoreRules::from_patterns(["drafts/"]);
        assert!(rules.is_ignored(Path::new("src/drafts"), true));
        assert!(!rules.is_ignored(Path::new("src/ui/drafts"), false));
    }

    #[test]
    fn comments_and_negations_are_skipped() {
        let rules = IgnoreRules::from_patterns(["# comment", "", "!keep"]);
        assert!(rules.is_empty());
    }

    #[test]
    fn loads_gitignore_and_extra_patterns() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".gitignore"), "dist\n").unwrap();

        let rules = IgnoreRules::load(temp.path(), &["*.bak".to_string()]);
        assert_eq!(rules.len(), 2);
        assert!(rules.is_ignored(Path::new("dist"), true));
        assert!(rules.is_ignored(Path::new("src/ui/a.bak"), false));
    }
}
