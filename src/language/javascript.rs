//! JavaScript and TypeScript dependency extraction.
//!
//! Imports are found with regexes rather than a parser. Relative imports are
//! resolved lexically, so `./icon.js` pointing at `icon.ts` still lands on
//! the right block.

use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{BlocksmithError, Result};

use super::paths::{local_specifier, normalize};
use super::{LanguageResolver, ResolveContext, ResolvedDependencies};

const EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

const NODE_BUILTINS: &[&str] = &[
    "assert",
    "buffer",
    "child_process",
    "crypto",
    "events",
    "fs",
    "http",
    "https",
    "net",
    "os",
    "path",
    "process",
    "readline",
    "stream",
    "url",
    "util",
    "worker_threads",
    "zlib",
];

// `import x from 'y'`, `import type { x } from 'y'`, `export * from 'y'`
static FROM_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:import|export)\s+(type\s+)?[^'";]*?\bfrom\s*['"]([^'"]+)['"]"#)
        .unwrap()
});

// `import 'y'`
static BARE_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*import\s*['"]([^'"]+)['"]"#).unwrap());

// `import('y')`, `require('y')`
static CALL_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:import|require)\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap()
});

/// A single import found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// The module literal as written.
    pub literal: String,
    /// `import type` / `export type`.
    pub type_only: bool,
}

/// Extract every import literal from JavaScript/TypeScript source.
pub fn scan_imports(source: &str) -> Vec<ImportStatement> {
    let mut found = Vec::new();

    for caps in FROM_IMPORT.captures_iter(source) {
        found.push(ImportStatement {
            literal: caps[2].to_string(),
            type_only: caps.get(1).is_some(),
        });
    }
    for re in [&*BARE_IMPORT, &*CALL_IMPORT] {
        for caps in re.captures_iter(source) {
            found.push(ImportStatement {
                literal: caps[1].to_string(),
                type_only: false,
            });
        }
    }

    found
}

/// Package name of a bare import: `@scope/pkg/sub` gives `@scope/pkg`.
pub fn package_name(literal: &str) -> &str {
    let mut parts = literal.splitn(3, '/');
    let first = parts.next().unwrap_or(literal);
    if first.starts_with('@') {
        match parts.next() {
            Some(second) => &literal[..first.len() + 1 + second.len()],
            None => literal,
        }
    } else {
        first
    }
}

fn is_builtin(literal: &str) -> bool {
    literal.starts_with("node:") || NODE_BUILTINS.contains(&package_name(literal))
}

fn is_path_alias(literal: &str) -> bool {
    literal.starts_with("@/") || literal.starts_with("~/") || literal.starts_with('$')
}

/// Versions declared in `package.json`, if there is one.
fn declared_versions(cwd: &Path) -> BTreeMap<String, String> {
    let Ok(content) = fs::read_to_string(cwd.join("package.json")) else {
        return BTreeMap::new();
    };
    let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) else {
        tracing::warn!("Ignoring unparseable package.json in {}", cwd.display());
        return BTreeMap::new();
    };

    let mut versions = BTreeMap::new();
    for table in ["peerDependencies", "devDependencies", "dependencies"] {
        if let Some(deps) = json.get(table).and_then(|d| d.as_object()) {
            for (name, version) in deps {
                if let Some(version) = version.as_str() {
                    versions.insert(name.clone(), version.to_string());
                }
            }
        }
    }
    versions
}

/// Resolver for `.js`, `.ts` and their module/JSX variants.
#[derive(Debug, Clone, Default)]
pub struct JavaScriptResolver;

impl JavaScriptResolver {
    /// Create a new resolver.
    pub fn new() -> Self {
        Self
    }

    fn fail(ctx: &ResolveContext<'_>, message: String) -> BlocksmithError {
        BlocksmithError::DependencyResolutionFailed {
            file: ctx.file_path.to_path_buf(),
            message,
        }
    }
}

impl LanguageResolver for JavaScriptResolver {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn matches(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| EXTENSIONS.contains(&e))
    }

    fn resolve_dependencies(&self, ctx: &ResolveContext<'_>) -> Result<ResolvedDependencies> {
        let source = fs::read_to_string(ctx.cwd.join(ctx.file_path))
            .map_err(|e| Self::fail(ctx, e.to_string()))?;
        let versions = declared_versions(ctx.cwd);
        let file_dir = ctx.file_path.parent().unwrap_or(Path::new(""));

        let mut resolved = ResolvedDependencies::default();

        for import in scan_imports(&source) {
            let literal = import.literal;

            if literal.starts_with('.') {
                let target = normalize(&file_dir.join(&literal)).ok_or_else(|| {
                    Self::fail(ctx, format!("import '{}' escapes the registry root", literal))
                })?;

                if ctx
                    .containing_directory
                    .is_some_and(|dir| target.starts_with(dir))
                {
                    let internal = target.to_string_lossy().replace('\\', "/");
                    resolved.imports.insert(literal, internal);
                    continue;
                }

                let specifier = local_specifier(&target, ctx.search_directories).ok_or_else(|| {
                    Self::fail(
                        ctx,
                        format!("import '{}' is outside every category directory", literal),
                    )
                })?;
                resolved.local_dependencies.insert(specifier.clone());
                resolved.imports.insert(literal, specifier);
                continue;
            }

            if literal.starts_with('/') {
                return Err(Self::fail(
                    ctx,
                    format!("absolute import '{}' can't be distributed", literal),
                ));
            }

            if is_builtin(&literal) || is_path_alias(&literal) {
                resolved.imports.insert(literal.clone(), literal);
                continue;
            }

            let package = package_name(&literal).to_string();
            if ctx.excluded_dependency_names.contains(&package) {
                continue;
            }

            let identifier = match versions.get(&package) {
                Some(version) => format!("{}@{}", package, version),
                None => package.clone(),
            };
            if import.type_only {
                resolved.dev_dependencies.insert(identifier);
            } else {
                resolved.dependencies.insert(identifier);
            }
            resolved.imports.insert(literal, package);
        }

        // A package imported for values and for types is a runtime dependency.
        let runtime = resolved.dependencies.clone();
        resolved.dev_dependencies.retain(|d| !runtime.contains(d));

        Ok(resolved)
    }
}
