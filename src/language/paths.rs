//! File-name and path helpers shared by the builder and the resolvers.

use std::path::{Component, Path, PathBuf};

/// Infixes marking a test file, placed before the language extension.
pub const TEST_MARKERS: &[&str] = &[".test.", "_test.", ".spec.", "_spec."];

/// Position of the test marker in `file_name`, if it is a test file.
fn test_marker(file_name: &str) -> Option<usize> {
    TEST_MARKERS.iter().find_map(|marker| {
        let idx = file_name.rfind(marker)?;
        let ext = &file_name[idx + marker.len()..];
        (!ext.is_empty() && !ext.contains('.')).then_some(idx)
    })
}

/// Is `file_name` a test file (`button.test.ts`, `button_spec.js`, ...)?
pub fn is_test_file(file_name: &str) -> bool {
    test_marker(file_name).is_some()
}

/// The name a test file is attached to: `button.test.ts` gives `button`.
pub fn test_file_base(file_name: &str) -> Option<&str> {
    test_marker(file_name).map(|idx| &file_name[..idx])
}

/// Block name of a file: its name without the final extension.
pub fn block_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// Returns `None` when `..` climbs above the start of a relative path.
pub fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}

/// The `category/name` specifier of `target` if it lies in a category root.
///
/// `target` and `search_directories` must be normalized and relative to the
/// same base.
pub fn local_specifier(target: &Path, search_directories: &[PathBuf]) -> Option<String> {
    search_directories.iter().find_map(|root| {
        let rel = target.strip_prefix(normalize(root)?).ok()?;
        let mut parts = rel.components();
        let category = parts.next()?.as_os_str().to_string_lossy().into_owned();
        let entry = parts.next()?.as_os_str().to_string_lossy().into_owned();
        Some(format!("{}/{}", category, block_name(&entry)))
    })
}
