//! Configuration file discovery and loading.
//!
//! Both config files live in a `.blocksmith` directory at the root of the
//! repository they describe.

use crate::config::schema::{BuildConfig, ProjectConfig};
use crate::error::{BlocksmithError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the directory holding blocksmith configuration.
pub const CONFIG_DIR: &str = ".blocksmith";

/// File name of the registry build configuration.
pub const BUILD_CONFIG_FILE: &str = "build.yml";

/// File name of the consumer project configuration.
pub const PROJECT_CONFIG_FILE: &str = "config.yml";

/// Path of the build config for a registry root.
pub fn build_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(BUILD_CONFIG_FILE)
}

/// Path of the project config for a project root.
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(PROJECT_CONFIG_FILE)
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `.blocksmith` directory (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load the registry build configuration under `root`.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `.blocksmith/build.yml` doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_build_config(root: &Path) -> Result<BuildConfig> {
    load_yaml(&build_config_path(root))
}

/// Load the consumer project configuration under `root`.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `.blocksmith/config.yml` doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_project_config(root: &Path) -> Result<ProjectConfig> {
    load_yaml(&project_config_path(root))
}

/// Parse YAML content into a [`BuildConfig`].
pub fn parse_build_config(content: &str, source_path: &Path) -> Result<BuildConfig> {
    parse_yaml(content, source_path)
}

/// Parse YAML content into a [`ProjectConfig`].
pub fn parse_project_config(content: &str, source_path: &Path) -> Result<ProjectConfig> {
    parse_yaml(content, source_path)
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BlocksmithError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BlocksmithError::Io(e)
        }
    })?;

    tracing::debug!("Loaded config from {}", path.display());
    parse_yaml(&content, path)
}

fn parse_yaml<T: DeserializeOwned>(content: &str, source_path: &Path) -> Result<T> {
    serde_yaml::from_str(content).map_err(|e| BlocksmithError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, file: &str, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn loads_build_config() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), BUILD_CONFIG_FILE, "dirs: [src/blocks]\n");

        let config = load_build_config(temp.path()).unwrap();
        assert_eq!(config.dirs, vec![PathBuf::from("src/blocks")]);
    }

    #[test]
    fn missing_project_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_project_config(temp.path());
        assert!(matches!(result, Err(BlocksmithError::ConfigNotFound { .. })));
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), PROJECT_CONFIG_FILE, "registries: [unclosed\n");

        match load_project_config(temp.path()) {
            Err(BlocksmithError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("config.yml"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn finds_root_from_nested_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();
        let nested = temp.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }
}
