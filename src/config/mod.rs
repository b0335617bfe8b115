//! Configuration loading, parsing, and validation for blocksmith.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use blocksmith::config::{load_build_config, validate_build};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let config_dir = temp.path().join(".blocksmith");
//! fs::create_dir_all(&config_dir).unwrap();
//! fs::write(config_dir.join("build.yml"), "dirs: [src/blocks]").unwrap();
//!
//! let config = load_build_config(temp.path()).unwrap();
//! validate_build(&config).unwrap();
//! assert!(!config.allow_subdirectories);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use schema::{BuildConfig, ProjectConfig, FALLBACK_PATH_KEY};

pub use loader::{
    build_config_path, find_project_root, load_build_config, load_project_config,
    parse_build_config, parse_project_config, project_config_path, CONFIG_DIR,
};

pub use validator::{
    validate_build, validate_build_config, validate_project, validate_project_config,
    ValidationError,
};
