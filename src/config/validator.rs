//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - A build config names at least one category root
//! - Names both included and excluded are logged (exclusion wins)
//! - Every project registry is understood by a provider
//! - A project maps at least one install path

use crate::config::schema::{BuildConfig, ProjectConfig};
use crate::error::{BlocksmithError, Result};
use crate::registry::ProviderRegistry;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a build configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_build_config(config: &BuildConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.dirs.is_empty() {
        errors.push(ValidationError::new(
            "missing-dirs",
            "'dirs' must list at least one category root".to_string(),
        ));
    }

    warn_overlap("block", &config.include_blocks, &config.exclude_blocks);
    warn_overlap(
        "category",
        &config.include_categories,
        &config.exclude_categories,
    );

    errors
}

fn warn_overlap(kind: &str, include: &[String], exclude: &[String]) {
    for name in include.iter().filter(|name| exclude.contains(name)) {
        tracing::warn!("{} '{}' is both included and excluded; it will be excluded", kind, name);
    }
}

/// Validate a project configuration and return all errors.
pub fn validate_project_config(
    config: &ProjectConfig,
    providers: &ProviderRegistry,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for registry in &config.registries {
        if providers.select(registry).is_none() {
            errors.push(ValidationError::new(
                "unknown-registry",
                format!("No provider understands registry '{}'", registry),
            ));
        }
    }

    if config.paths.is_empty() {
        errors.push(ValidationError::new(
            "missing-paths",
            "'paths' must map at least \"*\" to an install directory".to_string(),
        ));
    }

    errors
}

/// Validate a build config and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate_build(config: &BuildConfig) -> Result<()> {
    into_result(validate_build_config(config))
}

/// Validate a project config and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate_project(config: &ProjectConfig, providers: &ProviderRegistry) -> Result<()> {
    into_result(validate_project_config(config, providers))
}

fn into_result(errors: Vec<ValidationError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(BlocksmithError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
