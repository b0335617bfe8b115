//! Error types for blocksmith operations.
//!
//! This module defines [`BlocksmithError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Anything that would leave the block graph or an install plan silently
//!   incomplete is a `BlocksmithError` and aborts the operation.
//! - File-level soft issues (unsupported extensions, disallowed
//!   subdirectories) are not errors; they are reported through
//!   [`crate::build::Diagnostics`].
//! - Use `anyhow::Error` (via `BlocksmithError::Other`) for unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for blocksmith operations.
#[derive(Debug, Error)]
pub enum BlocksmithError {
    /// A directory that must be enumerated could not be read.
    #[error("Unable to read {path}: {source}")]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A language resolver failed to extract dependencies from a file.
    #[error("Failed to resolve dependencies of {file}: {message}")]
    DependencyResolutionFailed { file: PathBuf, message: String },

    /// A bare specifier was used without any registry configured.
    #[error("No registries configured to resolve '{specifier}'. Add one to `registries` in .blocksmith/config.yml")]
    NoRepositoryConfigured { specifier: String },

    /// No configured registry contains the block.
    #[error("Block not found: {specifier}")]
    BlockNotFound { specifier: String },

    /// A specifier could not be parsed.
    #[error("Invalid specifier '{specifier}': {message}")]
    InvalidSpecifier { specifier: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A manifest failed schema or semantic validation.
    #[error("Invalid manifest from {source_name}: {message}")]
    ManifestInvalid {
        source_name: String,
        message: String,
    },

    /// Fetching a file from a registry failed.
    #[error("Failed to fetch {url}: {message}")]
    FetchFailed { url: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for blocksmith operations.
pub type Result<T> = std::result::Result<T, BlocksmithError>;
