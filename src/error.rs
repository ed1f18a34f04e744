//! Error types for Shipgate operations.
//!
//! This module defines [`ShipgateError`], the error type used by config
//! loading, the storage event handler, and the CLI, plus
//! [`ContextReadError`], the single error kind the resolvers distinguish.
//!
//! # Error Handling Strategy
//!
//! - Resolvers never return errors. A [`ContextReadError`] is caught at the
//!   resolver boundary and kept as the reason for the fallback outcome.
//! - Use `ShipgateError` for everything outside the resolvers
//! - Use `anyhow::Error` (via `ShipgateError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading the CI execution context.
///
/// Covers the event payload, the process environment, and the `git`
/// fallback used to read the latest commit subject.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContextReadError {
    /// The event payload file exists but could not be read.
    #[error("Failed to read event payload at {path}: {message}")]
    EventPayload { path: PathBuf, message: String },

    /// The event payload is not valid JSON.
    #[error("Invalid event payload at {path}: {message}")]
    InvalidPayload { path: PathBuf, message: String },

    /// A consulted environment variable holds non-UTF-8 data.
    #[error("Environment variable {var} is not valid unicode")]
    NotUnicode { var: String },

    /// The `git` executable could not be started.
    #[error("Failed to run git: {message}")]
    GitSpawn { message: String },

    /// `git` ran but exited unsuccessfully.
    #[error("git exited with code {code:?}: {stderr}")]
    GitFailed { code: Option<i32>, stderr: String },

    /// `git` printed something that is not UTF-8.
    #[error("git output is not valid UTF-8")]
    GitOutput,
}

/// Core error type for Shipgate operations.
#[derive(Debug, Error)]
pub enum ShipgateError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Storage notification event could not be understood.
    #[error("Invalid storage event: {message}")]
    InvalidStorageEvent { message: String },

    /// Execution context could not be read.
    #[error(transparent)]
    Context(#[from] ContextReadError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Shipgate operations.
pub type Result<T> = std::result::Result<T, ShipgateError>;
