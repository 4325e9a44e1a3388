//! Error types for race configuration and session plumbing.
//!
//! Per-frame operations (`tick`, checkpoint crossings) never fail: misplays and
//! bad trigger IDs are logged and ignored. Errors only surface from the places
//! where something can be done about them: loading a track, validating the
//! checkpoint order, parsing an input script, or shutting down a driver task.
//!
//! ## Error Categories
//!
//! - **Track Errors**: checkpoint registries that cannot describe a valid lap
//! - **Config Errors**: out-of-range settings
//! - **File/Parse Errors**: reading or decoding YAML configuration and scripts
//! - **Provider Errors**: input sources that failed or went away
//!
//! ```rust
//! use checkered::RaceError;
//!
//! let error = RaceError::missing_start_finish(3);
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::CheckpointId;

/// Result type alias for race operations.
pub type Result<T, E = RaceError> = std::result::Result<T, E>;

/// Main error type for race operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RaceError {
    #[error("Checkpoint registry is empty")]
    EmptyRegistry,

    #[error("First checkpoint must be the start/finish line (id 0), found id {found}")]
    MissingStartFinish { found: CheckpointId },

    #[error("Checkpoint id {id} appears more than once in the registry")]
    DuplicateCheckpoint { id: CheckpointId },

    #[error("Track has {count} checkpoints but lap records only hold {max} split slots")]
    TooManyCheckpoints { count: usize, max: usize },

    #[error("Invalid configuration for '{field}': {details}")]
    InvalidConfig { field: String, details: String },

    #[error("Config file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Input provider failed: {reason}")]
    Provider {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Race driver task failed: {reason}")]
    Driver { reason: String },
}

impl RaceError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            RaceError::Provider { .. } => true,
            RaceError::File { .. } => true,
            RaceError::EmptyRegistry => false,
            RaceError::MissingStartFinish { .. } => false,
            RaceError::DuplicateCheckpoint { .. } => false,
            RaceError::TooManyCheckpoints { .. } => false,
            RaceError::InvalidConfig { .. } => false,
            RaceError::Parse { .. } => false,
            RaceError::Driver { .. } => false,
        }
    }

    /// Returns whether this error stems from track or session configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RaceError::EmptyRegistry
                | RaceError::MissingStartFinish { .. }
                | RaceError::DuplicateCheckpoint { .. }
                | RaceError::TooManyCheckpoints { .. }
                | RaceError::InvalidConfig { .. }
        )
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            RaceError::EmptyRegistry => vec![
                "Add the start/finish checkpoint (id 0) to the track",
                "Check that the track config lists its checkpoints",
            ],
            RaceError::MissingStartFinish { .. } => vec![
                "Place checkpoint id 0 first in the traversal order",
                "Reserve id 0 for the start/finish line",
            ],
            RaceError::DuplicateCheckpoint { .. } => vec![
                "Give every checkpoint trigger a unique id",
                "Check for copy-pasted trigger volumes in the track",
            ],
            RaceError::TooManyCheckpoints { .. } => vec![
                "Reduce the track to at most five checkpoints",
                "Merge intermediate checkpoints into fewer sectors",
            ],
            RaceError::InvalidConfig { .. } => vec![
                "Check the named setting against its documented range",
                "Remove the setting to fall back to its default",
            ],
            RaceError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
            RaceError::Parse { .. } => vec![
                "Check the YAML syntax of the file",
                "Verify field names match the documented schema",
            ],
            RaceError::Provider { .. } => vec![
                "Check that the input source is still running",
                "Reconnect the host loop to the session",
            ],
            RaceError::Driver { .. } => vec![
                "Check logs for a panic inside the race task",
                "Restart the race session",
            ],
        }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        RaceError::File { path, source }
    }

    /// Helper constructor for a registry that does not start at the finish line.
    pub fn missing_start_finish(found: CheckpointId) -> Self {
        RaceError::MissingStartFinish { found }
    }

    /// Helper constructor for invalid settings.
    pub fn invalid_config(field: impl Into<String>, details: impl Into<String>) -> Self {
        RaceError::InvalidConfig { field: field.into(), details: details.into() }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        RaceError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for provider failures.
    pub fn provider_failed(reason: impl Into<String>) -> Self {
        RaceError::Provider { reason: reason.into(), source: None }
    }

    /// Helper constructor for provider failures with source.
    pub fn provider_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        RaceError::Provider { reason: reason.into(), source: Some(source) }
    }
}

impl From<serde_yaml_ng::Error> for RaceError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        RaceError::Parse { context: "yaml".to_string(), details: err.to_string() }
    }
}
