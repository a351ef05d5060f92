//! Unified error types for the dockrun workspace.
//!
//! Workflow short-circuits (nothing eligible, empty selection) are not
//! errors; they are reported as skipped outcomes by `dockrun-core`. Only
//! genuine failures live here.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DockrunError {
    /// The container runtime cannot be reached.
    #[error("container runtime unavailable: {message}")]
    RuntimeUnavailable {
        /// Description of the connectivity failure.
        message: String,
    },

    /// A single runtime call failed while the runtime itself was reachable.
    #[error("runtime {action} failed for {id}: {message}")]
    Runtime {
        /// Lifecycle action that failed (`stop`, `start`, ...).
        action: &'static str,
        /// Container the action targeted.
        id: String,
        /// Runtime-provided failure description.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl DockrunError {
    /// Returns whether this error means the runtime could not be reached.
    #[must_use]
    pub const fn is_runtime_unavailable(&self) -> bool {
        matches!(self, Self::RuntimeUnavailable { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DockrunError>;
