//! Error types for meridian-deployment.

use std::path::PathBuf;

use meridian_contracts::ModelError;

/// Result type alias using [`DeploymentError`].
pub type DeploymentResult<T> = Result<T, DeploymentError>;

/// Errors that can occur while ingesting process definitions.
#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    /// The caller presented no usable credential.
    #[error("no auth token provided")]
    Unauthorized,

    /// The request was malformed.
    #[error("invalid deployment request: {0}")]
    InvalidRequest(String),

    /// The definition file could not be read.
    #[error("failed to read process definition from {}", path.display())]
    Source {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Failure reported by the process model store.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl DeploymentError {
    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}
