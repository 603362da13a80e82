//! Error types for process model storage.

use thiserror::Error;

use crate::types::ProcessModelId;

/// Errors reported by process model storage implementations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No process model exists under the given identifier.
    #[error("process model not found: {0}")]
    NotFound(ProcessModelId),

    /// A model with this name is already deployed and overwriting was declined.
    #[error("process model already deployed: {name}")]
    AlreadyDeployed {
        /// Name under which the model is deployed.
        name: String,
    },

    /// The submitted definition could not be accepted.
    #[error("invalid process definition: {0}")]
    InvalidDefinition(String),

    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ModelError {
    /// Create an invalid definition error.
    #[must_use]
    pub fn invalid_definition(msg: impl Into<String>) -> Self {
        Self::InvalidDefinition(msg.into())
    }

    /// Create a storage error.
    #[must_use]
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
