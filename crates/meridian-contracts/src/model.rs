//! Storage contract for deployed process models.

use async_trait::async_trait;

use crate::error::ModelError;
use crate::identity::CallerContext;
use crate::types::ProcessModelId;

/// Persistence collaborator for process definitions.
///
/// One BPMN document may define several processes; implementations
/// persist all of them under a single deployment name.
#[async_trait]
pub trait ProcessModelStore: Send + Sync {
    /// Persist the definitions contained in `xml`.
    ///
    /// When `name` is absent the store chooses one from the definitions
    /// themselves. With `overwrite_existing` unset, persisting under a
    /// name that is already deployed fails with
    /// [`ModelError::AlreadyDeployed`].
    async fn persist_definitions(
        &self,
        context: &dyn CallerContext,
        name: Option<&str>,
        xml: &str,
        overwrite_existing: bool,
    ) -> Result<(), ModelError>;

    /// Delete the process model with the given identifier.
    async fn delete_process_model(
        &self,
        context: &dyn CallerContext,
        id: &ProcessModelId,
    ) -> Result<(), ModelError>;
}
