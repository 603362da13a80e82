//! In-memory process model store for testing and development.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::ModelError;
use crate::identity::CallerContext;
use crate::model::ProcessModelStore;
use crate::types::ProcessModelId;

/// A deployed definition held in memory.
#[derive(Debug, Clone)]
pub struct StoredDefinition {
    /// The BPMN XML document as persisted.
    pub xml: String,
    /// When the definition was first deployed.
    pub deployed_at: SystemTime,
    /// When the definition was last overwritten.
    pub updated_at: SystemTime,
}

/// In-memory process model store.
///
/// Deployments are keyed by name, and the model identifier of a
/// deployment is its name. Overwriting replaces the stored document in
/// place. Intended for testing and local development; nothing is
/// persisted across restarts.
#[derive(Debug, Clone, Default)]
pub struct MemoryModelStore {
    models: Arc<RwLock<HashMap<ProcessModelId, StoredDefinition>>>,
}

impl MemoryModelStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers of all deployed process models, sorted.
    pub async fn deployed_ids(&self) -> Vec<ProcessModelId> {
        let models = self.models.read().await;
        let mut ids: Vec<_> = models.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }

    /// Look up a deployed definition by identifier.
    pub async fn definition(&self, id: &ProcessModelId) -> Option<StoredDefinition> {
        let models = self.models.read().await;
        models.get(id).cloned()
    }
}

#[async_trait]
impl ProcessModelStore for MemoryModelStore {
    async fn persist_definitions(
        &self,
        _context: &dyn CallerContext,
        name: Option<&str>,
        xml: &str,
        overwrite_existing: bool,
    ) -> Result<(), ModelError> {
        // This store has no document parser to derive a name from.
        let Some(name) = name else {
            return Err(ModelError::invalid_definition(
                "a deployment name is required",
            ));
        };

        let id = ProcessModelId::new(name);
        let mut models = self.models.write().await;
        let now = SystemTime::now();

        if let Some(existing) = models.get_mut(&id) {
            if !overwrite_existing {
                return Err(ModelError::AlreadyDeployed {
                    name: name.to_owned(),
                });
            }
            existing.xml = xml.to_owned();
            existing.updated_at = now;
        } else {
            models.insert(
                id,
                StoredDefinition {
                    xml: xml.to_owned(),
                    deployed_at: now,
                    updated_at: now,
                },
            );
        }

        tracing::info!(
            model.name = name,
            model.operation = "persist",
            "process definitions stored"
        );

        Ok(())
    }

    async fn delete_process_model(
        &self,
        _context: &dyn CallerContext,
        id: &ProcessModelId,
    ) -> Result<(), ModelError> {
        let mut models = self.models.write().await;

        if models.remove(id).is_none() {
            return Err(ModelError::NotFound(id.clone()));
        }

        tracing::info!(
            model.id = %id,
            model.operation = "delete",
            "process model deleted"
        );

        Ok(())
    }
}
