//! Reading process definitions from disk.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{DeploymentError, DeploymentResult};

/// Reads process definition documents for the deployment service.
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    /// Read the file at `path` as UTF-8 text.
    async fn read(&self, path: &Path) -> io::Result<String>;
}

/// Definition source backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDefinitionSource;

#[async_trait]
impl DefinitionSource for FsDefinitionSource {
    async fn read(&self, path: &Path) -> io::Result<String> {
        debug!(path = %path.display(), "reading process definition");
        tokio::fs::read_to_string(path).await
    }
}

/// Pick the name to deploy a file's definitions under.
///
/// A supplied non-empty name wins unchanged. Otherwise the file name
/// with its final extension stripped is used, so `invoice.bpmn`
/// deploys as `invoice` and `archive.tar.gz` as `archive.tar`. File
/// names without an extension pass through unchanged.
pub fn derive_definition_name(path: &Path, explicit: Option<&str>) -> DeploymentResult<String> {
    if let Some(name) = explicit {
        if !name.is_empty() {
            return Ok(name.to_owned());
        }
    }

    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            DeploymentError::invalid_request(format!(
                "cannot derive a deployment name from {}",
                path.display()
            ))
        })
}
