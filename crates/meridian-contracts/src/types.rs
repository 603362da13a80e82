//! Core types shared across the Meridian engine.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Unique identifier for a deployed process model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessModelId(String);

impl ProcessModelId {
    /// Create a new process model ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProcessModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Request to deploy process definitions supplied as BPMN markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Name to deploy under. When absent, the store derives one from
    /// the definitions themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The BPMN XML document.
    pub xml: String,
    /// Replace an existing deployment under the same name.
    #[serde(default = "default_overwrite")]
    pub overwrite_existing: bool,
}

const fn default_overwrite() -> bool {
    true
}

impl ImportRequest {
    /// Create a request carrying the given markup.
    #[must_use]
    pub fn new(xml: impl Into<String>) -> Self {
        Self {
            name: None,
            xml: xml.into(),
            overwrite_existing: true,
        }
    }

    /// Set the name to deploy under.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set whether an existing deployment under the same name is replaced.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite_existing: bool) -> Self {
        self.overwrite_existing = overwrite_existing;
        self
    }
}

/// Request to deploy process definitions read from a file on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileImportRequest {
    /// Path to the definition file.
    pub file_path: PathBuf,
    /// Name to deploy under. When absent, derived from the file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replace an existing deployment under the same name.
    #[serde(default = "default_overwrite")]
    pub overwrite_existing: bool,
}

impl FileImportRequest {
    /// Create a request for the given path.
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            name: None,
            overwrite_existing: true,
        }
    }

    /// Set the name to deploy under instead of deriving it from the file name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set whether an existing deployment under the same name is replaced.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite_existing: bool) -> Self {
        self.overwrite_existing = overwrite_existing;
        self
    }
}
