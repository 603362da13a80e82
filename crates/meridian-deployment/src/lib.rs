//! Meridian Deployment Service
//!
//! This crate ingests BPMN process definitions into the Meridian
//! engine. It accepts definitions as raw markup or as a path to a file
//! on disk, gates every operation on the caller's credential, and
//! delegates persistence to the process model store supplied by the
//! embedding platform.
//!
//! # Ingestion flow
//!
//! Every entry point follows the same fail-fast shape:
//!
//! 1. Authorize the caller, before any filesystem access
//! 2. Validate the request
//! 3. Resolve the definition source (file imports only)
//! 4. Delegate persistence to the process model store
//!
//! The service holds no state of its own, so a failed step leaves
//! nothing to roll back.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use meridian_contracts::{FileImportRequest, Identity, MemoryModelStore};
//! use meridian_deployment::DeploymentService;
//!
//! let service = DeploymentService::new(Arc::new(MemoryModelStore::new()));
//! let caller = Identity::new("session-token");
//!
//! service
//!     .import_from_file(&caller, FileImportRequest::new("models/invoice.bpmn"))
//!     .await?;
//! ```

#![forbid(unsafe_code)]

pub mod authorize;
pub mod error;
pub mod service;
pub mod source;

// Re-export commonly used types at the crate root
pub use authorize::ensure_authorized;
pub use error::{DeploymentError, DeploymentResult};
pub use service::DeploymentService;
pub use source::{derive_definition_name, DefinitionSource, FsDefinitionSource};
