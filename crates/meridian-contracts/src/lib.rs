//! Shared contracts for the Meridian process engine.
//!
//! This crate defines the types that cross service boundaries: the
//! caller identity capability, deployment request payloads, and the
//! storage contract for process models. Service crates depend on these
//! contracts rather than on each other.
//!
//! # Stores
//!
//! - **Memory** (`memory` feature): in-memory storage for testing and
//!   local development
//!
//! Production storage lives with the embedding platform; anything
//! implementing [`ProcessModelStore`] can be wired into the deployment
//! service.
//!
//! # Example
//!
//! ```rust,ignore
//! use meridian_contracts::{Identity, ImportRequest, MemoryModelStore, ProcessModelStore};
//!
//! let store = MemoryModelStore::new();
//! let caller = Identity::new("session-token");
//!
//! let request = ImportRequest::new("<definitions/>").with_name("invoice-approval");
//! store
//!     .persist_definitions(&caller, request.name.as_deref(), &request.xml, true)
//!     .await?;
//! ```

#![forbid(unsafe_code)]

mod error;
mod identity;
mod model;
mod types;

#[cfg(feature = "memory")]
mod memory;

pub use error::ModelError;
pub use identity::{CallerContext, Identity};
pub use model::ProcessModelStore;
pub use types::{FileImportRequest, ImportRequest, ProcessModelId};

#[cfg(feature = "memory")]
pub use memory::{MemoryModelStore, StoredDefinition};
