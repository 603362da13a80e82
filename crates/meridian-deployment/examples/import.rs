//! Deploys process definitions into an in-memory engine.
//!
//! Imports one definition from a file on disk and one from inline
//! markup, lists what landed in the store, then removes a model again.
//!
//! ```sh
//! cargo run --example import
//! ```

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use meridian_contracts::{
    FileImportRequest, Identity, ImportRequest, MemoryModelStore, ProcessModelId,
};
use meridian_deployment::DeploymentService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("meridian_deployment=info".parse()?)
                .add_directive("meridian_contracts=info".parse()?),
        )
        .init();

    let store = Arc::new(MemoryModelStore::new());
    let service = DeploymentService::new(store.clone());
    let caller = Identity::new("local-dev-session");

    // A definition file on disk, named after its file name
    let dir = tempfile::tempdir()?;
    let model_path = dir.path().join("invoice-approval.bpmn");
    tokio::fs::write(
        &model_path,
        "<definitions id=\"invoice-approval\"><process id=\"approve\"/></definitions>",
    )
    .await?;

    service
        .import_from_file(&caller, FileImportRequest::new(&model_path))
        .await?;

    // Inline markup with an explicit deployment name
    let request = ImportRequest::new(
        "<definitions id=\"order-fulfillment\"><process id=\"fulfill\"/></definitions>",
    )
    .with_name("order-fulfillment");
    service.import_from_xml(&caller, request).await?;

    for id in store.deployed_ids().await {
        info!(model.id = %id, "deployed");
    }

    service
        .undeploy(&caller, &ProcessModelId::new("order-fulfillment"))
        .await?;

    info!(remaining = store.deployed_ids().await.len(), "done");

    Ok(())
}
