//! Process definition ingestion service.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use meridian_contracts::{
    CallerContext, FileImportRequest, ImportRequest, ProcessModelId, ProcessModelStore,
};

use crate::authorize::ensure_authorized;
use crate::error::{DeploymentError, DeploymentResult};
use crate::source::{derive_definition_name, DefinitionSource, FsDefinitionSource};

/// Ingests process definitions into the engine.
///
/// The service owns no storage of its own. Persistence is delegated to
/// the injected [`ProcessModelStore`], and file contents come through
/// the [`DefinitionSource`] seam. Each call is a single fail-fast
/// pass: authorize, validate, resolve the source, delegate.
pub struct DeploymentService {
    models: Arc<dyn ProcessModelStore>,
    source: Arc<dyn DefinitionSource>,
}

impl DeploymentService {
    /// Create a service reading definition files from the local filesystem.
    pub fn new(models: Arc<dyn ProcessModelStore>) -> Self {
        Self::with_source(models, Arc::new(FsDefinitionSource))
    }

    /// Create a service with an explicit definition source.
    pub fn with_source(
        models: Arc<dyn ProcessModelStore>,
        source: Arc<dyn DefinitionSource>,
    ) -> Self {
        Self { models, source }
    }

    /// Deploy process definitions supplied as BPMN markup.
    ///
    /// The store's outcome is returned unchanged. With
    /// `overwrite_existing` set the operation is idempotent; without
    /// it, importing under an existing name fails in the store.
    pub async fn import_from_xml(
        &self,
        context: &dyn CallerContext,
        request: ImportRequest,
    ) -> DeploymentResult<()> {
        ensure_authorized(context)?;

        if request.xml.is_empty() {
            return Err(DeploymentError::invalid_request(
                "no process definition provided",
            ));
        }

        info!(
            name = ?request.name,
            overwrite = request.overwrite_existing,
            "importing process definitions"
        );

        let result = self
            .models
            .persist_definitions(
                context,
                request.name.as_deref(),
                &request.xml,
                request.overwrite_existing,
            )
            .await;

        match result {
            Ok(()) => {
                info!(name = ?request.name, "process definitions imported");
                Ok(())
            }
            Err(e) => {
                error!(name = ?request.name, error = %e, "import failed");
                Err(e.into())
            }
        }
    }

    /// Deploy process definitions read from a file on disk.
    ///
    /// Authorization runs before the path is touched, so callers
    /// without a credential learn nothing about the filesystem. The
    /// deployment name is the explicit one when given, the file name
    /// minus its final extension otherwise.
    pub async fn import_from_file(
        &self,
        context: &dyn CallerContext,
        request: FileImportRequest,
    ) -> DeploymentResult<()> {
        ensure_authorized(context)?;

        if request.file_path.as_os_str().is_empty() {
            return Err(DeploymentError::invalid_request("no file path provided"));
        }

        info!(
            path = %request.file_path.display(),
            "importing process definitions from file"
        );

        let xml = match self.source.read(&request.file_path).await {
            Ok(xml) => xml,
            Err(source) => {
                error!(
                    path = %request.file_path.display(),
                    error = %source,
                    "failed to read process definition"
                );
                return Err(DeploymentError::Source {
                    path: request.file_path.clone(),
                    source,
                });
            }
        };

        let name = derive_definition_name(&request.file_path, request.name.as_deref())
            .map_err(|e| {
                error!(path = %request.file_path.display(), error = %e, "import failed");
                e
            })?;
        debug!(name = %name, "derived deployment name");

        let import = ImportRequest {
            name: Some(name),
            xml,
            overwrite_existing: request.overwrite_existing,
        };

        self.import_from_xml(context, import).await
    }

    /// Remove a deployed process model.
    ///
    /// Deletion is delegated to the store and its outcome returned
    /// unchanged.
    pub async fn undeploy(
        &self,
        context: &dyn CallerContext,
        id: &ProcessModelId,
    ) -> DeploymentResult<()> {
        ensure_authorized(context)?;

        info!(model.id = %id, "undeploying process model");

        self.models.delete_process_model(context, id).await?;

        info!(model.id = %id, "process model undeployed");
        Ok(())
    }
}

impl fmt::Debug for DeploymentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use meridian_contracts::{Identity, ModelError};

    /// Store double recording every delegated call.
    #[derive(Debug, Default)]
    struct RecordingStore {
        persisted: Mutex<Vec<(Option<String>, String, bool)>>,
        deleted: Mutex<Vec<ProcessModelId>>,
        fail_with: Mutex<Option<ModelError>>,
    }

    impl RecordingStore {
        fn failing(error: ModelError) -> Self {
            Self {
                fail_with: Mutex::new(Some(error)),
                ..Self::default()
            }
        }

        fn persisted(&self) -> Vec<(Option<String>, String, bool)> {
            self.persisted.lock().unwrap().clone()
        }

        fn deleted(&self) -> Vec<ProcessModelId> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProcessModelStore for RecordingStore {
        async fn persist_definitions(
            &self,
            _context: &dyn CallerContext,
            name: Option<&str>,
            xml: &str,
            overwrite_existing: bool,
        ) -> Result<(), ModelError> {
            if let Some(err) = self.fail_with.lock().unwrap().take() {
                return Err(err);
            }
            self.persisted.lock().unwrap().push((
                name.map(ToOwned::to_owned),
                xml.to_owned(),
                overwrite_existing,
            ));
            Ok(())
        }

        async fn delete_process_model(
            &self,
            _context: &dyn CallerContext,
            id: &ProcessModelId,
        ) -> Result<(), ModelError> {
            if let Some(err) = self.fail_with.lock().unwrap().take() {
                return Err(err);
            }
            self.deleted.lock().unwrap().push(id.clone());
            Ok(())
        }
    }

    /// Source double serving fixed contents and recording reads.
    #[derive(Debug, Default)]
    struct StubSource {
        contents: Option<String>,
        reads: Mutex<Vec<PathBuf>>,
    }

    impl StubSource {
        fn serving(contents: impl Into<String>) -> Self {
            Self {
                contents: Some(contents.into()),
                reads: Mutex::new(Vec::new()),
            }
        }

        fn reads(&self) -> Vec<PathBuf> {
            self.reads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DefinitionSource for StubSource {
        async fn read(&self, path: &Path) -> io::Result<String> {
            self.reads.lock().unwrap().push(path.to_path_buf());
            self.contents
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    fn caller() -> Identity {
        Identity::new("session-token")
    }

    fn service_with(
        store: &Arc<RecordingStore>,
        source: &Arc<StubSource>,
    ) -> DeploymentService {
        DeploymentService::with_source(
            Arc::clone(store) as Arc<dyn ProcessModelStore>,
            Arc::clone(source) as Arc<dyn DefinitionSource>,
        )
    }

    #[tokio::test]
    async fn unauthorized_import_never_reaches_the_store() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::serving("<definitions/>"));
        let service = service_with(&store, &source);

        let err = service
            .import_from_xml(&Identity::anonymous(), ImportRequest::new("<definitions/>"))
            .await
            .unwrap_err();

        assert!(matches!(err, DeploymentError::Unauthorized));
        assert!(store.persisted().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_file_import_never_touches_the_source() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::serving("<definitions/>"));
        let service = service_with(&store, &source);

        let err = service
            .import_from_file(
                &Identity::new(""),
                FileImportRequest::new("/models/invoice.bpmn"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DeploymentError::Unauthorized));
        assert!(source.reads().is_empty());
        assert!(store.persisted().is_empty());
    }

    #[tokio::test]
    async fn empty_markup_is_rejected() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());
        let service = service_with(&store, &source);

        let err = service
            .import_from_xml(&caller(), ImportRequest::new(""))
            .await
            .unwrap_err();

        assert!(matches!(err, DeploymentError::InvalidRequest(_)));
        assert!(store.persisted().is_empty());
    }

    #[tokio::test]
    async fn empty_file_path_is_rejected_without_a_read() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::serving("<definitions/>"));
        let service = service_with(&store, &source);

        let err = service
            .import_from_file(&caller(), FileImportRequest::new(""))
            .await
            .unwrap_err();

        assert!(matches!(err, DeploymentError::InvalidRequest(_)));
        assert!(source.reads().is_empty());
        assert!(store.persisted().is_empty());
    }

    #[tokio::test]
    async fn import_delegates_the_request_fields() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());
        let service = service_with(&store, &source);

        let request = ImportRequest::new("<definitions/>")
            .with_name("invoice")
            .with_overwrite(false);
        service.import_from_xml(&caller(), request).await.unwrap();

        let persisted = store.persisted();
        assert_eq!(persisted.len(), 1);
        assert_eq!(
            persisted[0],
            (Some("invoice".to_owned()), "<definitions/>".to_owned(), false)
        );
    }

    #[tokio::test]
    async fn file_import_reads_derives_and_delegates() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::serving("<definitions id=\"invoice\"/>"));
        let service = service_with(&store, &source);

        service
            .import_from_file(&caller(), FileImportRequest::new("/models/invoice.bpmn"))
            .await
            .unwrap();

        assert_eq!(source.reads(), vec![PathBuf::from("/models/invoice.bpmn")]);

        let persisted = store.persisted();
        assert_eq!(persisted.len(), 1);
        assert_eq!(
            persisted[0],
            (
                Some("invoice".to_owned()),
                "<definitions id=\"invoice\"/>".to_owned(),
                true
            )
        );
    }

    #[tokio::test]
    async fn explicit_name_wins_over_the_file_name() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::serving("<definitions/>"));
        let service = service_with(&store, &source);

        let request = FileImportRequest::new("/models/invoice.bpmn").with_name("orders");
        service.import_from_file(&caller(), request).await.unwrap();

        let persisted = store.persisted();
        assert_eq!(persisted[0].0.as_deref(), Some("orders"));
    }

    #[tokio::test]
    async fn underivable_path_is_rejected_before_delegation() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::serving("<definitions/>"));
        let service = service_with(&store, &source);

        let err = service
            .import_from_file(&caller(), FileImportRequest::new("/"))
            .await
            .unwrap_err();

        assert!(matches!(err, DeploymentError::InvalidRequest(_)));
        assert!(store.persisted().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_reported_with_the_path() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());
        let service = service_with(&store, &source);

        let err = service
            .import_from_file(&caller(), FileImportRequest::new("/models/missing.bpmn"))
            .await
            .unwrap_err();

        match err {
            DeploymentError::Source { path, source } => {
                assert_eq!(path, PathBuf::from("/models/missing.bpmn"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.persisted().is_empty());
    }

    #[tokio::test]
    async fn store_failures_pass_through_unchanged() {
        let store = Arc::new(RecordingStore::failing(ModelError::storage("disk full")));
        let source = Arc::new(StubSource::default());
        let service = service_with(&store, &source);

        let err = service
            .import_from_xml(
                &caller(),
                ImportRequest::new("<definitions/>").with_name("invoice"),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeploymentError::Model(ModelError::Storage(msg)) if msg == "disk full"
        ));
    }

    #[tokio::test]
    async fn undeploy_delegates_exactly_one_deletion() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());
        let service = service_with(&store, &source);

        let id = ProcessModelId::new("invoice");
        service.undeploy(&caller(), &id).await.unwrap();

        assert_eq!(store.deleted(), vec![id]);
    }

    #[tokio::test]
    async fn undeploy_propagates_not_found() {
        let id = ProcessModelId::new("missing");
        let store = Arc::new(RecordingStore::failing(ModelError::NotFound(id.clone())));
        let source = Arc::new(StubSource::default());
        let service = service_with(&store, &source);

        let err = service.undeploy(&caller(), &id).await.unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::Model(ModelError::NotFound(missing)) if missing == id
        ));
        assert!(store.deleted().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_undeploy_never_reaches_the_store() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());
        let service = service_with(&store, &source);

        let err = service
            .undeploy(&Identity::anonymous(), &ProcessModelId::new("invoice"))
            .await
            .unwrap_err();

        assert!(matches!(err, DeploymentError::Unauthorized));
        assert!(store.deleted().is_empty());
    }
}
