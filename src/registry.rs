// ── ServiceRegistry – every upload backend behind one interface ─────────────

use crate::error::AppError;
use serde_json::{Map, Value};
use shotlink_core::{
    ServiceDescriptor, SettingsStore, UploadResult, UploadService, ValidationReport,
};
use shotlink_sftp::SftpUploader;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Default)]
pub struct ServiceRegistry {
    services: BTreeMap<&'static str, Arc<dyn UploadService>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in service, all sharing `store`.
    pub fn with_default_services(store: Arc<dyn SettingsStore>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SftpUploader::new(store)));
        registry
    }

    /// Add a service, replacing (and returning) any previous one with the same id.
    pub fn register(&mut self, service: Arc<dyn UploadService>) -> Option<Arc<dyn UploadService>> {
        self.services.insert(service.id(), service)
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn UploadService>, AppError> {
        self.services
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::UnknownService(id.to_string()))
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.services.keys().copied().collect()
    }

    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        self.services.values().map(|s| s.descriptor()).collect()
    }

    pub fn validate(&self, id: &str) -> Result<ValidationReport, AppError> {
        Ok(self.get(id)?.validate()?)
    }

    pub async fn upload(&self, id: &str, file: &Path) -> Result<UploadResult, AppError> {
        let service = self.get(id)?;
        info!(service = id, file = %file.display(), "upload requested");
        match service.upload(file).await {
            Ok(result) => {
                info!(service = id, url = %result.url, "upload finished");
                Ok(result)
            }
            Err(e) => {
                warn!(service = id, kind = ?e.kind(), error = %e, "upload failed");
                Err(e.into())
            }
        }
    }

    pub fn save(&self, id: &str, config: &Map<String, Value>) -> Result<(), AppError> {
        self.get(id)?.save(config)?;
        Ok(())
    }
}
