// ── SftpUploader – settings-driven upload service ───────────────────────────

use crate::sftp::client::{SessionGuard, TransferClient};
use crate::sftp::paths::{base_name, public_url, remote_destination};
use crate::sftp::ssh::Ssh2Client;
use crate::sftp::types::*;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use shotlink_core::{
    setting_value, ConfigSchema, ServiceSettings, SettingsStore, UploadError, UploadOutcome,
    UploadResult, UploadService, ValidationReport,
};
use std::path::Path;
use std::sync::Arc;

pub struct SftpUploader {
    settings: ServiceSettings,
    client: Arc<dyn TransferClient>,
}

impl SftpUploader {
    /// Uploader backed by libssh2.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_client(store, Arc::new(Ssh2Client))
    }

    pub fn with_client(store: Arc<dyn SettingsStore>, client: Arc<dyn TransferClient>) -> Self {
        Self {
            settings: ServiceSettings::new(SERVICE_ID, store),
            client,
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub fn load_settings(&self) -> UploadOutcome<SftpSettings> {
        SftpSettings::load(&self.settings)
    }
}

#[async_trait]
impl UploadService for SftpUploader {
    fn id(&self) -> &'static str {
        SERVICE_ID
    }

    fn name(&self) -> &'static str {
        SERVICE_NAME
    }

    fn description(&self) -> &'static str {
        SERVICE_DESCRIPTION
    }

    fn describe_config(&self) -> ConfigSchema {
        config_schema()
    }

    fn validate(&self) -> UploadOutcome<ValidationReport> {
        Ok(ValidationReport {
            missing: self.load_settings()?.missing(),
        })
    }

    async fn upload(&self, file: &Path) -> UploadOutcome<UploadResult> {
        let target = self.load_settings().and_then(|s| s.resolve()).map_err(|e| {
            warn!("SFTP upload rejected: {}", e);
            e
        })?;

        let client = Arc::clone(&self.client);
        let file = file.to_path_buf();
        tokio::task::spawn_blocking(move || transfer(client.as_ref(), &target, &file))
            .await
            .map_err(|e| UploadError::Transfer(format!("upload task failed: {}", e)))?
    }

    fn save(&self, config: &Map<String, Value>) -> UploadOutcome<()> {
        let saved = self.store_config(config)?;
        info!("Saved {} SFTP settings", saved);
        Ok(())
    }
}

impl SftpUploader {
    /// Write each scalar entry to the plain or secret store, returning how
    /// many were written.
    fn store_config(&self, config: &Map<String, Value>) -> UploadOutcome<usize> {
        let schema = config_schema();
        let mut saved = 0;
        for (key, value) in config {
            let Some(value) = setting_value(value) else {
                debug!("Skipping SFTP setting '{}' with no scalar value", key);
                continue;
            };
            if schema.is_secret(key) {
                self.settings.set_secret(key, &value)?;
            } else {
                self.settings.set_setting(key, &value)?;
            }
            saved += 1;
        }
        Ok(saved)
    }
}

/// connect → open channel → put. The session is closed on every exit path.
fn transfer(
    client: &dyn TransferClient,
    target: &SftpTarget,
    file: &Path,
) -> UploadOutcome<UploadResult> {
    let file_name = base_name(file).ok_or_else(|| {
        UploadError::Transfer(format!(
            "'{}' does not name a UTF-8 file",
            file.display()
        ))
    })?;
    let remote_path = remote_destination(&target.remote_dir, &file_name);

    let session = client.connect(&target.request).map_err(|e| {
        warn!("SFTP connection to {} failed: {}", target.request.host, e);
        UploadError::Connection(e)
    })?;
    let mut session = SessionGuard::new(session);

    let mut channel = session.open_channel().map_err(|e| {
        warn!("SFTP channel to {} failed: {}", target.request.host, e);
        UploadError::Channel(e)
    })?;

    let bytes_transferred = channel.put(file, &remote_path).map_err(|e| {
        warn!("SFTP upload of {} failed: {}", file.display(), e);
        UploadError::Transfer(e)
    })?;

    info!(
        "Uploaded {} ({} bytes) to {}:{}",
        file_name, bytes_transferred, target.request.host, remote_path
    );

    Ok(UploadResult {
        url: public_url(&target.url_prefix, &file_name),
        remote_path,
        bytes_transferred,
    })
}
