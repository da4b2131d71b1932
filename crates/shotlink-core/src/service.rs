// ── UploadService – the contract every upload backend implements ────────────

use crate::error::UploadOutcome;
use crate::schema::ConfigSchema;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Successful upload of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    /// Public URL of the uploaded artifact.
    pub url: String,
    /// Where the file landed on the remote side.
    pub remote_path: String,
    pub bytes_transferred: u64,
}

/// Outcome of a pre-flight configuration check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub missing: Vec<&'static str>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Identity and configuration contract of a service, for listing in a UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub schema: ConfigSchema,
}

#[async_trait]
pub trait UploadService: Send + Sync {
    /// Namespace used for every setting key, e.g. `"sftp"`.
    fn id(&self) -> &'static str;

    /// Human readable name, e.g. `"SFTP"`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn describe_config(&self) -> ConfigSchema;

    /// Check the stored configuration without touching the network. Fails
    /// only when the store itself cannot be read.
    fn validate(&self) -> UploadOutcome<ValidationReport>;

    /// Upload `file` and return its public URL.
    async fn upload(&self, file: &Path) -> UploadOutcome<UploadResult>;

    /// Persist a plain configuration object into the settings store.
    fn save(&self, config: &Map<String, Value>) -> UploadOutcome<()>;

    fn descriptor(&self) -> ServiceDescriptor {
        ServiceDescriptor {
            id: self.id(),
            name: self.name(),
            description: self.description(),
            schema: self.describe_config(),
        }
    }
}

/// String form of a configuration value as it is written to the store.
/// `null`, arrays and objects have no setting representation.
pub fn setting_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
