//! # shotlink – core
//!
//! The contract shared by every upload backend: the [`UploadService`] trait,
//! the configuration schema a settings UI renders, the namespaced settings /
//! secret store, and the classified [`UploadError`].

pub mod error;
pub mod schema;
pub mod service;
pub mod settings;
pub mod store;

pub use error::{StoreError, UploadError, UploadErrorKind, UploadOutcome};
pub use schema::{ConfigField, ConfigSchema, FieldKind};
pub use service::{setting_value, ServiceDescriptor, UploadResult, UploadService, ValidationReport};
pub use settings::{namespaced_key, ServiceSettings, SettingsStore};
pub use store::{JsonSettingsStore, MemorySettingsStore};
