//! # shotlink
//!
//! Host-side wiring for the upload services: application config, logging,
//! the persisted settings store and a registry that lets a UI treat every
//! backend the same way.
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), shotlink::AppError> {
//! let config = shotlink::AppConfig::from_env()?;
//! shotlink::init_logging(config.log_format);
//! let registry = shotlink::bootstrap(&config)?;
//! let result = registry.upload("sftp", std::path::Path::new("/tmp/shot.png")).await?;
//! println!("{}", result.url);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod registry;

pub use config::{AppConfig, LogFormat};
pub use error::AppError;
pub use logging::init_logging;
pub use registry::ServiceRegistry;

pub use shotlink_core::{
    ConfigSchema, JsonSettingsStore, MemorySettingsStore, ServiceDescriptor, SettingsStore,
    UploadError, UploadErrorKind, UploadResult, UploadService,
};
pub use shotlink_sftp::SftpUploader;

use std::sync::Arc;
use tracing::info;

/// Open the persisted settings store and register the built-in services.
pub fn bootstrap(config: &AppConfig) -> Result<ServiceRegistry, AppError> {
    let store = JsonSettingsStore::open(&config.data_dir)?;
    info!(data_dir = %config.data_dir.display(), "settings store opened");
    Ok(ServiceRegistry::with_default_services(Arc::new(store)))
}
