// ── Settings access – namespaced view over a shared store ───────────────────

use crate::error::StoreError;
use std::sync::Arc;

/// Key/value persistence with a parallel store for secrets.
///
/// Implementations must be safe to read from several uploads at once. An
/// unreadable store is an error, never an absent value.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn get_password(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_password(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Build the store key for a service field, e.g. `sftp_hostname`.
pub fn namespaced_key(service: &str, field: &str) -> String {
    format!("{}_{}", service, field)
}

/// A single service's view of the shared store. Every key is prefixed with
/// the service id; empty values read back as `None`.
#[derive(Clone)]
pub struct ServiceSettings {
    service: &'static str,
    store: Arc<dyn SettingsStore>,
}

impl ServiceSettings {
    pub fn new(service: &'static str, store: Arc<dyn SettingsStore>) -> Self {
        Self { service, store }
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn get_setting(&self, field: &str) -> Result<Option<String>, StoreError> {
        let value = self.store.get(&namespaced_key(self.service, field))?;
        Ok(value.filter(|v| !v.is_empty()))
    }

    pub fn set_setting(&self, field: &str, value: &str) -> Result<(), StoreError> {
        self.store.set(&namespaced_key(self.service, field), value)
    }

    pub fn get_secret(&self, field: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .store
            .get_password(&namespaced_key(self.service, field))?;
        Ok(value.filter(|v| !v.is_empty()))
    }

    pub fn set_secret(&self, field: &str, value: &str) -> Result<(), StoreError> {
        self.store
            .set_password(&namespaced_key(self.service, field), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySettingsStore;

    #[test]
    fn keys_are_prefixed_with_service_id() {
        let store = Arc::new(MemorySettingsStore::new());
        let settings = ServiceSettings::new("sftp", store.clone());

        settings.set_setting("hostname", "example.org").unwrap();
        settings.set_secret("password", "hunter2").unwrap();

        assert_eq!(store.get("sftp_hostname").unwrap().as_deref(), Some("example.org"));
        assert_eq!(
            store.get_password("sftp_password").unwrap().as_deref(),
            Some("hunter2")
        );
        assert!(store.get("sftp_password").unwrap().is_none());
    }

    #[test]
    fn empty_values_read_as_unset() {
        let store = Arc::new(MemorySettingsStore::new());
        store.set("sftp_port", "").unwrap();
        let settings = ServiceSettings::new("sftp", store);
        assert!(settings.get_setting("port").unwrap().is_none());
        assert!(settings.get_secret("password").unwrap().is_none());
    }

    struct PoisonedStore;

    impl SettingsStore for PoisonedStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Poisoned)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }
        fn get_password(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Poisoned)
        }
        fn set_password(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    #[test]
    fn store_failures_are_not_read_as_unset() {
        let settings = ServiceSettings::new("sftp", Arc::new(PoisonedStore));
        assert!(matches!(settings.get_setting("hostname"), Err(StoreError::Poisoned)));
        assert!(matches!(settings.get_secret("password"), Err(StoreError::Poisoned)));
    }
}
