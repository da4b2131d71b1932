//! # Settings stores
//!
//! Two [`SettingsStore`] implementations:
//!
//! - [`MemorySettingsStore`] keeps everything in process memory. Used by tests
//!   and by hosts that manage persistence themselves.
//! - [`JsonSettingsStore`] persists plain settings and secrets to two separate
//!   pretty-printed JSON files inside a data directory. Both files are loaded
//!   once at open and rewritten on every `set`.
//!
//! ## Files
//!
//! - `settings.json` holds plain values such as `sftp_hostname`.
//! - `secrets.json` holds secret values such as `sftp_password`. On Unix it is
//!   kept at mode `0600`, whatever mode an existing file had.
//!
//! Every write goes to a temporary file in the same directory which is then
//! renamed over the target, so a crash never leaves a half-written file.

use crate::error::StoreError;
use crate::settings::SettingsStore;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;

type Values = BTreeMap<String, String>;

fn read_value(map: &RwLock<Values>, key: &str) -> Result<Option<String>, StoreError> {
    match map.read() {
        Ok(guard) => Ok(guard.get(key).cloned()),
        Err(_) => {
            warn!("settings store lock poisoned while reading '{}'", key);
            Err(StoreError::Poisoned)
        }
    }
}

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Values>,
    secrets: RwLock<Values>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        read_value(&self.settings, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.settings
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_password(&self, key: &str) -> Result<Option<String>, StoreError> {
        read_value(&self.secrets, key)
    }

    fn set_password(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.secrets
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── JSON-file store ──────────────────────────────────────────────────────────

pub const SETTINGS_FILE: &str = "settings.json";
pub const SECRETS_FILE: &str = "secrets.json";

pub struct JsonSettingsStore {
    settings_path: PathBuf,
    secrets_path: PathBuf,
    settings: RwLock<Values>,
    secrets: RwLock<Values>,
}

impl JsonSettingsStore {
    /// Open (or create) the store inside `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.display().to_string(),
            source,
        })?;

        let settings_path = dir.join(SETTINGS_FILE);
        let secrets_path = dir.join(SECRETS_FILE);
        let settings = load_values(&settings_path)?;
        let secrets = load_values(&secrets_path)?;
        debug!(
            "Opened settings store at {} ({} settings, {} secrets)",
            dir.display(),
            settings.len(),
            secrets.len()
        );

        Ok(Self {
            settings_path,
            secrets_path,
            settings: RwLock::new(settings),
            secrets: RwLock::new(secrets),
        })
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn secrets_path(&self) -> &Path {
        &self.secrets_path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        read_value(&self.settings, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.settings.write().map_err(|_| StoreError::Poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        write_values(&self.settings_path, &guard, false)
    }

    fn get_password(&self, key: &str) -> Result<Option<String>, StoreError> {
        read_value(&self.secrets, key)
    }

    fn set_password(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.secrets.write().map_err(|_| StoreError::Poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        write_values(&self.secrets_path, &guard, true)
    }
}

fn load_values(path: &Path) -> Result<Values, StoreError> {
    if !path.exists() {
        return Ok(Values::new());
    }
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    if raw.trim().is_empty() {
        return Ok(Values::new());
    }
    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        path: path.display().to_string(),
        source,
    })
}

const SETTINGS_MODE: u32 = 0o644;
const SECRETS_MODE: u32 = 0o600;

fn write_values(path: &Path, values: &Values, private: bool) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.display().to_string(),
        source,
    };
    let json = serde_json::to_string_pretty(values).map_err(|source| StoreError::Corrupt {
        path: path.display().to_string(),
        source,
    })?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    set_mode(tmp.as_file(), if private { SECRETS_MODE } else { SETTINGS_MODE })
        .map_err(io_err)?;
    tmp.write_all(json.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(file: &fs::File, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &fs::File, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_keeps_secrets_apart() {
        let store = MemorySettingsStore::new();
        store.set("a", "1").unwrap();
        store.set_password("a", "secret").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get_password("a").unwrap().as_deref(), Some("secret"));
        assert!(store.get("b").unwrap().is_none());
    }

    #[test]
    fn poisoned_lock_is_an_error_not_a_missing_value() {
        let store = std::sync::Arc::new(MemorySettingsStore::new());
        store.set("sftp_hostname", "h").unwrap();

        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.settings.write().unwrap();
            panic!("poison the settings lock");
        })
        .join();

        assert!(matches!(store.get("sftp_hostname"), Err(StoreError::Poisoned)));
        assert!(matches!(store.set("sftp_port", "22"), Err(StoreError::Poisoned)));
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = JsonSettingsStore::open(dir.path()).unwrap();
            store.set("sftp_hostname", "example.org").unwrap();
            store.set_password("sftp_password", "hunter2").unwrap();
        }

        let store = JsonSettingsStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get("sftp_hostname").unwrap().as_deref(),
            Some("example.org")
        );
        assert_eq!(
            store.get_password("sftp_password").unwrap().as_deref(),
            Some("hunter2")
        );
    }

    #[test]
    fn secrets_never_land_in_settings_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonSettingsStore::open(dir.path()).unwrap();
        store.set("sftp_username", "alice").unwrap();
        store.set_password("sftp_password", "hunter2").unwrap();

        let settings = fs::read_to_string(store.settings_path()).unwrap();
        assert!(settings.contains("alice"));
        assert!(!settings.contains("hunter2"));

        let secrets = fs::read_to_string(store.secrets_path()).unwrap();
        assert!(secrets.contains("hunter2"));
    }

    #[cfg(unix)]
    #[test]
    fn secrets_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = JsonSettingsStore::open(dir.path()).unwrap();
        store.set_password("sftp_password", "hunter2").unwrap();

        let mode = fs::metadata(store.secrets_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_secrets_file_is_tightened_on_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let secrets = dir.path().join(SECRETS_FILE);
        fs::write(&secrets, "{}").unwrap();
        fs::set_permissions(&secrets, fs::Permissions::from_mode(0o644)).unwrap();

        let store = JsonSettingsStore::open(dir.path()).unwrap();
        store.set_password("sftp_password", "hunter2").unwrap();

        let mode = fs::metadata(&secrets).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn writes_replace_the_file_whole() {
        let dir = TempDir::new().unwrap();
        let store = JsonSettingsStore::open(dir.path()).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .filter(|name| name != SETTINGS_FILE)
            .collect();
        assert!(leftovers.is_empty(), "stray files: {:?}", leftovers);

        let raw = fs::read_to_string(store.settings_path()).unwrap();
        let values: Values = serde_json::from_str(&raw).unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "[1, 2, 3]").unwrap();
        let result = JsonSettingsStore::open(dir.path());
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = JsonSettingsStore::open(&nested).unwrap();
        store.set("k", "v").unwrap();
        assert!(nested.join(SETTINGS_FILE).exists());
    }
}
