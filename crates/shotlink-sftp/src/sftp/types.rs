// ── Types ─────────────────────────────────────────────────────────────────────

use shotlink_core::{ConfigField, ConfigSchema, ServiceSettings, UploadError, UploadOutcome};
use std::fmt;

pub const SERVICE_ID: &str = "sftp";
pub const SERVICE_NAME: &str = "SFTP";
pub const SERVICE_DESCRIPTION: &str = "Upload screenshots to a server via SFTP";

// ── Setting keys ─────────────────────────────────────────────────────────────

pub const HOSTNAME: &str = "hostname";
pub const PORT: &str = "port";
pub const REMOTE_PATH: &str = "remotePath";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const PRIVATE_KEY: &str = "privateKey";
pub const URL_PREFIX: &str = "urlPrefix";

/// Fields that must be set before a connection is attempted, in check order.
pub const REQUIRED_FOR_UPLOAD: [&str; 4] = [HOSTNAME, PORT, USERNAME, URL_PREFIX];

pub fn config_schema() -> ConfigSchema {
    ConfigSchema::new(
        SERVICE_NAME,
        vec![
            ConfigField::text(HOSTNAME, "Hostname", "The hostname or IP of the server").required(),
            ConfigField::text(PORT, "Port", "The port on the server to connect to").required(),
            ConfigField::text(
                REMOTE_PATH,
                "Path",
                "The path to the directory to store screenshots",
            )
            .required(),
            ConfigField::text(USERNAME, "Username", "The username you wish to authenticate as")
                .required(),
            ConfigField::secret(
                PASSWORD,
                "Password",
                "The password to login with, or the passphrase of the private key",
            ),
            ConfigField::secret(
                PRIVATE_KEY,
                "Private Key",
                "(optional) The SSH key, or the path to a key file, to login with",
            ),
            ConfigField::text(URL_PREFIX, "URL", "The URL to the directory holding screenshots")
                .required(),
        ],
    )
}

// ── Connection request handed to the transfer client ────────────────────────

/// What the transfer client needs to open a session.
///
/// Exactly one of `password` / `private_key` drives authentication; when a
/// private key is present the password secret travels as `passphrase`.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<String>,
    pub passphrase: Option<String>,
    pub private_key: Option<String>,
}

impl ConnectRequest {
    /// Short label for logs.
    pub fn auth_method(&self) -> &'static str {
        if self.private_key.is_some() {
            "publickey"
        } else if self.password.is_some() {
            "password"
        } else {
            "agent"
        }
    }
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "Some(<redacted>)"
    } else {
        "None"
    }
}

impl fmt::Debug for ConnectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectRequest")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("passphrase", &redact(&self.passphrase))
            .field("private_key", &redact(&self.private_key))
            .finish()
    }
}

/// A fully validated upload destination.
#[derive(Debug, Clone)]
pub struct SftpTarget {
    pub request: ConnectRequest,
    pub remote_dir: String,
    pub url_prefix: String,
}

// ── Stored configuration ─────────────────────────────────────────────────────

/// Snapshot of the SFTP settings, read from the store at the start of a call.
#[derive(Clone, Default)]
pub struct SftpSettings {
    pub hostname: Option<String>,
    pub port: Option<String>,
    pub remote_path: Option<String>,
    pub username: Option<String>,
    pub url_prefix: Option<String>,
    pub password: Option<String>,
    pub private_key: Option<String>,
}

impl fmt::Debug for SftpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SftpSettings")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("remote_path", &self.remote_path)
            .field("username", &self.username)
            .field("url_prefix", &self.url_prefix)
            .field("password", &redact(&self.password))
            .field("private_key", &redact(&self.private_key))
            .finish()
    }
}

impl SftpSettings {
    /// Read every field; a store that cannot be read fails the whole load.
    pub fn load(settings: &ServiceSettings) -> UploadOutcome<Self> {
        Ok(Self {
            hostname: settings.get_setting(HOSTNAME)?,
            port: settings.get_setting(PORT)?,
            remote_path: settings.get_setting(REMOTE_PATH)?,
            username: settings.get_setting(USERNAME)?,
            url_prefix: settings.get_setting(URL_PREFIX)?,
            password: settings.get_secret(PASSWORD)?,
            private_key: settings.get_secret(PRIVATE_KEY)?,
        })
    }

    fn value(&self, key: &str) -> Option<&str> {
        let value = match key {
            HOSTNAME => &self.hostname,
            PORT => &self.port,
            REMOTE_PATH => &self.remote_path,
            USERNAME => &self.username,
            URL_PREFIX => &self.url_prefix,
            _ => return None,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Required fields that are unset, in check order.
    pub fn missing(&self) -> Vec<&'static str> {
        REQUIRED_FOR_UPLOAD
            .iter()
            .copied()
            .filter(|key| self.value(key).is_none())
            .collect()
    }

    fn require(&self, key: &'static str) -> UploadOutcome<String> {
        self.value(key)
            .map(|v| v.trim().to_string())
            .ok_or(UploadError::MissingSetting(key))
    }

    /// Validate and turn the settings into a connection target.
    pub fn resolve(&self) -> UploadOutcome<SftpTarget> {
        let host = self.require(HOSTNAME)?;
        let port = parse_port(&self.require(PORT)?)?;
        let username = self.require(USERNAME)?;
        let url_prefix = self.require(URL_PREFIX)?;

        let (password, passphrase) = if self.private_key.is_some() {
            (None, self.password.clone())
        } else {
            (self.password.clone(), None)
        };

        Ok(SftpTarget {
            request: ConnectRequest {
                host,
                port,
                username,
                password,
                passphrase,
                private_key: self.private_key.clone(),
            },
            remote_dir: self.remote_path.clone().unwrap_or_default(),
            url_prefix,
        })
    }
}

pub fn parse_port(raw: &str) -> UploadOutcome<u16> {
    match raw.trim().parse::<u16>() {
        Ok(0) => Err(UploadError::InvalidSetting {
            field: PORT,
            reason: "port 0 is not a valid destination".into(),
        }),
        Ok(port) => Ok(port),
        Err(e) => Err(UploadError::InvalidSetting {
            field: PORT,
            reason: format!("'{}' is not a port number: {}", raw.trim(), e),
        }),
    }
}
