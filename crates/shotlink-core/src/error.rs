//! Error types shared by every upload service.

use serde::Serialize;
use thiserror::Error;

/// Failure of the settings / secret store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("settings store at {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings store lock poisoned")]
    Poisoned,
}

/// Coarse classification of an [`UploadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadErrorKind {
    /// A required setting is missing or unusable; nothing touched the network.
    Configuration,
    /// Transport or authentication failure.
    Connection,
    /// The session came up but the transfer channel could not be opened.
    Channel,
    /// The put operation itself failed.
    Transfer,
    /// Reading or writing the settings store failed.
    Storage,
}

/// Terminal failure of a single upload (or save) call.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No {0} configured for upload")]
    MissingSetting(&'static str),
    #[error("Invalid {field} setting: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Could not open transfer channel: {0}")]
    Channel(String),
    #[error("Transfer failed: {0}")]
    Transfer(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type UploadOutcome<T> = Result<T, UploadError>;

impl UploadError {
    pub fn kind(&self) -> UploadErrorKind {
        match self {
            UploadError::MissingSetting(_) | UploadError::InvalidSetting { .. } => {
                UploadErrorKind::Configuration
            }
            UploadError::Connection(_) => UploadErrorKind::Connection,
            UploadError::Channel(_) => UploadErrorKind::Channel,
            UploadError::Transfer(_) => UploadErrorKind::Transfer,
            UploadError::Store(_) => UploadErrorKind::Storage,
        }
    }

    /// Text suitable for showing to the end user.
    ///
    /// Configuration problems name the field. Everything else stays generic;
    /// the transport detail is kept in `Display` for logs.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::MissingSetting(_) | UploadError::InvalidSetting { .. } => self.to_string(),
            UploadError::Connection(_) => "Could not connect to server".to_string(),
            UploadError::Channel(_) => "Error connecting to server".to_string(),
            UploadError::Transfer(_) => "Error uploading to server".to_string(),
            UploadError::Store(_) => "Could not access upload settings".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_setting_names_the_field() {
        let err = UploadError::MissingSetting("hostname");
        assert_eq!(err.kind(), UploadErrorKind::Configuration);
        assert_eq!(err.user_message(), "No hostname configured for upload");
    }

    #[test]
    fn channel_and_transfer_messages_are_generic() {
        let channel = UploadError::Channel("subsystem request failed".into());
        let transfer = UploadError::Transfer("permission denied".into());
        assert_eq!(channel.kind(), UploadErrorKind::Channel);
        assert_eq!(channel.user_message(), "Error connecting to server");
        assert_eq!(transfer.kind(), UploadErrorKind::Transfer);
        assert_eq!(transfer.user_message(), "Error uploading to server");
    }

    #[test]
    fn connection_message_hides_transport_detail() {
        let err = UploadError::Connection(
            "Authentication failed: Public-key (file) auth failed: \
             Unable to open public key file /home/alice/.ssh/id_ed25519"
                .into(),
        );
        assert_eq!(err.kind(), UploadErrorKind::Connection);

        let msg = err.user_message();
        assert_eq!(msg, "Could not connect to server");
        assert!(!msg.contains("/home/alice"));
        assert!(err.to_string().contains("/home/alice/.ssh/id_ed25519"));
    }

    #[test]
    fn store_errors_convert() {
        let err: UploadError = StoreError::Poisoned.into();
        assert_eq!(err.kind(), UploadErrorKind::Storage);
    }
}
