// ── shotlink-sftp / sftp module ──────────────────────────────────────────────
//
// Settings-driven SFTP uploader:
//   • Reads hostname / port / username / credentials from the settings store
//   • Validates required fields before any network activity
//   • Picks password or private-key (+ passphrase) authentication
//   • connect → open SFTP channel → put file, closing the session on every path
//   • Returns the public URL (prefix + percent-encoded file name)

pub mod types;
pub mod paths;
pub mod client;
pub mod ssh;
pub mod service;

pub use types::*;
pub use client::{SessionGuard, TransferChannel, TransferClient, TransferSession};
pub use paths::{base_name, public_url, remote_destination};
pub use service::SftpUploader;
pub use ssh::Ssh2Client;
