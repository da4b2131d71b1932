// ── Transfer client seam ─────────────────────────────────────────────────────
//
// The uploader drives a blocking client through three small traits so the
// SSH implementation can be swapped for an in-memory fake.

use crate::sftp::types::ConnectRequest;
use log::debug;
use std::path::Path;

/// Opens authenticated sessions.
pub trait TransferClient: Send + Sync {
    fn connect(&self, request: &ConnectRequest) -> Result<Box<dyn TransferSession>, String>;
}

/// One authenticated connection.
pub trait TransferSession {
    fn open_channel(&mut self) -> Result<Box<dyn TransferChannel>, String>;

    /// Tear the connection down. Called exactly once, by [`SessionGuard`].
    fn close(&mut self);
}

/// A file-transfer channel on top of a session.
pub trait TransferChannel {
    /// Copy the local file to `remote_path`, returning the bytes written.
    fn put(&mut self, local_path: &Path, remote_path: &str) -> Result<u64, String>;
}

/// Closes the wrapped session when dropped, whichever way the upload ends.
pub struct SessionGuard {
    session: Box<dyn TransferSession>,
}

impl SessionGuard {
    pub fn new(session: Box<dyn TransferSession>) -> Self {
        Self { session }
    }

    pub fn open_channel(&mut self) -> Result<Box<dyn TransferChannel>, String> {
        self.session.open_channel()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        debug!("Closing transfer session");
        self.session.close();
    }
}
