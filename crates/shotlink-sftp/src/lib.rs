//! # shotlink – SFTP
//!
//! Upload service that pushes a local file to a server over SFTP and returns
//! the public URL under which the file is served.

pub mod sftp;

pub use sftp::{SftpUploader, Ssh2Client};
