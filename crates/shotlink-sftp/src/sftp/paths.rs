// ── Remote destination and public URL helpers ───────────────────────────────

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::Path;

/// Characters left untouched when a file name becomes a URL path component
/// (the unreserved set of a URI component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Final component of a local path, without any directory part. `None` when
/// there is no file name or it is not valid UTF-8.
pub fn base_name(local: &Path) -> Option<String> {
    local.file_name()?.to_str().map(str::to_string)
}

/// Join the remote directory and a file name with `/`.
///
/// Remote paths are always POSIX, whatever the local platform.
pub fn remote_destination(remote_dir: &str, file_name: &str) -> String {
    let dir = remote_dir.trim();
    if dir.is_empty() {
        file_name.to_string()
    } else if dir.ends_with('/') {
        format!("{}{}", dir, file_name)
    } else {
        format!("{}/{}", dir, file_name)
    }
}

pub fn public_url(url_prefix: &str, file_name: &str) -> String {
    format!(
        "{}{}",
        url_prefix,
        utf8_percent_encode(file_name, URI_COMPONENT)
    )
}
