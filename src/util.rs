//! Small helpers: timestamps, lossy text conversion and forgiving file reads.

use std::path::Path;

/// Timestamp format used for inline image names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time rendered with a chrono format string.
pub fn now(fmt: &str) -> String {
    chrono::Local::now().format(fmt).to_string()
}

/// Decode bytes as UTF-8, replacing invalid sequences.
pub fn to_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read a whole file, returning `None` (and logging) when it cannot be read.
pub fn read_file(path: impl AsRef<Path>) -> Option<Vec<u8>> {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Like [`read_file`], decoding the content as (lossy) UTF-8.
pub fn read_file_string(path: impl AsRef<Path>) -> Option<String> {
    read_file(path).map(|bytes| to_text(&bytes))
}
