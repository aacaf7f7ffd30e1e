//! iTerm2 inline image escape sequence.
//!
//! Layout: `ESC ] 1337 ; File=name=<b64 name> ;inline=1;height=<rows> : <b64 data> BEL`.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::util::{now, TIMESTAMP_FORMAT};

/// Terminal rows used when no height is requested.
pub const DEFAULT_IMAGE_HEIGHT: u16 = 6;

const OSC_1337: &str = "\x1b]1337;";
const BEL: char = '\x07';

/// Build the escape sequence from an already base64 encoded name and payload.
///
/// A `height` of 0 falls back to [`DEFAULT_IMAGE_HEIGHT`].
pub fn escape_sequence(name_b64: &str, payload_b64: &str, height: u16) -> String {
    let height = if height == 0 {
        DEFAULT_IMAGE_HEIGHT
    } else {
        height
    };
    format!(
        "{}File=name={};inline=1;height={}:{}{}",
        OSC_1337, name_b64, height, payload_b64, BEL
    )
}

/// Inline a base64 payload, naming it after the current timestamp.
pub fn inline_base64(payload_b64: &str, height: u16) -> String {
    let name = STANDARD.encode(now(TIMESTAMP_FORMAT));
    escape_sequence(&name, payload_b64, height)
}

/// Inline raw image bytes.
pub fn inline_bytes(bytes: &[u8], height: u16) -> String {
    inline_base64(&STANDARD.encode(bytes), height)
}

/// Inline an image file from disk.
pub fn inline_path(path: &Path, height: u16) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(inline_bytes(&bytes, height))
}
