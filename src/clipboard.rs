//! Copy text to the system clipboard.
//!
//! On X11/Wayland the selection is served by the process that set it, so a
//! short-lived process has to stay around until another program takes the
//! clipboard over. There `copy_to_clipboard` blocks until that happens.

use crate::util::to_text;

/// Errors raised while talking to the platform clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
}

/// Copy `data` to the clipboard. Non UTF-8 bytes are replaced.
pub fn copy_to_clipboard(data: impl AsRef<[u8]>) -> Result<(), ClipboardError> {
    let text = to_text(data.as_ref());
    let mut clipboard = arboard::Clipboard::new()?;
    log::debug!("Copying {} bytes to clipboard", data.as_ref().len());
    set_text(&mut clipboard, text)?;
    Ok(())
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_text(clipboard: &mut arboard::Clipboard, text: String) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    clipboard.set().wait().text(text)
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_text(clipboard: &mut arboard::Clipboard, text: String) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    #[ignore = "needs a display server"]
    fn test_copied_text_outlives_the_call() {
        let writer = thread::spawn(|| copy_to_clipboard(b"vto clipboard \xff"));
        thread::sleep(Duration::from_millis(300));

        let mut reader = arboard::Clipboard::new().unwrap();
        assert_eq!(reader.get_text().unwrap(), "vto clipboard \u{fffd}");

        // Taking ownership releases the waiting writer.
        reader.set_text("released").unwrap();
        writer.join().unwrap().unwrap();
    }
}
