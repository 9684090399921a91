use anyhow::{Context, Result, bail};
use arboard::Clipboard;

/// Copied payloads are repository browse URLs; anything bigger than this
/// is a caller bug, not data.
const MAX_CLIPBOARD_SIZE: usize = 1024 * 1024;

/// Copy text to the system clipboard.
///
/// Validation runs before the clipboard is touched, so empty and oversized
/// payloads are rejected with the same message on machines without a
/// clipboard at all.
///
/// # Errors
///
/// Returns an error if the text is empty or oversized, or if the system
/// clipboard is unavailable (headless environments, denied access).
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    validate_clipboard_text(text)?;

    let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
    clipboard.set_text(text).context("Failed to set clipboard contents")
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}
