//! Clipboard helper for the `y` key
//!
//! Uses `arboard` for cross-platform support. The clipboard is created fresh
//! each time so nothing is held between copies.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Copy and describe the outcome for a toast
pub fn copy_with_feedback(text: &str) -> String {
    match copy_to_clipboard(text) {
        Ok(()) => format!("✓ Copied {text}"),
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            "✗ Failed to copy".to_string()
        }
    }
}
