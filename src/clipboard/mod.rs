use anyhow::{Context, Result};
use arboard::Clipboard;

/// Maximum clipboard size (10MB) to prevent DoS attacks
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Write-only clipboard collaborator
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Rejects text above the size limit
fn validate_clipboard_size(text: &str) -> Result<()> {
    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

/// Hand `text` to `provider` after the size check. Empty text is allowed: an entry's
/// stored value may legitimately be empty and copying it clears the clipboard.
pub fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_size(text)?;
    provider.set_text(text)?;
    Ok(())
}

/// Copy text to the system clipboard.
///
/// # Arguments
/// * `text` - The text to copy to clipboard
///
/// # Returns
/// * `Ok(())` if successful
/// * `Err` if clipboard is unavailable or operation fails
///
/// # Errors
/// Returns error if:
/// - Text is empty
/// - Text is too large for clipboard (>10MB)
/// - Clipboard is locked by another process
/// - Clipboard access is denied (permissions)
/// - System clipboard is unavailable (headless environment)
///
/// # Platform Support
/// - macOS: pasteboard API
/// - Linux: X11 or Wayland
/// - Windows: Win32 clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate first, before initializing clipboard (for better error messages in CI)
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }
    validate_clipboard_size(text)?;

    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
