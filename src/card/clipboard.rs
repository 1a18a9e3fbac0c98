//! System clipboard access for the copy-email action
//!
//! A fresh `arboard::Clipboard` is opened per write. On X11 and Wayland the
//! writing process owns the copied text, so a command that exits right after
//! copying can ask to keep serving it for a while.

use anyhow::{Context, Result};
use arboard::Clipboard;
use std::time::Duration;

/// Write `text` to the clipboard.
///
/// With `hold` set, X11/Wayland writes block until another program takes
/// over the clipboard or `hold` runs out. Elsewhere `hold` has no effect.
pub fn copy_to_clipboard(text: &str, hold: Option<Duration>) -> Result<()> {
    let mut clipboard = Clipboard::new().context("No clipboard available")?;
    set_text(&mut clipboard, text, hold).context("Clipboard refused the text")
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_text(
    clipboard: &mut Clipboard,
    text: &str,
    hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;
    match hold {
        Some(hold) => clipboard
            .set()
            .wait_until(std::time::Instant::now() + hold)
            .text(text),
        None => clipboard.set_text(text),
    }
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_text(
    clipboard: &mut Clipboard,
    text: &str,
    _hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

/// Destination for the copy-email action
///
/// The card talks to the clipboard through this seam so tests can observe
/// writes and simulate a denied clipboard.
pub trait ClipboardWriter: Send {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The platform clipboard
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemClipboard {
    hold: Option<Duration>,
}

impl SystemClipboard {
    /// Clipboard for a process about to exit: keep the copied text
    /// available for up to `hold` after writing
    pub fn holding(hold: Duration) -> Self {
        Self {
            hold: (!hold.is_zero()).then_some(hold),
        }
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        copy_to_clipboard(text, self.hold)
    }
}
