//! Clipboard access.

use anyhow::{Context, Result};
use tracing::debug;

/// Destination for copied text.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard via `arboard`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
            .context("Failed to copy to clipboard")?;
        debug!(bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}

/// Clipboard that keeps the last copied text in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Last copied text, if any.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
