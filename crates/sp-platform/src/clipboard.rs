//! System clipboard adapter backed by `clipboard-rs`.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContext};
use tokio::task::spawn_blocking;
use tracing::debug;

use sp_core::ports::ClipboardPort;

/// Writes text to the OS clipboard.
///
/// A fresh context is opened per write on a blocking thread; the native
/// handles are not `Send` on every platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipboardPort for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        let len = text.len();
        spawn_blocking(move || {
            let ctx = ClipboardContext::new()
                .map_err(|e| anyhow!("Failed to open clipboard: {}", e))?;
            ctx.set_text(text)
                .map_err(|e| anyhow!("Failed to write clipboard text: {}", e))
        })
        .await
        .map_err(|e| anyhow!("Clipboard task failed: {}", e))??;

        debug!(len, "clipboard text written");
        Ok(())
    }
}
