//! Clipboard port - abstracts system clipboard writes

use anyhow::Result;
use async_trait::async_trait;

/// Write access to the system clipboard.
///
/// Implementations may fail (no clipboard, permission denied); callers turn
/// the failure into a notice.
#[async_trait]
pub trait ClipboardPort: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}
