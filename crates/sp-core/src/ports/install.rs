//! Host install-capability port
//!
//! The host shell (webview bridge, launcher) reports whether the app already
//! runs installed and pushes install-capability signals. Subscriptions are
//! scoped: dropping the receiver unsubscribes.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::install::InstallChoice;

/// Single-use handle permitting one install prompt.
///
/// `prompt` consumes the handle, so a captured capability can never be
/// invoked twice.
#[async_trait]
pub trait InstallCapability: Send + Sync {
    async fn prompt(self: Box<Self>) -> Result<InstallChoice>;
}

pub enum InstallSignal {
    /// Install became possible; carries the promptable handle.
    CapabilityAvailable(Box<dyn InstallCapability>),
    /// The app got installed outside of our prompt.
    AppInstalled,
}

impl std::fmt::Debug for InstallSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallSignal::CapabilityAvailable(_) => f.write_str("CapabilityAvailable(..)"),
            InstallSignal::AppInstalled => f.write_str("AppInstalled"),
        }
    }
}

pub trait InstallPlatformPort: Send + Sync {
    /// Standalone display mode or a platform-specific installed flag.
    fn is_standalone(&self) -> bool;

    /// Start receiving install signals until the receiver is dropped.
    fn subscribe(&self) -> Result<mpsc::Receiver<InstallSignal>>;
}
