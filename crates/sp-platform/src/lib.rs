//! Platform adapters for Secure Pass.
//!
//! OS and host-shell facing implementations of the `sp-core` ports: the
//! system clipboard, application directories and the install-signal bridge.

pub mod app_dirs;
pub mod clipboard;
pub mod install;

pub use app_dirs::DirsAppDirsAdapter;
pub use clipboard::SystemClipboard;
pub use install::{DisplayMode, HostInstallBridge, HostInstallHandle};
