//! Host install-signal bridge.
//!
//! The host shell (webview, launcher) owns the real install capability. It
//! reports through a [`HostInstallHandle`]; the app observes the same signals
//! through [`HostInstallBridge`] as an `InstallPlatformPort`.

pub mod bridge;
pub mod display_mode;

pub use bridge::{HostInstallBridge, HostInstallHandle};
pub use display_mode::{DisplayMode, DISPLAY_MODE_ENV};
