//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (HTTP client, key-value file, notice board)
//! - ✅ Create platform implementations (clipboard, install bridge)
//! - ✅ Inject all dependencies into the controller
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! ❌ **No configuration validation / 禁止做配置验证**
//!
//! > **This is the only place allowed to depend on sp-infra + sp-platform + sp-app simultaneously.**
//! > **这是唯一允许同时依赖 sp-infra、sp-platform 和 sp-app 的地方。**

use std::sync::Arc;

use sp_app::{AppDeps, SecurePassController};
use sp_core::ports::ClipboardPort;
use sp_infra::{FileKeyValueStore, HttpEncryptionService, NoticeBoard};
use sp_platform::{DisplayMode, HostInstallBridge, HostInstallHandle, SystemClipboard};

use super::config::ResolvedSettings;
use super::BootstrapError;

/// Everything a host shell needs after wiring.
#[derive(Clone)]
pub struct WiredApp {
    pub controller: SecurePassController,
    /// Render source for notices.
    pub notices: NoticeBoard,
    /// Host-side sender for install signals.
    pub install_handle: HostInstallHandle,
}

/// Wire the app with the system clipboard.
pub fn wire_dependencies(settings: &ResolvedSettings) -> Result<WiredApp, BootstrapError> {
    wire_with_clipboard(settings, Arc::new(SystemClipboard::new()))
}

/// Wire the app with a caller-provided clipboard (headless hosts, tests).
pub fn wire_with_clipboard(
    settings: &ResolvedSettings,
    clipboard: Arc<dyn ClipboardPort>,
) -> Result<WiredApp, BootstrapError> {
    let encryption_service = HttpEncryptionService::new(settings.service_base_url.clone())
        .map_err(BootstrapError::Service)?;
    let key_value_store = FileKeyValueStore::with_defaults(settings.data_dir.clone());
    let notices = NoticeBoard::new();
    let bridge = HostInstallBridge::new(DisplayMode::probe(settings.standalone));
    let install_handle = bridge.handle();

    let controller = SecurePassController::new(AppDeps {
        encryption_service: Arc::new(encryption_service),
        clipboard,
        install_platform: Arc::new(bridge),
        key_value_store: Arc::new(key_value_store),
        notifier: Arc::new(notices.clone()),
    });

    Ok(WiredApp {
        controller,
        notices,
        install_handle,
    })
}
