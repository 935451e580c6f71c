//! # Application Dependencies / 应用依赖
//!
//! Dependency grouping for controller construction.
//! 此模块定义控制器构造的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern. No defaults, no hidden
//! logic, just parameter grouping.

use std::sync::Arc;
use sp_core::ports::*;

/// Controller dependency grouping (non-Builder, just parameter grouping)
/// 控制器依赖分组（非 Builder，仅参数打包）
pub struct AppDeps {
    // Remote service / 远程服务
    pub encryption_service: Arc<dyn EncryptionServicePort>,

    // Host capabilities / 宿主能力
    pub clipboard: Arc<dyn ClipboardPort>,
    pub install_platform: Arc<dyn InstallPlatformPort>,

    // Storage / 存储
    pub key_value_store: Arc<dyn KeyValueStorePort>,

    // UI / 界面
    pub notifier: Arc<dyn NotifierPort>,
}
