//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Resolve effective settings (env overrides, defaults) / 解析生效配置
//!
//! `load_config` accepts whatever is in the file. Defaults are applied only
//! in [`resolve_settings`], never in the DTO mapping.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use sp_core::config::AppConfig;
use sp_core::ports::{AppDirsError, AppDirsPort};
use sp_infra::DEFAULT_SERVICE_BASE_URL;

/// Config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "securepass.toml";

/// Env var overriding `[service] base_url`.
pub const API_URL_ENV: &str = "SECUREPASS_API_URL";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// Empty strings and missing sections are facts, not errors.
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Load the config file if it exists, otherwise start from empty facts.
pub fn load_config_or_empty(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using empty config");
        return Ok(AppConfig::empty());
    }
    load_config(config_path)
}

/// Effective settings after overrides and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub service_base_url: String,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub standalone: bool,
}

/// Apply overrides and defaults to the loaded config.
///
/// Precedence for the service URL: `api_url_override`, then the file, then
/// [`DEFAULT_SERVICE_BASE_URL`]. The data directory falls back to the
/// platform app data root. Logs go under the platform root, or under the
/// configured data directory when the platform has none.
pub fn resolve_settings(
    config: AppConfig,
    api_url_override: Option<String>,
    app_dirs: &dyn AppDirsPort,
) -> Result<ResolvedSettings, AppDirsError> {
    let service_base_url = api_url_override
        .filter(|url| !url.trim().is_empty())
        .or_else(|| Some(config.service_base_url).filter(|url| !url.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_SERVICE_BASE_URL.to_string());

    let configured = !config.data_dir.as_os_str().is_empty();
    let (data_dir, logs_dir) = match (configured, app_dirs.get_app_dirs()) {
        (false, dirs) => {
            let dirs = dirs?;
            (dirs.app_data_root.clone(), dirs.logs_dir())
        }
        (true, Ok(dirs)) => (config.data_dir, dirs.logs_dir()),
        (true, Err(err)) => {
            debug!(error = %err, "platform app dirs unavailable, logging under data dir");
            let logs_dir = config.data_dir.join("logs");
            (config.data_dir, logs_dir)
        }
    };

    Ok(ResolvedSettings {
        service_base_url,
        data_dir,
        logs_dir,
        standalone: config.standalone,
    })
}

/// [`resolve_settings`] with the override read from the environment.
pub fn resolve_settings_from_env(
    config: AppConfig,
    app_dirs: &dyn AppDirsPort,
) -> Result<ResolvedSettings, AppDirsError> {
    resolve_settings(config, std::env::var(API_URL_ENV).ok(), app_dirs)
}
