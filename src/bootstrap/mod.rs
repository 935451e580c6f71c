//! Application bootstrap: configuration, tracing and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

use std::path::Path;

use ::tracing::info;
use sp_app::usecases::InstallError;
use sp_core::ports::AppDirsError;
use sp_platform::DirsAppDirsAdapter;

pub use config::{load_config, resolve_settings, ResolvedSettings, DEFAULT_CONFIG_FILE};
pub use wiring::{wire_dependencies, wire_with_clipboard, WiredApp};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("configuration failed: {0}")]
    Config(#[source] anyhow::Error),
    #[error("app directories unavailable: {0}")]
    AppDirs(#[from] AppDirsError),
    #[error("tracing init failed: {0}")]
    Tracing(#[source] anyhow::Error),
    #[error("encryption service client failed: {0}")]
    Service(#[source] anyhow::Error),
    #[error("install prompt controller failed: {0}")]
    Install(#[from] InstallError),
}

/// Load `.env` and the config file, then resolve the effective settings.
pub fn prepare_settings(config_path: &Path) -> Result<ResolvedSettings, BootstrapError> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let config = config::load_config_or_empty(config_path).map_err(BootstrapError::Config)?;
    let settings = config::resolve_settings_from_env(config, &DirsAppDirsAdapter::new())?;
    Ok(settings)
}

/// Start an already wired app: begins observing host install signals.
pub async fn start(app: &WiredApp) -> Result<(), BootstrapError> {
    app.controller.install().start().await?;
    info!("secure pass started");
    Ok(())
}

/// Full startup for a host shell: settings, tracing, wiring, start.
///
/// Must be called once, from within a tokio runtime.
pub async fn launch(config_path: &Path) -> Result<WiredApp, BootstrapError> {
    let settings = prepare_settings(config_path)?;
    self::tracing::init_tracing_subscriber(&settings.logs_dir)
        .map_err(BootstrapError::Tracing)?;
    info!(
        service_base_url = %settings.service_base_url,
        data_dir = %settings.data_dir.display(),
        logs_dir = %settings.logs_dir.display(),
        "settings resolved"
    );

    let app = wire_dependencies(&settings)?;
    start(&app).await?;
    Ok(app)
}
