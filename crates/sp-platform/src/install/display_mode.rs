use std::str::FromStr;

/// Env var the host sets to report its display mode.
pub const DISPLAY_MODE_ENV: &str = "SECUREPASS_DISPLAY_MODE";

/// How the host presents the app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Regular browser tab or window; installing is possible.
    #[default]
    Browser,
    /// Launched as an installed app.
    Standalone,
}

impl DisplayMode {
    pub fn from_standalone_flag(standalone: bool) -> Self {
        if standalone {
            DisplayMode::Standalone
        } else {
            DisplayMode::Browser
        }
    }

    /// Host-reported mode from the environment, falling back to the
    /// configured flag. Unknown values are ignored.
    pub fn probe(configured_standalone: bool) -> Self {
        std::env::var(DISPLAY_MODE_ENV)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| Self::from_standalone_flag(configured_standalone))
    }

    pub fn is_standalone(&self) -> bool {
        matches!(self, DisplayMode::Standalone)
    }
}

impl FromStr for DisplayMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browser" => Ok(DisplayMode::Browser),
            "standalone" | "fullscreen" | "minimal-ui" => Ok(DisplayMode::Standalone),
            other => Err(anyhow::anyhow!("unknown display mode: {other}")),
        }
    }
}
