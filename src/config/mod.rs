use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::theme::ThemeMode;

/// Default snapshot poll interval
pub const DEFAULT_REFRESH_MS: u64 = 1000;

/// Floor for the poll interval so a typo can't spin the disk
const MIN_REFRESH_MS: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Color theme used at startup
    #[serde(default)]
    pub theme: ThemeMode,

    /// How often to check the snapshot file for changes
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,

    /// Snapshot to open when `--input` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_input: Option<PathBuf>,

    /// Show the category legend above the grid
    #[serde(default = "default_true")]
    pub show_legend: bool,
}

fn default_refresh_ms() -> u64 {
    DEFAULT_REFRESH_MS
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            refresh_ms: DEFAULT_REFRESH_MS,
            default_input: None,
            show_legend: true,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("digitdist");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the user config dir, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            return Ok(Self::load_from(&path));
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(&path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    /// Read a config file, falling back to defaults when it is unreadable
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => return config.sanitized(),
                Err(e) => tracing::warn!("Failed to parse config: {}", e),
            },
            Err(e) => tracing::warn!("Failed to read config: {}", e),
        }
        AppConfig::default()
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&self.clone().sanitized())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply a `--refresh-ms` override, with the same floor as the config file
    pub fn with_refresh_ms(mut self, refresh_ms: u64) -> Self {
        self.refresh_ms = refresh_ms;
        self.sanitized()
    }

    fn sanitized(mut self) -> Self {
        if self.refresh_ms < MIN_REFRESH_MS {
            tracing::warn!(
                "refresh_ms {} is below {}, clamping",
                self.refresh_ms,
                MIN_REFRESH_MS
            );
            self.refresh_ms = MIN_REFRESH_MS;
        }
        // Empty path means "unset"
        if self
            .default_input
            .as_ref()
            .map(|p| p.as_os_str().is_empty())
            .unwrap_or(false)
        {
            self.default_input = None;
        }
        self
    }
}
