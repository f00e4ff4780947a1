//! Engine configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub general: GeneralConfig,
    pub gallery: GalleryConfig,
    pub transition: TransitionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            gallery: GalleryConfig::default(),
            transition: TransitionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Start the session with ambient audio muted
    pub start_muted: bool,
    /// Days to keep rotated log files
    pub log_retention_days: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_muted: true,
            log_retention_days: 7,
        }
    }
}

/// Gallery pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Records shown when a facet selection takes effect
    pub page_size: usize,
    /// Records added per lazy-load trigger
    pub page_step: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            page_size: 4,
            page_step: 4,
        }
    }
}

/// Navigation transition timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub fade_out_ms: u64,
    pub fade_in_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fade_out_ms: 1400,
            fade_in_ms: 1400,
        }
    }
}

impl TransitionConfig {
    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }
}

impl EngineConfig {
    /// Load configuration from file
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "DnDDesignCenter", "Showroom")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.gallery.page_size, 4);
        assert_eq!(config.gallery.page_step, 4);
        assert_eq!(config.transition.fade_out(), Duration::from_millis(1400));
        assert_eq!(config.transition.fade_in(), Duration::from_millis(1400));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str("[gallery]\npage_size = 8\n").unwrap();
        assert_eq!(config.gallery.page_size, 8);
        assert_eq!(config.gallery.page_step, 4);
        assert_eq!(config.transition.fade_out_ms, 1400);
    }
}
