//! Tint configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tint_theme::ThemeConfig;

/// Top-level Tint configuration (tint.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TintConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Data files, relative to the directory holding tint.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Resource catalog (stub, platform, and overlay package resources)
    #[serde(default = "default_resources")]
    pub resources: String,
    /// Simulated device state (installed overlays, settings, wallpapers)
    #[serde(default = "default_device")]
    pub device: String,
}

fn default_resources() -> String {
    "resources.toml".to_string()
}

fn default_device() -> String {
    "device.toml".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            resources: default_resources(),
            device: default_device(),
        }
    }
}

impl TintConfig {
    /// Load configuration from a directory (looks for tint.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join("tint.toml")
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No tint.toml found in {}. Run `tint init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: TintConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn resources_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.resources)
    }

    pub fn device_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: TintConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme, ThemeConfig::default());
        assert_eq!(config.paths.resources, "resources.toml");
        assert_eq!(
            config.device_path(Path::new("/tmp/demo")),
            Path::new("/tmp/demo/device.toml")
        );
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = TintConfig::default();
        config.theme.default_title = "Stock".into();
        config.paths.device = "state/device.toml".into();

        let parsed: TintConfig = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.theme.default_title, "Stock");
        assert_eq!(parsed.paths.device, "state/device.toml");
    }

    #[test]
    fn missing_config_points_at_init() {
        let err = TintConfig::load_from_dir(Path::new("/nonexistent/tint")).unwrap_err();
        assert!(err.to_string().contains("tint init"));
    }
}
