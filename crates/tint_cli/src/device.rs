//! Simulated device state (device.toml)
//!
//! Installed overlays with their enabled flags, the secure settings table, and
//! the wallpapers set so far. Loaded into the in-memory platform services
//! before a command runs and written back afterwards.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tint_platform::{MemoryOverlayService, MemorySettings, OverlayInfo, WallpaperDestination};

/// A wallpaper set on the device
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WallpaperRecord {
    pub resource_name: String,
    pub destination: WallpaperDestination,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceState {
    #[serde(default)]
    pub overlays: Vec<OverlayInfo>,
    #[serde(default)]
    pub settings: IndexMap<String, String>,
    #[serde(default)]
    pub wallpapers: Vec<WallpaperRecord>,
}

/// Platform services backed by a [`DeviceState`]
pub struct DeviceServices {
    pub overlays: Arc<MemoryOverlayService>,
    pub settings: Arc<MemorySettings>,
}

impl DeviceState {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize device state")
    }

    pub fn services(&self) -> DeviceServices {
        DeviceServices {
            overlays: Arc::new(MemoryOverlayService::with_overlays(self.overlays.clone())),
            settings: Arc::new(MemorySettings::with_values(self.settings.clone())),
        }
    }

    /// Pick up whatever the services changed
    pub fn sync_from(&mut self, services: &DeviceServices) {
        self.overlays = services.overlays.overlays();
        self.settings = services.settings.snapshot();
    }

    pub fn record_wallpaper(&mut self, resource_name: &str, destination: WallpaperDestination) {
        self.wallpapers.push(WallpaperRecord {
            resource_name: resource_name.to_string(),
            destination,
        });
    }
}
