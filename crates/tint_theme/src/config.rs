//! Engine configuration
//!
//! Usually read from the `[theme]` table of `tint.toml`; every field has a
//! default matching a stock device.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::category::TargetPackages;

/// Secure-settings key holding the serialized current theme
pub const THEME_SETTING: &str = "theme_customization_overlay_packages";

fn default_setting_key() -> String {
    THEME_SETTING.to_string()
}

fn default_title() -> String {
    "Default".to_string()
}

fn default_wallpaper_timeout_ms() -> u64 {
    60_000
}

fn default_wallpaper_message() -> String {
    "Set the theme wallpaper on".to_string()
}

fn default_custom_id_prefix() -> String {
    "custom_".to_string()
}

/// Theme engine configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Target package ids
    #[serde(default)]
    pub targets: TargetPackages,
    /// Settings key for the persisted selection
    #[serde(default = "default_setting_key")]
    pub setting_key: String,
    /// Title of the default theme when the catalog has none
    #[serde(default = "default_title")]
    pub default_title: String,
    /// How long to wait for the wallpaper destination answer
    #[serde(default = "default_wallpaper_timeout_ms")]
    pub wallpaper_timeout_ms: u64,
    /// Prompt shown by the wallpaper destination dialog
    #[serde(default = "default_wallpaper_message")]
    pub wallpaper_message: String,
    /// Prefix of generated custom theme ids
    #[serde(default = "default_custom_id_prefix")]
    pub custom_id_prefix: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            targets: TargetPackages::default(),
            setting_key: default_setting_key(),
            default_title: default_title(),
            wallpaper_timeout_ms: default_wallpaper_timeout_ms(),
            wallpaper_message: default_wallpaper_message(),
            custom_id_prefix: default_custom_id_prefix(),
        }
    }
}

impl ThemeConfig {
    pub fn wallpaper_timeout(&self) -> Duration {
        Duration::from_millis(self.wallpaper_timeout_ms)
    }

    /// Parse a standalone `[theme]` table
    pub fn from_toml_str(src: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(src)
    }
}
