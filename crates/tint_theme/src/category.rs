//! Category registry
//!
//! The fixed set of customization categories and the target package each one
//! overlays. Everything else looks the association up here.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A customization category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Accent color
    Color,
    /// Headline/body font family
    Font,
    /// Adaptive icon shape
    Shape,
    /// Icon pack for the framework
    IconAndroid,
    /// Icon pack for the status bar
    IconSysUi,
    /// Icon pack for the settings app
    IconSettings,
    /// Icon pack for the launcher
    IconLauncher,
}

/// One of the subsystems that receive overlays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Framework,
    SystemUi,
    Settings,
    Launcher,
}

impl Category {
    /// Registry order; also the order of a full reconciliation
    pub const ALL: [Category; 7] = [
        Category::Color,
        Category::Font,
        Category::Shape,
        Category::IconAndroid,
        Category::IconSysUi,
        Category::IconSettings,
        Category::IconLauncher,
    ];

    /// Full category list.
    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    /// Target package this category overlays
    pub fn target(self) -> Target {
        match self {
            Self::Color | Self::Font | Self::Shape | Self::IconAndroid => Target::Framework,
            Self::IconSysUi => Target::SystemUi,
            Self::IconSettings => Target::Settings,
            Self::IconLauncher => Target::Launcher,
        }
    }

    /// Overlay category as reported by the overlay service and stored in settings
    pub fn overlay_category(self) -> &'static str {
        match self {
            Self::Color => "android.theme.customization.accent_color",
            Self::Font => "android.theme.customization.font",
            Self::Shape => "android.theme.customization.adaptive_icon_shape",
            Self::IconAndroid => "android.theme.customization.icon_pack.android",
            Self::IconSysUi => "android.theme.customization.icon_pack.systemui",
            Self::IconSettings => "android.theme.customization.icon_pack.settings",
            Self::IconLauncher => "android.theme.customization.icon_pack.launcher",
        }
    }

    /// Catalog key prefix naming this category's overlay for a theme
    pub fn catalog_prefix(self) -> &'static str {
        match self {
            Self::Color => "theme_overlay_color_",
            Self::Font => "theme_overlay_font_",
            Self::Shape => "theme_overlay_shape_",
            Self::IconAndroid => "theme_overlay_icon_android_",
            Self::IconSysUi => "theme_overlay_icon_sysui_",
            Self::IconSettings => "theme_overlay_icon_settings_",
            Self::IconLauncher => "theme_overlay_icon_launcher_",
        }
    }

    /// Look a category up by its overlay category wire name
    pub fn from_overlay_category(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.overlay_category() == name)
    }

    pub fn is_icon(self) -> bool {
        matches!(
            self,
            Self::IconAndroid | Self::IconSysUi | Self::IconSettings | Self::IconLauncher
        )
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Font => "Font",
            Self::Shape => "Shape",
            Self::IconAndroid => "Icons (framework)",
            Self::IconSysUi => "Icons (status bar)",
            Self::IconSettings => "Icons (settings)",
            Self::IconLauncher => "Icons (launcher)",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

fn default_framework() -> String {
    "android".to_string()
}

fn default_system_ui() -> String {
    "com.android.systemui".to_string()
}

fn default_settings() -> String {
    "com.android.settings".to_string()
}

fn default_launcher() -> String {
    "com.android.launcher3".to_string()
}

/// Concrete package ids of the four targets
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetPackages {
    #[serde(default = "default_framework")]
    pub framework: String,
    #[serde(default = "default_system_ui")]
    pub system_ui: String,
    #[serde(default = "default_settings")]
    pub settings: String,
    /// Launcher package (device-specific)
    #[serde(default = "default_launcher")]
    pub launcher: String,
}

impl Default for TargetPackages {
    fn default() -> Self {
        Self {
            framework: default_framework(),
            system_ui: default_system_ui(),
            settings: default_settings(),
            launcher: default_launcher(),
        }
    }
}

impl TargetPackages {
    pub fn package(&self, target: Target) -> &str {
        match target {
            Target::Framework => &self.framework,
            Target::SystemUi => &self.system_ui,
            Target::Settings => &self.settings,
            Target::Launcher => &self.launcher,
        }
    }

    /// Package overlaid by `category`
    pub fn for_category(&self, category: Category) -> &str {
        self.package(category.target())
    }

    /// All packages to overlay
    pub fn all(&self) -> [&str; 4] {
        [
            &self.framework,
            &self.system_ui,
            &self.settings,
            &self.launcher,
        ]
    }
}
