//! Project creation and scaffolding

use anyhow::Result;
use std::fs;
use std::path::Path;
use tint_platform::OverlayInfo;
use tint_theme::{Category, TargetPackages};

use crate::config::TintConfig;
use crate::device::DeviceState;

/// Create a Tint project with a sample catalog and device
pub fn create_project(path: &Path, force: bool) -> Result<()> {
    let config_path = path.join("tint.toml");
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::create_dir_all(path)?;

    let config = TintConfig::default();
    fs::write(&config_path, config.to_toml()?)?;
    fs::write(config.resources_path(path), SAMPLE_RESOURCES)?;
    sample_device(&config.theme.targets).save(&config.device_path(path))?;

    tracing::info!("Created Tint project in {}", path.display());
    Ok(())
}

/// Every overlay named by the sample catalog, installed and disabled
fn sample_device(targets: &TargetPackages) -> DeviceState {
    let overlays = [
        (Category::Color, "com.example.theme.color.ocean"),
        (Category::Color, "com.example.theme.color.forest"),
        (Category::Font, "com.example.theme.font.serif"),
        (Category::Shape, "com.example.theme.shape.squircle"),
        (Category::IconAndroid, "com.example.theme.icon.android.rounded"),
        (Category::IconSysUi, "com.example.theme.icon.sysui.rounded"),
        (Category::IconSettings, "com.example.theme.icon.settings.rounded"),
        (Category::IconLauncher, "com.example.theme.icon.launcher.rounded"),
    ]
    .into_iter()
    .map(|(category, package)| {
        OverlayInfo::new(
            package,
            targets.for_category(category),
            category.overlay_category(),
        )
    })
    .collect();

    DeviceState {
        overlays,
        ..DeviceState::default()
    }
}

const SAMPLE_RESOURCES: &str = r##"# Tint resource catalog
#
# [stub]      theme catalog: `themes` list plus per-theme keys
# [system]    platform resources used when a theme leaves a category out
# [packages]  resources of each installed overlay package

stub_package = "com.example.themes"

[stub.string_arrays]
themes = ["default", "ocean", "forest"]

[stub.strings]
theme_title_default = "Default"

theme_title_ocean = "Ocean"
theme_overlay_color_ocean = "com.example.theme.color.ocean"
theme_overlay_font_ocean = "com.example.theme.font.serif"

theme_title_forest = "Forest"
theme_overlay_color_forest = "com.example.theme.color.forest"
theme_overlay_shape_forest = "com.example.theme.shape.squircle"
theme_overlay_icon_android_forest = "com.example.theme.icon.android.rounded"
theme_overlay_icon_sysui_forest = "com.example.theme.icon.sysui.rounded"
theme_overlay_icon_settings_forest = "com.example.theme.icon.settings.rounded"
theme_overlay_icon_launcher_forest = "com.example.theme.icon.launcher.rounded"
theme_wallpaper_title_forest = "Redwoods"

[stub.drawables]
theme_preview_color_ocean = "previews/ocean.png"
theme_wallpaper_forest = "wallpapers/forest.jpg"

[system.strings]
config_headlineFontFamily = "google-sans"
config_bodyFontFamily = "roboto"
config_icon_mask = "M50,0 A50,50 0 1,0 50,100 A50,50 0 1,0 50,0 Z"

[system.colors]
accent_device_default_light = "#1A73E8"
accent_device_default_dark = "#8AB4F8"

[system.drawables]
ic_wifi_signal_3 = "system/ic_wifi_signal_3.png"

[packages."com.android.systemui".drawables]
ic_qs_bluetooth_on = "sysui/ic_qs_bluetooth_on.png"
ic_dnd = "sysui/ic_dnd.png"
ic_signal_flashlight = "sysui/ic_signal_flashlight.png"
ic_qs_auto_rotate = "sysui/ic_qs_auto_rotate.png"
ic_signal_airplane = "sysui/ic_signal_airplane.png"

[packages."com.example.theme.color.ocean".colors]
accent_device_default_light = "#0061A4"
accent_device_default_dark = "#9ECAFF"

[packages."com.example.theme.color.forest".colors]
accent_device_default_light = "#386A20"
accent_device_default_dark = "#9CD67D"

[packages."com.example.theme.font.serif".strings]
config_headlineFontFamily = "noto-serif"
config_bodyFontFamily = "noto-serif"

[packages."com.example.theme.shape.squircle".strings]
config_icon_mask = "M50,0 C10,0 0,10 0,50 0,90 10,100 50,100 90,100 100,90 100,50 100,10 90,0 50,0 Z"

[packages."com.example.theme.icon.android.rounded".drawables]
ic_wifi_signal_3 = "rounded/ic_wifi_signal_3.png"

[packages."com.example.theme.icon.sysui.rounded".drawables]
ic_qs_bluetooth_on = "rounded/ic_qs_bluetooth_on.png"
ic_dnd = "rounded/ic_dnd.png"
ic_signal_flashlight = "rounded/ic_signal_flashlight.png"
ic_qs_auto_rotate = "rounded/ic_qs_auto_rotate.png"
ic_signal_airplane = "rounded/ic_signal_airplane.png"

[packages."com.example.theme.icon.settings.rounded"]

[packages."com.example.theme.icon.launcher.rounded"]
"##;
