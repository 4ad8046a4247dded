#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tint_platform::{
    MemoryOverlayService, MemorySettings, MemoryWallpaper, OverlayInfo, PlatformError,
    RecordingLogger, ResourceCatalog, WallpaperCollaborator, WallpaperDestination, WallpaperInfo,
};
use tint_theme::{Category, Collaborators, ThemeConfig, ThemeManager};
use tokio::sync::oneshot;

pub const RESOURCES: &str = r##"
stub_package = "com.android.customization.themes"

[stub.strings]
theme_title_default = "Pixel"

theme_title_ocean = "Ocean"
theme_overlay_color_ocean = "pkg.color.ocean"
theme_overlay_font_ocean = "pkg.font.ocean"

theme_title_forest = "Forest"
theme_overlay_color_forest = "pkg.color.forest"
theme_overlay_shape_forest = "pkg.shape.squircle"
theme_overlay_icon_android_forest = "pkg.icon.android.forest"
theme_overlay_icon_sysui_forest = "pkg.icon.sysui.forest"
theme_overlay_icon_settings_forest = "pkg.icon.settings.forest"
theme_overlay_icon_launcher_forest = "pkg.icon.launcher.forest"
theme_wallpaper_title_forest = "Redwoods"
theme_wallpaper_attribution_forest = "Photo by a ranger"

theme_title_broken = "Broken"
theme_overlay_color_broken = "pkg.color.uninstalled"

[stub.string_arrays]
themes = ["default", "ocean", "forest", "broken"]

[stub.drawables]
theme_preview_color_ocean = "previews/ocean_color.png"
theme_preview_shape_forest = "previews/forest_shape.png"
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

[packages."pkg.color.ocean".colors]
accent_device_default_light = "#0061A4"
accent_device_default_dark = "#9ECAFF"

[packages."pkg.font.ocean".strings]
config_headlineFontFamily = "noto-serif"
config_bodyFontFamily = "noto-sans"

[packages."pkg.color.forest".colors]
accent_device_default_light = "#386A20"
accent_device_default_dark = "#9CD67D"

[packages."pkg.shape.squircle".strings]
config_icon_mask = "M50,0 C10,0 0,10 0,50 0,90 10,100 50,100 90,100 100,90 100,50 100,10 90,0 50,0 Z"

[packages."pkg.icon.android.forest".drawables]
ic_wifi_signal_3 = "forest/ic_wifi_signal_3.png"

[packages."pkg.icon.sysui.forest".drawables]
ic_qs_bluetooth_on = "forest/ic_qs_bluetooth_on.png"
ic_dnd = "forest/ic_dnd.png"
ic_signal_flashlight = "forest/ic_signal_flashlight.png"
ic_qs_auto_rotate = "forest/ic_qs_auto_rotate.png"
ic_signal_airplane = "forest/ic_signal_airplane.png"

[packages."pkg.icon.settings.forest"]

[packages."pkg.icon.launcher.forest"]
"##;

/// Fixture resources, optionally with a different theme list
pub fn resources(themes: Option<&[&str]>) -> ResourceCatalog {
    let mut catalog = ResourceCatalog::parse(RESOURCES).unwrap();
    if let Some(themes) = themes {
        catalog
            .stub_mut()
            .insert_string_array("themes", themes.iter().copied());
    }
    catalog
}

/// Every fixture overlay installed, none enabled
pub fn installed_overlays() -> Vec<OverlayInfo> {
    let config = ThemeConfig::default();
    [
        (Category::Color, "pkg.color.ocean"),
        (Category::Color, "pkg.color.forest"),
        (Category::Font, "pkg.font.ocean"),
        (Category::Shape, "pkg.shape.squircle"),
        (Category::IconAndroid, "pkg.icon.android.forest"),
        (Category::IconSysUi, "pkg.icon.sysui.forest"),
        (Category::IconSettings, "pkg.icon.settings.forest"),
        (Category::IconLauncher, "pkg.icon.launcher.forest"),
    ]
    .into_iter()
    .map(|(category, package)| {
        OverlayInfo::new(
            package,
            config.targets.for_category(category),
            category.overlay_category(),
        )
    })
    .collect()
}

/// Wallpaper collaborator that keeps the destination request open until answered
#[derive(Default)]
pub struct PendingWallpaper {
    pending: Mutex<Option<oneshot::Sender<WallpaperDestination>>>,
}

impl PendingWallpaper {
    pub fn answer(&self, destination: WallpaperDestination) -> bool {
        match self.pending.lock().unwrap().take() {
            Some(reply) => reply.send(destination).is_ok(),
            None => false,
        }
    }
}

impl WallpaperCollaborator for PendingWallpaper {
    fn request_destination(&self, _message: &str, reply: oneshot::Sender<WallpaperDestination>) {
        *self.pending.lock().unwrap() = Some(reply);
    }

    fn set_wallpaper(
        &self,
        _wallpaper: &WallpaperInfo,
        _destination: WallpaperDestination,
        done: oneshot::Sender<Result<(), PlatformError>>,
    ) {
        let _ = done.send(Ok(()));
    }
}

/// In-memory device plus a manager over the fixture catalog
pub struct Device {
    pub overlays: Arc<MemoryOverlayService>,
    pub settings: Arc<MemorySettings>,
    pub events: Arc<RecordingLogger>,
    pub manager: ThemeManager,
}

impl Device {
    pub fn new(themes: Option<&[&str]>, wallpaper: Arc<dyn WallpaperCollaborator>) -> Self {
        Self::with_config(themes, wallpaper, ThemeConfig::default())
    }

    pub fn with_config(
        themes: Option<&[&str]>,
        wallpaper: Arc<dyn WallpaperCollaborator>,
        config: ThemeConfig,
    ) -> Self {
        let overlays = Arc::new(MemoryOverlayService::with_overlays(installed_overlays()));
        let settings = Arc::new(MemorySettings::new());
        let events = Arc::new(RecordingLogger::new());
        let manager = ThemeManager::new(
            Arc::new(resources(themes)),
            Collaborators {
                overlays: overlays.clone(),
                settings: settings.clone(),
                wallpaper,
                events: events.clone(),
            },
            config,
        );
        Self {
            overlays,
            settings,
            events,
            manager,
        }
    }

    /// Device whose wallpaper dialog answers "both screens"
    pub fn accepting() -> Self {
        Self::new(None, Arc::new(MemoryWallpaper::new(Some(WallpaperDestination::Both))))
    }
}
