//! Catalog loader
//!
//! Builds the theme list from the stub resource namespace. Every theme name in
//! the `themes` array names its overlay per category with
//! `<category prefix><theme name>`; the preview payload for an overlay is read
//! from that overlay package's own resources.
//!
//! Missing or broken resources skip a single theme. The `default` entry is
//! never skipped: each category falls back to the platform's own resources,
//! and only a missing color or font fallback fails the whole load.

use tint_platform::{PlatformError, ResourceKind, ResourceProvider, WallpaperInfo};

use crate::bundle::{FontHandle, ThemeBundle, ThemeBundleBuilder};
use crate::category::Category;
use crate::config::ThemeConfig;
use crate::error::CatalogError;

pub(crate) const THEMES_ARRAY: &str = "themes";
const TITLE_PREFIX: &str = "theme_title_";
const PREVIEW_COLOR_PREFIX: &str = "theme_preview_color_";
const PREVIEW_SHAPE_PREFIX: &str = "theme_preview_shape_";
const WALLPAPER_PREFIX: &str = "theme_wallpaper_";
const WALLPAPER_TITLE_PREFIX: &str = "theme_wallpaper_title_";
const WALLPAPER_ATTRIBUTION_PREFIX: &str = "theme_wallpaper_attribution_";
const WALLPAPER_ACTION_PREFIX: &str = "theme_wallpaper_action_";

/// Reserved catalog entry for the "no customization" theme
pub const DEFAULT_THEME_NAME: &str = "default";

const ACCENT_COLOR_LIGHT: &str = "accent_device_default_light";
const ACCENT_COLOR_DARK: &str = "accent_device_default_dark";
const CONFIG_HEADLINE_FONT_FAMILY: &str = "config_headlineFontFamily";
const CONFIG_BODY_FONT_FAMILY: &str = "config_bodyFontFamily";
const CONFIG_ICON_MASK: &str = "config_icon_mask";
const ICON_PREVIEW_DRAWABLE: &str = "ic_wifi_signal_3";
const SYSUI_ICONS_FOR_PREVIEW: [&str; 5] = [
    "ic_qs_bluetooth_on",
    "ic_dnd",
    "ic_signal_flashlight",
    "ic_qs_auto_rotate",
    "ic_signal_airplane",
];

/// Where a theme gets a category from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The catalog names an overlay package
    Override(String),
    /// No customization; the platform's own resources apply
    PlatformDefault,
}

/// One-shot catalog reader
pub struct CatalogLoader<'a> {
    resources: &'a dyn ResourceProvider,
    config: &'a ThemeConfig,
}

impl<'a> CatalogLoader<'a> {
    pub fn new(resources: &'a dyn ResourceProvider, config: &'a ThemeConfig) -> Self {
        Self { resources, config }
    }

    /// Whether the stub namespace declares a theme list
    pub fn is_available(&self) -> bool {
        self.resources
            .stub()
            .contains(THEMES_ARRAY, ResourceKind::StringArray)
    }

    /// Theme names in catalog order, including the reserved `default` entry
    pub fn theme_names(&self) -> Vec<String> {
        match self.resources.stub().string_array(THEMES_ARRAY) {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!("theme catalog has no theme list, only the default theme is available: {err}");
                Vec::new()
            }
        }
    }

    /// Overlay package the catalog names for `category` in `theme_name`
    pub fn resolve(&self, category: Category, theme_name: &str) -> Resolution {
        let key = format!("{}{theme_name}", category.catalog_prefix());
        match self.resources.stub().optional_string(&key) {
            Some(package) if !package.trim().is_empty() => {
                Resolution::Override(package.trim().to_string())
            }
            _ => Resolution::PlatformDefault,
        }
    }

    /// Default bundle first, then catalog themes in declared order
    pub fn load(&self) -> Result<Vec<ThemeBundle>, CatalogError> {
        let mut themes = vec![self.load_default()?];

        for name in self.theme_names() {
            // Default theme needs special treatment (see load_default)
            if name == DEFAULT_THEME_NAME {
                continue;
            }
            match self.load_theme(&name) {
                Ok(bundle) => themes.push(bundle),
                Err(err) => {
                    tracing::warn!("Couldn't load part of theme {name}, will skip it: {err}");
                }
            }
        }

        tracing::debug!("CatalogLoader::load - {} themes", themes.len());
        Ok(themes)
    }

    fn load_theme(&self, name: &str) -> Result<ThemeBundle, CatalogError> {
        let mut builder = ThemeBundle::builder();
        builder.title(self.resources.stub().string(&format!("{TITLE_PREFIX}{name}"))?);

        for category in Category::ALL {
            match self.resolve(category, name) {
                Resolution::Override(package) => {
                    self.load_overlay(&mut builder, category, &package, name)?
                }
                Resolution::PlatformDefault => {
                    self.load_platform(&mut builder, category, name, false)?
                }
            }
        }

        self.load_wallpaper(&mut builder, name);
        Ok(builder.build()?)
    }

    fn load_default(&self) -> Result<ThemeBundle, CatalogError> {
        let name = DEFAULT_THEME_NAME;
        let stub = self.resources.stub();

        let mut builder = ThemeBundle::builder();
        builder.as_default();
        match stub.optional_string(&format!("{TITLE_PREFIX}{name}")) {
            Some(title) => builder.title(title),
            None => builder.title(self.config.default_title.clone()),
        };

        for category in Category::ALL {
            if let Resolution::Override(package) = self.resolve(category, name) {
                match self.load_overlay(&mut builder, category, &package, name) {
                    Ok(()) => continue,
                    Err(err) if err.is_lookup_failure() => tracing::debug!(
                        "Didn't find {category} overlay for default theme, will use system default: {err}"
                    ),
                    Err(err) => return Err(err.into()),
                }
            }

            if let Err(err) = self.load_platform(&mut builder, category, name, true) {
                if matches!(category, Category::Color | Category::Font) {
                    return Err(CatalogError::DefaultTheme {
                        category,
                        source: err,
                    });
                }
                tracing::warn!("Didn't find system {category} resources, default preview will omit them: {err}");
            }
        }

        self.load_wallpaper(&mut builder, name);
        Ok(builder.build()?)
    }

    /// Record `package` for `category` and load its preview from the package itself.
    /// Nothing is recorded unless every lookup succeeds.
    fn load_overlay(
        &self,
        builder: &mut ThemeBundleBuilder,
        category: Category,
        package: &str,
        theme_name: &str,
    ) -> Result<(), PlatformError> {
        let res = self.resources.package(package)?;
        let stub = self.resources.stub();

        match category {
            Category::Color => {
                let light = res.color(ACCENT_COLOR_LIGHT)?;
                let dark = res.color(ACCENT_COLOR_DARK)?;
                builder
                    .add_overlay_package(category, package)
                    .accent_colors(light, dark)
                    .color_preview(stub.optional_drawable(&format!("{PREVIEW_COLOR_PREFIX}{theme_name}")));
            }
            Category::Font => {
                let headline = res.string(CONFIG_HEADLINE_FONT_FAMILY)?;
                let body = res.string(CONFIG_BODY_FONT_FAMILY)?;
                builder
                    .add_overlay_package(category, package)
                    .headline_font(FontHandle::new(headline))
                    .body_font(FontHandle::new(body));
            }
            Category::Shape => {
                let path = res.string(CONFIG_ICON_MASK)?;
                builder
                    .add_overlay_package(category, package)
                    .shape_path(path)
                    .shape_preview(stub.optional_drawable(&format!("{PREVIEW_SHAPE_PREFIX}{theme_name}")));
            }
            Category::IconAndroid => {
                let icon = res.drawable(ICON_PREVIEW_DRAWABLE)?;
                builder.add_overlay_package(category, package).add_icon(icon);
            }
            Category::IconSysUi => {
                let icons = SYSUI_ICONS_FOR_PREVIEW
                    .iter()
                    .map(|name| res.drawable(name))
                    .collect::<Result<Vec<_>, _>>()?;
                builder.add_overlay_package(category, package);
                for icon in icons {
                    builder.add_icon(icon);
                }
            }
            Category::IconSettings | Category::IconLauncher => {
                builder.add_overlay_package(category, package);
            }
        }
        Ok(())
    }

    /// Fill the preview for a category the theme does not customize.
    ///
    /// Catalog themes only need the shape and framework icon so every card
    /// renders; the default theme takes every category from the platform.
    fn load_platform(
        &self,
        builder: &mut ThemeBundleBuilder,
        category: Category,
        theme_name: &str,
        is_default: bool,
    ) -> Result<(), PlatformError> {
        let system = self.resources.system();
        let stub = self.resources.stub();

        match category {
            Category::Color if is_default => {
                let light = system.color(ACCENT_COLOR_LIGHT)?;
                let dark = system.color(ACCENT_COLOR_DARK)?;
                builder
                    .accent_colors(light, dark)
                    .color_preview(stub.optional_drawable(&format!("{PREVIEW_COLOR_PREFIX}{theme_name}")));
            }
            Category::Font if is_default => {
                let headline = system.string(CONFIG_HEADLINE_FONT_FAMILY)?;
                let body = system.string(CONFIG_BODY_FONT_FAMILY)?;
                builder
                    .headline_font(FontHandle::new(headline))
                    .body_font(FontHandle::new(body));
            }
            Category::Shape => {
                builder.shape_path(system.string(CONFIG_ICON_MASK)?);
                if is_default {
                    builder.shape_preview(stub.optional_drawable(&format!("{PREVIEW_SHAPE_PREFIX}{theme_name}")));
                }
            }
            Category::IconAndroid => {
                builder.add_icon(system.drawable(ICON_PREVIEW_DRAWABLE)?);
            }
            Category::IconSysUi if is_default => {
                let sysui = self.resources.package(&self.config.targets.system_ui)?;
                let icons = SYSUI_ICONS_FOR_PREVIEW
                    .iter()
                    .map(|name| sysui.drawable(name))
                    .collect::<Result<Vec<_>, _>>()?;
                for icon in icons {
                    builder.add_icon(icon);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn load_wallpaper(&self, builder: &mut ThemeBundleBuilder, theme_name: &str) {
        let stub = self.resources.stub();
        let resource_name = format!("{WALLPAPER_PREFIX}{theme_name}");
        // No wallpaper is fine; the theme just doesn't carry one
        let Some(asset) = stub.optional_drawable(&resource_name) else {
            return;
        };

        builder.wallpaper(WallpaperInfo {
            stub_package: stub.namespace().to_string(),
            resource_name,
            collection_id: theme_name.to_string(),
            asset,
            title: stub.optional_string(&format!("{WALLPAPER_TITLE_PREFIX}{theme_name}")),
            attribution: stub.optional_string(&format!("{WALLPAPER_ATTRIBUTION_PREFIX}{theme_name}")),
            action_url: stub.optional_string(&format!("{WALLPAPER_ACTION_PREFIX}{theme_name}")),
        });
    }
}
