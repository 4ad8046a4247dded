mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tint_platform::{Color, MemoryWallpaper};
use tint_theme::{
    options_from_catalog, CatalogError, CatalogLoader, Category, ComponentOption, OptionKind,
    OverlayPackages, ThemeConfig,
};

use common::{resources, Device};

#[test]
fn ocean_catalog_has_default_and_ocean() {
    let resources = resources(Some(&["default", "ocean"]));
    let config = ThemeConfig::default();
    let themes = CatalogLoader::new(&resources, &config).load().unwrap();

    assert_eq!(themes.len(), 2);
    assert!(themes[0].is_default());
    assert_eq!(themes[0].title(), "Pixel");

    let ocean = &themes[1];
    assert_eq!(ocean.title(), "Ocean");
    let expected: OverlayPackages = [
        (Category::Color, "pkg.color.ocean"),
        (Category::Font, "pkg.font.ocean"),
    ]
    .into();
    assert_eq!(ocean.overlay_packages(), &expected);
    assert_eq!(ocean.preview().accent(false), Some(Color::from_hex(0x0061A4)));
    assert_eq!(
        ocean.preview().headline_font.as_ref().map(|f| f.family()),
        Some("noto-serif")
    );
    assert_eq!(
        ocean.preview().color_preview.as_ref().map(|d| d.source.as_str()),
        Some("previews/ocean_color.png")
    );
}

#[test]
fn unresolvable_color_package_skips_only_that_theme() {
    let config = ThemeConfig::default();
    let without = resources(Some(&["default", "ocean", "forest"]));
    let with = resources(None);

    let healthy = CatalogLoader::new(&without, &config).load().unwrap();
    let themes = CatalogLoader::new(&with, &config).load().unwrap();

    assert_eq!(themes.len(), healthy.len());
    assert_eq!(themes.len(), 3);
    assert!(themes.iter().all(|t| t.title() != "Broken"));

    let default = &themes[0];
    assert!(default.is_default());
    assert!(default.overlay_packages().is_empty());
    let preview = default.preview();
    assert_eq!(preview.accent(true), Some(Color::from_hex(0x8AB4F8)));
    assert_eq!(preview.body_font.as_ref().map(|f| f.family()), Some("roboto"));
    assert!(preview.shape_path.is_some());
    // framework icon plus the five status bar icons
    assert_eq!(preview.icons.len(), 6);
}

#[test]
fn forest_carries_icons_shape_and_wallpaper() {
    let resources = resources(None);
    let config = ThemeConfig::default();
    let themes = CatalogLoader::new(&resources, &config).load().unwrap();
    let forest = themes.iter().find(|t| t.title() == "Forest").unwrap();

    assert_eq!(forest.overlay_packages().len(), 6);
    assert_eq!(forest.overlay_packages().get(Category::Font), None);
    assert!(forest
        .preview()
        .icons
        .iter()
        .all(|icon| icon.source.starts_with("forest/")));
    assert_eq!(forest.preview().icons.len(), 6);
    assert!(forest.preview().shape_path.as_deref().unwrap_or_default().starts_with("M50,0 C10"));

    let wallpaper = forest.wallpaper().unwrap();
    assert_eq!(wallpaper.stub_package, "com.android.customization.themes");
    assert_eq!(wallpaper.title.as_deref(), Some("Redwoods"));
    assert_eq!(wallpaper.attribution.as_deref(), Some("Photo by a ranger"));
    assert_eq!(wallpaper.action_url, None);
    assert!(forest.should_use_theme_wallpaper());
}

#[test]
fn bundles_are_equivalent_only_to_themselves() {
    let resources = resources(None);
    let config = ThemeConfig::default();
    let themes = CatalogLoader::new(&resources, &config).load().unwrap();

    for (i, a) in themes.iter().enumerate() {
        for (j, b) in themes.iter().enumerate() {
            assert_eq!(
                a.equivalent_to(b.overlay_packages()),
                i == j,
                "{} vs {}",
                a.title(),
                b.title()
            );
        }
    }
}

#[test]
fn missing_platform_accent_fails_the_load() {
    let mut resources = resources(None);
    resources.system_mut().remove("accent_device_default_dark");
    let config = ThemeConfig::default();

    let err = CatalogLoader::new(&resources, &config).load().unwrap_err();
    assert!(matches!(
        err,
        CatalogError::DefaultTheme {
            category: Category::Color,
            ..
        }
    ));
}

#[test]
fn missing_platform_icon_only_thins_the_default_preview() {
    let mut resources = resources(Some(&["default", "ocean"]));
    resources.remove_package("com.android.systemui");
    let config = ThemeConfig::default();

    let themes = CatalogLoader::new(&resources, &config).load().unwrap();
    assert_eq!(themes.len(), 2);
    assert_eq!(themes[0].preview().icons.len(), 1);
}

#[test]
fn default_override_falls_back_when_unresolvable() {
    let mut resources = resources(Some(&["default"]));
    resources
        .stub_mut()
        .insert_string("theme_overlay_font_default", "pkg.font.uninstalled")
        .insert_string("theme_overlay_color_default", "pkg.color.forest");
    let config = ThemeConfig::default();

    let themes = CatalogLoader::new(&resources, &config).load().unwrap();
    let default = &themes[0];
    assert_eq!(
        default.overlay_packages(),
        &OverlayPackages::from([(Category::Color, "pkg.color.forest")])
    );
    assert_eq!(default.preview().accent(false), Some(Color::from_hex(0x386A20)));
    assert_eq!(
        default.preview().headline_font.as_ref().map(|f| f.family()),
        Some("google-sans")
    );
}

#[test]
fn provider_reload_picks_up_fresh_catalog() {
    let device = Device::new(
        Some(&["default", "ocean"]),
        Arc::new(MemoryWallpaper::new(None)),
    );
    assert!(device.manager.is_available());
    let first = device.manager.fetch_themes(false).unwrap();
    let again = device.manager.fetch_themes(false).unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(device.manager.fetch_themes(true).unwrap().len(), 2);
}

#[test]
fn catalog_yields_component_options() {
    let resources = resources(None);
    let config = ThemeConfig::default();
    let themes = CatalogLoader::new(&resources, &config).load().unwrap();
    let options = options_from_catalog(&themes);

    let count = |kind: OptionKind| options.iter().filter(|o| o.kind() == kind).count();
    assert_eq!(count(OptionKind::Font), 2);
    assert_eq!(count(OptionKind::Icon), 2);
    assert_eq!(count(OptionKind::Color), 3);
    assert_eq!(count(OptionKind::Shape), 2);

    let forest_icons = options
        .iter()
        .find_map(|o| match o {
            ComponentOption::Icon(icon) if icon.title == "Forest" => Some(icon),
            _ => None,
        })
        .unwrap();
    assert!(forest_icons.is_valid());
}
