//! Theme bundles
//!
//! A [`ThemeBundle`] is one selectable theme: the overlay package chosen per
//! category plus the denormalized preview payload the picker renders. Bundles
//! are assembled by [`ThemeBundleBuilder`] and never mutated afterwards.

use thiserror::Error;
use tint_platform::{Color, Drawable, WallpaperInfo};

use crate::category::Category;
use crate::packages::OverlayPackages;
use crate::selection::{self, SelectionError};

/// A font family handle (regular weight)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle {
    family: String,
}

impl FontHandle {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }
}

/// Preview payload of a bundle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThemePreview {
    pub accent_light: Option<Color>,
    pub accent_dark: Option<Color>,
    pub headline_font: Option<FontHandle>,
    pub body_font: Option<FontHandle>,
    /// Icon mask path (SVG path data)
    pub shape_path: Option<String>,
    pub color_preview: Option<Drawable>,
    pub shape_preview: Option<Drawable>,
    /// Preview icons in display order
    pub icons: Vec<Drawable>,
    pub wallpaper: Option<WallpaperInfo>,
}

impl ThemePreview {
    /// Accent color for the given night mode
    pub fn accent(&self, night: bool) -> Option<Color> {
        if night {
            self.accent_dark
        } else {
            self.accent_light
        }
    }
}

/// Builder contract violations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("theme bundle has no title")]
    MissingTitle,

    #[error("{category} overlay `{package}` is missing preview field `{field}`")]
    MissingPreview {
        category: Category,
        package: String,
        field: &'static str,
    },
}

/// One selectable theme
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeBundle {
    title: String,
    overlay_packages: OverlayPackages,
    is_default: bool,
    custom_id: Option<String>,
    use_theme_wallpaper: bool,
    preview: ThemePreview,
}

impl ThemeBundle {
    pub fn builder() -> ThemeBundleBuilder {
        ThemeBundleBuilder::new()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn overlay_packages(&self) -> &OverlayPackages {
        &self.overlay_packages
    }

    /// The catalog's "no customization" entry
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Id of a user-authored composition
    pub fn custom_id(&self) -> Option<&str> {
        self.custom_id.as_deref()
    }

    pub fn is_custom(&self) -> bool {
        self.custom_id.is_some()
    }

    pub fn preview(&self) -> &ThemePreview {
        &self.preview
    }

    pub fn wallpaper(&self) -> Option<&WallpaperInfo> {
        self.preview.wallpaper.as_ref()
    }

    /// Applying this bundle also sets its wallpaper
    pub fn should_use_theme_wallpaper(&self) -> bool {
        self.use_theme_wallpaper && self.preview.wallpaper.is_some()
    }

    /// Copy of this bundle with the wallpaper flag overridden
    pub fn with_theme_wallpaper(mut self, use_wallpaper: bool) -> Self {
        self.use_theme_wallpaper = use_wallpaper;
        self
    }

    /// Same (category, package) pairs as `other`
    pub fn equivalent_to(&self, other: &OverlayPackages) -> bool {
        self.overlay_packages == *other
    }

    /// Selection string persisted when this bundle is applied
    pub fn serialized_packages(&self) -> Result<String, SelectionError> {
        selection::serialize(&self.overlay_packages)
    }
}

/// Mutable accumulator for one [`ThemeBundle`]
#[derive(Clone, Debug)]
pub struct ThemeBundleBuilder {
    title: Option<String>,
    overlay_packages: OverlayPackages,
    is_default: bool,
    custom_id: Option<String>,
    use_theme_wallpaper: bool,
    preview: ThemePreview,
}

impl Default for ThemeBundleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeBundleBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            overlay_packages: OverlayPackages::new(),
            is_default: false,
            custom_id: None,
            use_theme_wallpaper: true,
            preview: ThemePreview::default(),
        }
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Record the overlay package for `category`
    ///
    /// A category is set at most once per load path; a second call is logged
    /// as a configuration error and the last write wins.
    pub fn add_overlay_package(&mut self, category: Category, package: impl Into<String>) -> &mut Self {
        let package = package.into();
        if let Some(previous) = self.overlay_packages.insert(category, package.clone()) {
            tracing::warn!(
                "{category} overlay set twice for theme {:?}: `{previous}` replaced by `{package}`",
                self.title.as_deref().unwrap_or("<untitled>")
            );
        }
        self
    }

    pub fn has_overlay_package(&self, category: Category) -> bool {
        self.overlay_packages.contains(category)
    }

    /// Mark as the catalog default
    pub fn as_default(&mut self) -> &mut Self {
        self.is_default = true;
        self
    }

    /// Mark as a user-authored composition
    pub fn as_custom(&mut self, id: impl Into<String>) -> &mut Self {
        self.custom_id = Some(id.into());
        self
    }

    pub fn accent_colors(&mut self, light: Color, dark: Color) -> &mut Self {
        self.preview.accent_light = Some(light);
        self.preview.accent_dark = Some(dark);
        self
    }

    pub fn color_accent_light(&mut self, color: Color) -> &mut Self {
        self.preview.accent_light = Some(color);
        self
    }

    pub fn color_accent_dark(&mut self, color: Color) -> &mut Self {
        self.preview.accent_dark = Some(color);
        self
    }

    pub fn color_preview(&mut self, drawable: Option<Drawable>) -> &mut Self {
        self.preview.color_preview = drawable;
        self
    }

    pub fn headline_font(&mut self, font: FontHandle) -> &mut Self {
        self.preview.headline_font = Some(font);
        self
    }

    pub fn body_font(&mut self, font: FontHandle) -> &mut Self {
        self.preview.body_font = Some(font);
        self
    }

    pub fn shape_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.preview.shape_path = Some(path.into());
        self
    }

    pub fn shape_preview(&mut self, drawable: Option<Drawable>) -> &mut Self {
        self.preview.shape_preview = drawable;
        self
    }

    pub fn add_icon(&mut self, icon: Drawable) -> &mut Self {
        self.preview.icons.push(icon);
        self
    }

    pub fn wallpaper(&mut self, wallpaper: WallpaperInfo) -> &mut Self {
        self.preview.wallpaper = Some(wallpaper);
        self
    }

    /// Whether applying should also set the bundled wallpaper (default: true)
    pub fn use_theme_wallpaper(&mut self, use_wallpaper: bool) -> &mut Self {
        self.use_theme_wallpaper = use_wallpaper;
        self
    }

    /// Freeze into an immutable bundle
    pub fn build(self) -> Result<ThemeBundle, BundleError> {
        let title = self.title.ok_or(BundleError::MissingTitle)?;

        let preview = &self.preview;
        for (category, package) in self.overlay_packages.iter() {
            let missing = match category {
                Category::Color if preview.accent_light.is_none() => Some("accent_light"),
                Category::Color if preview.accent_dark.is_none() => Some("accent_dark"),
                Category::Font if preview.headline_font.is_none() => Some("headline_font"),
                Category::Font if preview.body_font.is_none() => Some("body_font"),
                Category::Shape if preview.shape_path.is_none() => Some("shape_path"),
                _ => None,
            };
            if let Some(field) = missing {
                return Err(BundleError::MissingPreview {
                    category,
                    package: package.to_string(),
                    field,
                });
            }
        }

        Ok(ThemeBundle {
            title,
            overlay_packages: self.overlay_packages,
            is_default: self.is_default,
            custom_id: self.custom_id,
            use_theme_wallpaper: self.use_theme_wallpaper,
            preview: self.preview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawable(name: &str) -> Drawable {
        Drawable {
            namespace: "stub".into(),
            name: name.into(),
            source: format!("{name}.png"),
        }
    }

    fn ocean() -> ThemeBundle {
        let mut builder = ThemeBundle::builder();
        builder
            .title("Ocean")
            .add_overlay_package(Category::Color, "pkg.color.ocean")
            .accent_colors(Color::from_hex(0x0061A4), Color::from_hex(0x9ECAFF))
            .add_overlay_package(Category::Font, "pkg.font.ocean")
            .headline_font(FontHandle::new("google-sans"))
            .body_font(FontHandle::new("roboto"));
        builder.build().unwrap()
    }

    #[test]
    fn builds_frozen_bundle() {
        let bundle = ocean();
        assert_eq!(bundle.title(), "Ocean");
        assert_eq!(bundle.overlay_packages().len(), 2);
        assert!(!bundle.is_default());
        assert!(!bundle.is_custom());
        assert_eq!(bundle.preview().accent(true), Some(Color::from_hex(0x9ECAFF)));
    }

    #[test]
    fn equivalence_is_set_equality() {
        let bundle = ocean();
        assert!(bundle.equivalent_to(bundle.overlay_packages()));

        let reordered: OverlayPackages = [
            (Category::Font, "pkg.font.ocean"),
            (Category::Color, "pkg.color.ocean"),
        ]
        .into();
        assert!(bundle.equivalent_to(&reordered));

        let disjoint: OverlayPackages = [(Category::Color, "pkg.color.forest")].into();
        assert!(!bundle.equivalent_to(&disjoint));
        assert!(!bundle.equivalent_to(&OverlayPackages::new()));
    }

    #[test]
    fn color_without_accents_is_rejected() {
        let mut builder = ThemeBundle::builder();
        builder
            .title("Broken")
            .add_overlay_package(Category::Color, "pkg.color.broken")
            .color_accent_light(Color::from_hex(0x111111));
        assert_eq!(
            builder.build(),
            Err(BundleError::MissingPreview {
                category: Category::Color,
                package: "pkg.color.broken".into(),
                field: "accent_dark",
            })
        );
    }

    #[test]
    fn shape_without_path_is_rejected() {
        let mut builder = ThemeBundle::builder();
        builder
            .title("Broken")
            .add_overlay_package(Category::Shape, "pkg.shape.broken");
        assert!(matches!(
            builder.build(),
            Err(BundleError::MissingPreview {
                field: "shape_path",
                ..
            })
        ));
    }

    #[test]
    fn icon_packages_need_no_preview() {
        let mut builder = ThemeBundle::builder();
        builder
            .title("Icons")
            .add_overlay_package(Category::IconSettings, "pkg.icon.settings");
        assert!(builder.build().is_ok());
    }

    #[test]
    fn title_is_required() {
        assert_eq!(ThemeBundle::builder().build(), Err(BundleError::MissingTitle));
    }

    #[test]
    fn second_add_overwrites() {
        let mut builder = ThemeBundle::builder();
        builder
            .title("Twice")
            .add_overlay_package(Category::IconSysUi, "pkg.icon.a")
            .add_overlay_package(Category::IconSysUi, "pkg.icon.b");
        let bundle = builder.build().unwrap();
        assert_eq!(
            bundle.overlay_packages().get(Category::IconSysUi),
            Some("pkg.icon.b")
        );
    }

    #[test]
    fn wallpaper_flag_requires_wallpaper() {
        let mut builder = ThemeBundle::builder();
        builder.title("Plain");
        assert!(!builder.clone().build().unwrap().should_use_theme_wallpaper());

        builder.wallpaper(WallpaperInfo {
            stub_package: "stub".into(),
            resource_name: "theme_wallpaper_plain".into(),
            collection_id: "plain".into(),
            asset: drawable("theme_wallpaper_plain"),
            title: None,
            attribution: None,
            action_url: None,
        });
        assert!(builder.clone().build().unwrap().should_use_theme_wallpaper());

        builder.use_theme_wallpaper(false);
        let plain = builder.build().unwrap();
        assert!(!plain.should_use_theme_wallpaper());
        assert!(plain.with_theme_wallpaper(true).should_use_theme_wallpaper());
    }

    #[test]
    fn default_marker_is_kept() {
        let mut builder = ThemeBundle::builder();
        builder.title("Default").as_default();
        assert!(builder.build().unwrap().is_default());
    }
}
