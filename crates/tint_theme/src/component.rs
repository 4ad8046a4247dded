//! Component options
//!
//! Per-category choices derived from the catalog, used to compose a custom
//! theme one component at a time. Rendering is left to the caller: an option
//! only describes its thumbnail and preview card.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tint_platform::{Color, Drawable};

use crate::bundle::{BundleError, FontHandle, ThemeBundle};
use crate::category::Category;
use crate::packages::OverlayPackages;

const ICON_CATEGORIES: [Category; 4] = [
    Category::IconAndroid,
    Category::IconSysUi,
    Category::IconSettings,
    Category::IconLauncher,
];

/// Which component an option customizes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKind {
    Font,
    Icon,
    Color,
    Shape,
}

impl OptionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Font => "Font",
            Self::Icon => "Icons",
            Self::Color => "Color",
            Self::Shape => "Shape",
        }
    }

    pub fn all() -> &'static [OptionKind] {
        const KINDS: [OptionKind; 4] = [
            OptionKind::Font,
            OptionKind::Icon,
            OptionKind::Color,
            OptionKind::Shape,
        ];
        &KINDS
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontOption {
    pub title: String,
    /// `None` for the platform font
    pub package: Option<String>,
    pub headline: FontHandle,
    pub body: FontHandle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorOption {
    pub title: String,
    pub package: Option<String>,
    pub accent_light: Color,
    pub accent_dark: Color,
    pub preview: Option<Drawable>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeOption {
    pub title: String,
    pub package: Option<String>,
    /// Icon mask path
    pub path: String,
    pub preview: Option<Drawable>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconOption {
    pub title: String,
    /// Icon categories only; empty for the platform icons
    pub packages: OverlayPackages,
    pub icons: Vec<Drawable>,
}

impl IconOption {
    /// Platform icons, or a package for every icon category
    pub fn is_valid(&self) -> bool {
        // the empty option stands for the platform icons and is selectable
        self.packages.is_empty() || ICON_CATEGORIES.iter().all(|c| self.packages.contains(*c))
    }
}

/// Small render-agnostic descriptor shown in option lists
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Thumbnail {
    /// Sample glyphs set in the headline face
    Typeface(FontHandle),
    /// First preview icon
    Icon(Option<Drawable>),
    Swatch { light: Color, dark: Color },
    /// Icon mask filled with the accent color
    Shape(String),
}

/// Full-size preview card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewCard {
    pub label: &'static str,
    pub title: String,
    pub thumbnail: Thumbnail,
    pub body_font: Option<FontHandle>,
    pub assets: Vec<Drawable>,
}

/// One choice for one component
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentOption {
    Font(FontOption),
    Icon(IconOption),
    Color(ColorOption),
    Shape(ShapeOption),
}

impl ComponentOption {
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Font(_) => OptionKind::Font,
            Self::Icon(_) => OptionKind::Icon,
            Self::Color(_) => OptionKind::Color,
            Self::Shape(_) => OptionKind::Shape,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Font(option) => &option.title,
            Self::Icon(option) => &option.title,
            Self::Color(option) => &option.title,
            Self::Shape(option) => &option.title,
        }
    }

    /// Packages this option enables
    pub fn overlay_packages(&self) -> OverlayPackages {
        let single = |category: Category, package: &Option<String>| {
            package
                .iter()
                .map(|p| (category, p.as_str()))
                .collect::<OverlayPackages>()
        };
        match self {
            Self::Font(option) => single(Category::Font, &option.package),
            Self::Icon(option) => option.packages.clone(),
            Self::Color(option) => single(Category::Color, &option.package),
            Self::Shape(option) => single(Category::Shape, &option.package),
        }
    }

    /// Whether `selection` already uses this option
    pub fn is_active(&self, selection: &OverlayPackages) -> bool {
        match self {
            Self::Font(option) => selection.get(Category::Font) == option.package.as_deref(),
            Self::Color(option) => selection.get(Category::Color) == option.package.as_deref(),
            Self::Shape(option) => selection.get(Category::Shape) == option.package.as_deref(),
            // platform icons stay active while other components carry overlays
            Self::Icon(option) if option.packages.is_empty() => {
                !selection.categories().any(Category::is_icon)
            }
            Self::Icon(option) => option.packages.is_subset_of(selection),
        }
    }

    pub fn thumbnail(&self) -> Thumbnail {
        match self {
            Self::Font(option) => Thumbnail::Typeface(option.headline.clone()),
            Self::Icon(option) => Thumbnail::Icon(option.icons.first().cloned()),
            Self::Color(option) => Thumbnail::Swatch {
                light: option.accent_light,
                dark: option.accent_dark,
            },
            Self::Shape(option) => Thumbnail::Shape(option.path.clone()),
        }
    }

    pub fn preview(&self) -> PreviewCard {
        let (body_font, assets) = match self {
            Self::Font(option) => (Some(option.body.clone()), Vec::new()),
            Self::Icon(option) => (None, option.icons.clone()),
            Self::Color(option) => (None, option.preview.iter().cloned().collect()),
            Self::Shape(option) => (None, option.preview.iter().cloned().collect()),
        };
        PreviewCard {
            label: self.kind().label(),
            title: self.title().to_string(),
            thumbnail: self.thumbnail(),
            body_font,
            assets,
        }
    }
}

/// Derive component options from catalog bundles.
///
/// Options come out grouped by [`OptionKind`], in catalog order within a
/// group. The default bundle contributes the platform choice for every
/// component; other bundles contribute only the components they customize.
/// Options enabling the same packages are listed once.
pub fn options_from_catalog(bundles: &[ThemeBundle]) -> Vec<ComponentOption> {
    let mut groups: IndexMap<OptionKind, Vec<ComponentOption>> = OptionKind::all()
        .iter()
        .map(|kind| (*kind, Vec::new()))
        .collect();
    let mut seen: FxHashSet<(OptionKind, OverlayPackages)> = FxHashSet::default();

    for bundle in bundles {
        for option in bundle_options(bundle) {
            if seen.insert((option.kind(), option.overlay_packages())) {
                if let Some(group) = groups.get_mut(&option.kind()) {
                    group.push(option);
                }
            }
        }
    }

    groups.into_values().flatten().collect()
}

fn bundle_options(bundle: &ThemeBundle) -> Vec<ComponentOption> {
    let packages = bundle.overlay_packages();
    let preview = bundle.preview();
    let title = bundle.title().to_string();
    let owns = |category: Category| bundle.is_default() || packages.contains(category);
    let package = |category: Category| packages.get(category).map(str::to_string);

    let mut options = Vec::new();

    if owns(Category::Font) {
        if let (Some(headline), Some(body)) = (&preview.headline_font, &preview.body_font) {
            options.push(ComponentOption::Font(FontOption {
                title: title.clone(),
                package: package(Category::Font),
                headline: headline.clone(),
                body: body.clone(),
            }));
        }
    }

    let icon_packages: OverlayPackages = packages
        .iter()
        .filter(|(category, _)| category.is_icon())
        .collect();
    if bundle.is_default() || !icon_packages.is_empty() {
        options.push(ComponentOption::Icon(IconOption {
            title: title.clone(),
            packages: icon_packages,
            icons: preview.icons.clone(),
        }));
    }

    if owns(Category::Color) {
        if let (Some(light), Some(dark)) = (preview.accent_light, preview.accent_dark) {
            options.push(ComponentOption::Color(ColorOption {
                title: title.clone(),
                package: package(Category::Color),
                accent_light: light,
                accent_dark: dark,
                preview: preview.color_preview.clone(),
            }));
        }
    }

    if owns(Category::Shape) {
        if let Some(path) = &preview.shape_path {
            options.push(ComponentOption::Shape(ShapeOption {
                title,
                package: package(Category::Shape),
                path: path.clone(),
                preview: preview.shape_preview.clone(),
            }));
        }
    }

    options
}

/// Builds a custom theme from one option per component
#[derive(Clone, Debug)]
pub struct CustomThemeComposer {
    id: String,
    title: String,
    selected: IndexMap<OptionKind, ComponentOption>,
}

impl CustomThemeComposer {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            selected: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Choose `option` for its component, replacing any earlier choice
    pub fn select(&mut self, option: ComponentOption) -> &mut Self {
        self.selected.insert(option.kind(), option);
        self
    }

    pub fn selected(&self, kind: OptionKind) -> Option<&ComponentOption> {
        self.selected.get(&kind)
    }

    /// Packages the composed theme would enable
    pub fn overlay_packages(&self) -> OverlayPackages {
        let mut packages = OverlayPackages::new();
        for option in self.selected.values() {
            packages.merge(&option.overlay_packages());
        }
        packages
    }

    pub fn build(&self) -> Result<ThemeBundle, BundleError> {
        let mut builder = ThemeBundle::builder();
        builder.title(self.title.clone()).as_custom(self.id.clone());

        for option in self.selected.values() {
            for (category, package) in option.overlay_packages().iter() {
                builder.add_overlay_package(category, package);
            }
            match option {
                ComponentOption::Font(font) => {
                    builder
                        .headline_font(font.headline.clone())
                        .body_font(font.body.clone());
                }
                ComponentOption::Icon(icon) => {
                    for drawable in &icon.icons {
                        builder.add_icon(drawable.clone());
                    }
                }
                ComponentOption::Color(color) => {
                    builder
                        .accent_colors(color.accent_light, color.accent_dark)
                        .color_preview(color.preview.clone());
                }
                ComponentOption::Shape(shape) => {
                    builder
                        .shape_path(shape.path.clone())
                        .shape_preview(shape.preview.clone());
                }
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn drawable(name: &str) -> Drawable {
        Drawable {
            namespace: "stub".into(),
            name: name.into(),
            source: format!("{name}.png"),
        }
    }

    fn default_bundle() -> ThemeBundle {
        let mut builder = ThemeBundle::builder();
        builder
            .title("Default")
            .as_default()
            .accent_colors(Color::from_hex(0x1A73E8), Color::from_hex(0x8AB4F8))
            .headline_font(FontHandle::new("google-sans"))
            .body_font(FontHandle::new("roboto"))
            .shape_path("M0,0 H100 V100 H0 Z")
            .add_icon(drawable("ic_wifi_signal_3"));
        builder.build().unwrap()
    }

    fn ocean() -> ThemeBundle {
        let mut builder = ThemeBundle::builder();
        builder
            .title("Ocean")
            .add_overlay_package(Category::Color, "pkg.color.ocean")
            .accent_colors(Color::from_hex(0x0061A4), Color::from_hex(0x9ECAFF))
            .add_overlay_package(Category::Font, "pkg.font.ocean")
            .headline_font(FontHandle::new("serif"))
            .body_font(FontHandle::new("serif"))
            .shape_path("M0,0 H100 V100 H0 Z");
        builder.build().unwrap()
    }

    fn icons() -> ThemeBundle {
        let mut builder = ThemeBundle::builder();
        builder.title("Rounded");
        for category in ICON_CATEGORIES {
            builder.add_overlay_package(category, format!("pkg.icon.{category:?}"));
        }
        builder.add_icon(drawable("rounded_wifi"));
        builder.build().unwrap()
    }

    #[test]
    fn derives_grouped_deduplicated_options() {
        let options = options_from_catalog(&[default_bundle(), ocean(), icons(), ocean()]);
        let kinds: Vec<_> = options.iter().map(|o| (o.kind(), o.title())).collect();
        assert_eq!(
            kinds,
            vec![
                (OptionKind::Font, "Default"),
                (OptionKind::Font, "Ocean"),
                (OptionKind::Icon, "Default"),
                (OptionKind::Icon, "Rounded"),
                (OptionKind::Color, "Default"),
                (OptionKind::Color, "Ocean"),
                (OptionKind::Shape, "Default"),
            ]
        );
    }

    #[test]
    fn single_category_options_match_their_entry() {
        let options = options_from_catalog(&[default_bundle(), ocean()]);
        let selection: OverlayPackages = [(Category::Color, "pkg.color.ocean")].into();

        let active: Vec<_> = options
            .iter()
            .filter(|o| o.is_active(&selection))
            .map(|o| (o.kind(), o.title()))
            .collect();
        assert_eq!(
            active,
            vec![
                (OptionKind::Font, "Default"),
                (OptionKind::Icon, "Default"),
                (OptionKind::Color, "Ocean"),
                (OptionKind::Shape, "Default"),
            ]
        );
    }

    #[test]
    fn icon_option_activity_and_validity() {
        let options = options_from_catalog(&[default_bundle(), icons()]);
        let platform = options
            .iter()
            .find(|o| o.title() == "Default" && o.kind() == OptionKind::Icon)
            .unwrap();
        let rounded = options.iter().find(|o| o.title() == "Rounded").unwrap();

        let selection = rounded.overlay_packages();
        assert!(rounded.is_active(&selection));
        assert!(!platform.is_active(&selection));
        assert!(platform.is_active(&[(Category::Font, "pkg.font.ocean")].into()));

        let ComponentOption::Icon(icon) = rounded else {
            panic!("expected icon option");
        };
        assert!(icon.is_valid());
        let mut partial = icon.clone();
        partial.packages.remove(Category::IconLauncher);
        assert!(!partial.is_valid());
    }

    #[test]
    fn composes_custom_bundle() {
        let options = options_from_catalog(&[default_bundle(), ocean(), icons()]);
        let pick = |kind: OptionKind, title: &str| {
            options
                .iter()
                .find(|o| o.kind() == kind && o.title() == title)
                .cloned()
                .unwrap()
        };

        let mut composer = CustomThemeComposer::new("custom_1", "Mine");
        composer
            .select(pick(OptionKind::Font, "Default"))
            .select(pick(OptionKind::Color, "Ocean"))
            .select(pick(OptionKind::Icon, "Rounded"))
            .select(pick(OptionKind::Shape, "Default"));

        let bundle = composer.build().unwrap();
        assert_eq!(bundle.custom_id(), Some("custom_1"));
        assert_eq!(bundle.overlay_packages().len(), 5);
        assert_eq!(bundle.overlay_packages(), &composer.overlay_packages());
        assert_eq!(bundle.preview().headline_font, Some(FontHandle::new("google-sans")));
        assert_eq!(bundle.preview().accent(false), Some(Color::from_hex(0x0061A4)));
        assert_eq!(bundle.preview().icons, vec![drawable("rounded_wifi")]);
    }

    #[test]
    fn preview_card_describes_option() {
        let options = options_from_catalog(&[ocean()]);
        let card = options[0].preview();
        assert_eq!(card.label, "Font");
        assert_eq!(card.title, "Ocean");
        assert_eq!(card.thumbnail, Thumbnail::Typeface(FontHandle::new("serif")));
        assert_eq!(card.body_font, Some(FontHandle::new("serif")));
    }
}
