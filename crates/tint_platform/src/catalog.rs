//! Declarative resource catalog
//!
//! A TOML file standing in for the stub package, the platform namespace, and
//! the installed overlay packages:
//!
//! ```toml
//! stub_package = "com.android.customization.themes"
//!
//! [stub.strings]
//! theme_title_ocean = "Ocean"
//! theme_overlay_color_ocean = "pkg.color.ocean"
//!
//! [stub.string_arrays]
//! themes = ["default", "ocean"]
//!
//! [packages."pkg.color.ocean".colors]
//! accent_device_default_light = "#0061A4"
//! accent_device_default_dark = "#9ECAFF"
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::resources::{missing, Color, Drawable, ResourceKind, ResourceProvider, ResourceSpace};
use crate::{PlatformError, Result};

const MAX_TABLE_ENTRIES: usize = 10_000;
const MAX_KEY_BYTES: usize = 128;

/// Namespace used for the platform's own resources
pub const SYSTEM_PACKAGE: &str = "android";

fn is_valid_key(key: &str) -> bool {
    let mut it = key.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
}

fn default_system_package() -> String {
    SYSTEM_PACKAGE.to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDef {
    #[serde(default)]
    strings: IndexMap<String, String>,
    #[serde(default)]
    string_arrays: IndexMap<String, Vec<String>>,
    #[serde(default)]
    colors: IndexMap<String, String>,
    #[serde(default)]
    drawables: IndexMap<String, String>,
}

impl TableDef {
    fn len(&self) -> usize {
        self.strings.len() + self.string_arrays.len() + self.colors.len() + self.drawables.len()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDef {
    stub_package: String,
    #[serde(default = "default_system_package")]
    system_package: String,
    #[serde(default)]
    stub: TableDef,
    #[serde(default)]
    system: TableDef,
    #[serde(default)]
    packages: IndexMap<String, TableDef>,
}

/// Resources of one namespace, kept in declaration order
#[derive(Clone, Debug, Default)]
pub struct NamespaceResources {
    namespace: String,
    strings: IndexMap<String, String>,
    string_arrays: IndexMap<String, Vec<String>>,
    colors: IndexMap<String, Color>,
    drawables: IndexMap<String, String>,
}

impl NamespaceResources {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    fn from_def(namespace: &str, def: TableDef) -> Result<Self> {
        if def.len() > MAX_TABLE_ENTRIES {
            return Err(PlatformError::CatalogParse(format!(
                "`{namespace}` has too many entries (max {MAX_TABLE_ENTRIES})"
            )));
        }

        let names = def
            .strings
            .keys()
            .chain(def.string_arrays.keys())
            .chain(def.colors.keys())
            .chain(def.drawables.keys());
        for name in names {
            if !is_valid_key(name) || name.len() > MAX_KEY_BYTES {
                return Err(PlatformError::CatalogParse(format!(
                    "invalid resource name `{name}` in `{namespace}` (allowed: [A-Za-z0-9][A-Za-z0-9_.-]*, max {MAX_KEY_BYTES} bytes)"
                )));
            }
        }

        let mut colors = IndexMap::with_capacity(def.colors.len());
        for (name, raw) in def.colors {
            let Some(color) = Color::parse(&raw) else {
                return Err(PlatformError::CatalogParse(format!(
                    "color `{name}` in `{namespace}` must be #RRGGBB or #AARRGGBB, got `{raw}`"
                )));
            };
            colors.insert(name, color);
        }

        Ok(Self {
            namespace: namespace.to_string(),
            strings: def.strings,
            string_arrays: def.string_arrays,
            colors,
            drawables: def.drawables,
        })
    }

    pub fn insert_string(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.strings.insert(name.into(), value.into());
        self
    }

    pub fn insert_string_array<I, S>(&mut self, name: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.string_arrays
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn insert_color(&mut self, name: impl Into<String>, color: Color) -> &mut Self {
        self.colors.insert(name.into(), color);
        self
    }

    pub fn insert_drawable(&mut self, name: impl Into<String>, source: impl Into<String>) -> &mut Self {
        self.drawables.insert(name.into(), source.into());
        self
    }

    /// Remove a resource of any kind
    pub fn remove(&mut self, name: &str) -> bool {
        self.strings.shift_remove(name).is_some()
            | self.string_arrays.shift_remove(name).is_some()
            | self.colors.shift_remove(name).is_some()
            | self.drawables.shift_remove(name).is_some()
    }
}

impl ResourceSpace for NamespaceResources {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn string(&self, name: &str) -> Result<String> {
        self.strings
            .get(name)
            .cloned()
            .ok_or_else(|| missing(&self.namespace, ResourceKind::String, name))
    }

    fn string_array(&self, name: &str) -> Result<Vec<String>> {
        self.string_arrays
            .get(name)
            .cloned()
            .ok_or_else(|| missing(&self.namespace, ResourceKind::StringArray, name))
    }

    fn color(&self, name: &str) -> Result<Color> {
        self.colors
            .get(name)
            .copied()
            .ok_or_else(|| missing(&self.namespace, ResourceKind::Color, name))
    }

    fn drawable(&self, name: &str) -> Result<Drawable> {
        self.drawables
            .get(name)
            .map(|source| Drawable {
                namespace: self.namespace.clone(),
                name: name.to_string(),
                source: source.clone(),
            })
            .ok_or_else(|| missing(&self.namespace, ResourceKind::Drawable, name))
    }

    fn contains(&self, name: &str, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::String => self.strings.contains_key(name),
            ResourceKind::StringArray => self.string_arrays.contains_key(name),
            ResourceKind::Color => self.colors.contains_key(name),
            ResourceKind::Drawable => self.drawables.contains_key(name),
        }
    }
}

/// Stub, platform, and overlay package resources in one store
#[derive(Clone, Debug)]
pub struct ResourceCatalog {
    stub: NamespaceResources,
    system: NamespaceResources,
    packages: FxHashMap<String, NamespaceResources>,
}

impl ResourceCatalog {
    /// Empty catalog with the given stub namespace and the default platform namespace
    pub fn new(stub_package: impl Into<String>) -> Self {
        Self {
            stub: NamespaceResources::new(stub_package),
            system: NamespaceResources::new(SYSTEM_PACKAGE),
            packages: FxHashMap::default(),
        }
    }

    /// Parse a TOML resource catalog
    pub fn parse(src: &str) -> Result<Self> {
        let def: CatalogDef =
            toml::from_str(src).map_err(|e| PlatformError::CatalogParse(e.to_string()))?;

        let mut packages = FxHashMap::default();
        for (id, table) in def.packages {
            let resources = NamespaceResources::from_def(&id, table)?;
            packages.insert(id, resources);
        }

        let catalog = Self {
            stub: NamespaceResources::from_def(&def.stub_package, def.stub)?,
            system: NamespaceResources::from_def(&def.system_package, def.system)?,
            packages,
        };
        tracing::debug!(
            "ResourceCatalog::parse - stub={} packages={}",
            catalog.stub.namespace,
            catalog.packages.len()
        );
        Ok(catalog)
    }

    /// Read and parse a TOML resource catalog from disk
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path)
            .map_err(|e| PlatformError::Io(format!("failed to read {}: {e}", path.display())))?;
        Self::parse(&src)
    }

    pub fn stub_mut(&mut self) -> &mut NamespaceResources {
        &mut self.stub
    }

    pub fn system_mut(&mut self) -> &mut NamespaceResources {
        &mut self.system
    }

    /// Resources of `id`, installing an empty package if needed
    pub fn package_mut(&mut self, id: &str) -> &mut NamespaceResources {
        self.packages
            .entry(id.to_string())
            .or_insert_with(|| NamespaceResources::new(id))
    }

    /// Uninstall a package
    pub fn remove_package(&mut self, id: &str) -> bool {
        self.packages.remove(id).is_some()
    }
}

impl ResourceProvider for ResourceCatalog {
    fn stub(&self) -> &dyn ResourceSpace {
        &self.stub
    }

    fn system(&self) -> &dyn ResourceSpace {
        &self.system
    }

    fn package(&self, id: &str) -> Result<&dyn ResourceSpace> {
        if id == self.system.namespace {
            return Ok(&self.system);
        }
        self.packages
            .get(id)
            .map(|res| res as &dyn ResourceSpace)
            .ok_or_else(|| PlatformError::PackageNotResolvable(id.to_string()))
    }
}
