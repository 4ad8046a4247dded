//! Theme provider
//!
//! Owns the loaded catalog and the user's custom compositions. A reload is
//! built off to the side and swapped in whole, so readers always see either
//! the previous or the new list.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use tint_platform::ResourceProvider;

use crate::bundle::ThemeBundle;
use crate::config::ThemeConfig;
use crate::error::CatalogError;
use crate::loader::CatalogLoader;
use crate::packages::OverlayPackages;

pub struct ThemeProvider {
    resources: Arc<dyn ResourceProvider>,
    config: ThemeConfig,
    catalog: RwLock<Option<Arc<[ThemeBundle]>>>,
    custom: RwLock<IndexMap<String, ThemeBundle>>,
}

impl ThemeProvider {
    pub fn new(resources: Arc<dyn ResourceProvider>, config: ThemeConfig) -> Self {
        Self {
            resources,
            config,
            catalog: RwLock::new(None),
            custom: RwLock::new(IndexMap::new()),
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Whether the stub namespace declares a theme list
    pub fn is_available(&self) -> bool {
        CatalogLoader::new(self.resources.as_ref(), &self.config).is_available()
    }

    /// Catalog themes followed by custom themes
    ///
    /// The catalog is loaded on first use, or again when `reload` is set.
    pub fn fetch(&self, reload: bool) -> Result<Arc<[ThemeBundle]>, CatalogError> {
        let catalog = self.catalog(reload)?;
        let custom = self.custom.read().unwrap();
        if custom.is_empty() {
            return Ok(catalog);
        }

        Ok(catalog
            .iter()
            .cloned()
            .chain(custom.values().cloned())
            .collect())
    }

    /// Create or update a custom theme, keyed by its custom id
    pub fn store_custom_theme(&self, bundle: ThemeBundle) -> bool {
        let Some(id) = bundle.custom_id().map(str::to_string) else {
            tracing::warn!("refusing to store non-custom theme {:?}", bundle.title());
            return false;
        };
        let previous = self.custom.write().unwrap().insert(id.clone(), bundle);
        if previous.is_some() {
            tracing::debug!("updated custom theme {id}");
        } else {
            tracing::debug!("stored custom theme {id}");
        }
        true
    }

    /// Remove a custom theme; `false` if no theme had that id
    pub fn remove_custom_theme(&self, id: &str) -> bool {
        self.custom.write().unwrap().shift_remove(id).is_some()
    }

    pub fn custom_theme(&self, id: &str) -> Option<ThemeBundle> {
        self.custom.read().unwrap().get(id).cloned()
    }

    pub fn custom_theme_count(&self) -> usize {
        self.custom.read().unwrap().len()
    }

    /// Unused id for a new composition (`<prefix><n>`)
    pub fn next_custom_id(&self) -> String {
        let custom = self.custom.read().unwrap();
        (custom.len() + 1..)
            .map(|n| format!("{}{n}", self.config.custom_id_prefix))
            .find(|id| !custom.contains_key(id))
            .unwrap_or_default()
    }

    /// First bundle (catalog order, then custom) with the same package pairs
    pub fn find_equivalent(&self, packages: &OverlayPackages) -> Result<Option<ThemeBundle>, CatalogError> {
        let catalog = self.catalog(false)?;
        if let Some(bundle) = catalog.iter().find(|b| b.equivalent_to(packages)) {
            return Ok(Some(bundle.clone()));
        }

        Ok(self
            .custom
            .read()
            .unwrap()
            .values()
            .find(|b| b.equivalent_to(packages))
            .cloned())
    }

    fn catalog(&self, reload: bool) -> Result<Arc<[ThemeBundle]>, CatalogError> {
        if !reload {
            if let Some(catalog) = self.catalog.read().unwrap().as_ref() {
                return Ok(catalog.clone());
            }
        }

        let themes: Arc<[ThemeBundle]> =
            CatalogLoader::new(self.resources.as_ref(), &self.config).load()?.into();
        *self.catalog.write().unwrap() = Some(themes.clone());
        tracing::debug!("theme catalog loaded ({} themes)", themes.len());
        Ok(themes)
    }
}
