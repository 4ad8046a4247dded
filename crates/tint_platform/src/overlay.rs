//! Overlay toggle service
//!
//! Overlay packages replace resources of a target package without modifying
//! it. The service reports which overlays exist per target and toggles them.

use std::sync::{Mutex, RwLock};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// An installed overlay package
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayInfo {
    /// Overlay package id
    pub package: String,
    /// Package the overlay applies to
    pub target: String,
    /// Overlay category wire name (e.g. `android.theme.customization.font`)
    pub category: String,
    #[serde(default)]
    pub enabled: bool,
}

impl OverlayInfo {
    pub fn new(
        package: impl Into<String>,
        target: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            target: target.into(),
            category: category.into(),
            enabled: false,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Platform overlay manager
pub trait OverlayService: Send + Sync {
    /// Every overlay installed for `target`, enabled or not
    fn overlays_for_target(&self, target: &str) -> Vec<OverlayInfo>;

    /// Enabled overlays for `target`
    fn enabled_overlays(&self, target: &str) -> Vec<OverlayInfo> {
        self.overlays_for_target(target)
            .into_iter()
            .filter(|info| info.enabled)
            .collect()
    }

    /// Enable or disable one overlay; `false` if the platform denied it
    fn set_enabled(&self, package: &str, enabled: bool) -> bool;

    /// Enable `package` and disable every other overlay sharing its target and category
    fn set_enabled_exclusive_in_category(&self, package: &str) -> bool;
}

/// A toggle issued against [`MemoryOverlayService`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayToggle {
    pub package: String,
    pub enabled: bool,
    pub exclusive: bool,
    pub accepted: bool,
}

/// In-process overlay manager used by tests and the file-backed device
#[derive(Debug, Default)]
pub struct MemoryOverlayService {
    overlays: RwLock<Vec<OverlayInfo>>,
    denied_targets: RwLock<FxHashSet<String>>,
    denied_packages: RwLock<FxHashSet<String>>,
    toggles: Mutex<Vec<OverlayToggle>>,
}

impl MemoryOverlayService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overlays(overlays: impl IntoIterator<Item = OverlayInfo>) -> Self {
        Self {
            overlays: RwLock::new(overlays.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Install (or replace) an overlay
    pub fn install(&self, info: OverlayInfo) {
        let mut overlays = self.overlays.write().unwrap();
        match overlays.iter_mut().find(|o| o.package == info.package) {
            Some(existing) => *existing = info,
            None => overlays.push(info),
        }
    }

    /// Deny every toggle of overlays targeting `target`
    pub fn deny_target(&self, target: impl Into<String>) {
        self.denied_targets.write().unwrap().insert(target.into());
    }

    /// Deny every toggle of `package`
    pub fn deny_package(&self, package: impl Into<String>) {
        self.denied_packages.write().unwrap().insert(package.into());
    }

    pub fn clear_denials(&self) {
        self.denied_targets.write().unwrap().clear();
        self.denied_packages.write().unwrap().clear();
    }

    /// Snapshot of all installed overlays
    pub fn overlays(&self) -> Vec<OverlayInfo> {
        self.overlays.read().unwrap().clone()
    }

    pub fn is_enabled(&self, package: &str) -> bool {
        self.overlays
            .read()
            .unwrap()
            .iter()
            .any(|o| o.package == package && o.enabled)
    }

    /// Toggles issued so far, in order
    pub fn toggles(&self) -> Vec<OverlayToggle> {
        self.toggles.lock().unwrap().clone()
    }

    fn is_denied(&self, info: &OverlayInfo) -> bool {
        self.denied_packages.read().unwrap().contains(&info.package)
            || self.denied_targets.read().unwrap().contains(&info.target)
    }

    fn record(&self, package: &str, enabled: bool, exclusive: bool, accepted: bool) {
        self.toggles.lock().unwrap().push(OverlayToggle {
            package: package.to_string(),
            enabled,
            exclusive,
            accepted,
        });
    }

    fn toggle(&self, package: &str, enabled: bool, exclusive: bool) -> bool {
        let mut overlays = self.overlays.write().unwrap();
        let Some(index) = overlays.iter().position(|o| o.package == package) else {
            tracing::warn!("overlay {package} is not installed");
            drop(overlays);
            self.record(package, enabled, exclusive, false);
            return false;
        };

        if self.is_denied(&overlays[index]) {
            tracing::warn!("overlay toggle denied for {package}");
            drop(overlays);
            self.record(package, enabled, exclusive, false);
            return false;
        }

        if exclusive {
            let (target, category) = {
                let info = &overlays[index];
                (info.target.clone(), info.category.clone())
            };
            for other in overlays
                .iter_mut()
                .filter(|o| o.target == target && o.category == category)
            {
                other.enabled = false;
            }
        }
        overlays[index].enabled = enabled;
        drop(overlays);

        self.record(package, enabled, exclusive, true);
        true
    }
}

impl OverlayService for MemoryOverlayService {
    fn overlays_for_target(&self, target: &str) -> Vec<OverlayInfo> {
        self.overlays
            .read()
            .unwrap()
            .iter()
            .filter(|o| o.target == target)
            .cloned()
            .collect()
    }

    fn set_enabled(&self, package: &str, enabled: bool) -> bool {
        self.toggle(package, enabled, false)
    }

    fn set_enabled_exclusive_in_category(&self, package: &str) -> bool {
        self.toggle(package, true, true)
    }
}
