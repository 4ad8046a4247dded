//! Live overlay state
//!
//! Reads which overlay is enabled per category across the four target
//! packages. The result is cached until [`OverlayStateResolver::invalidate`]
//! is called; an apply always invalidates before and after it runs.

use std::sync::{Arc, Mutex};

use tint_platform::OverlayService;

use crate::category::{Category, TargetPackages};
use crate::packages::OverlayPackages;

/// Cached view of the enabled overlays
pub struct OverlayStateResolver {
    overlays: Arc<dyn OverlayService>,
    targets: TargetPackages,
    current: Mutex<Option<OverlayPackages>>,
}

impl OverlayStateResolver {
    pub fn new(overlays: Arc<dyn OverlayService>, targets: TargetPackages) -> Self {
        Self {
            overlays,
            targets,
            current: Mutex::new(None),
        }
    }

    pub fn targets(&self) -> &TargetPackages {
        &self.targets
    }

    /// Enabled overlay per category, read once and cached
    pub fn current_overlays(&self) -> OverlayPackages {
        let mut current = self.current.lock().unwrap();
        if let Some(packages) = current.as_ref() {
            return packages.clone();
        }

        let packages = self.read_enabled();
        *current = Some(packages.clone());
        packages
    }

    /// Drop the cache; the next read asks the overlay service again
    pub fn invalidate(&self) {
        *self.current.lock().unwrap() = None;
    }

    /// Every (category, package) pair of `packages` is currently enabled.
    /// An empty mapping is active only when no overlay is enabled at all.
    pub fn is_active(&self, packages: &OverlayPackages) -> bool {
        let current = self.current_overlays();
        if packages.is_empty() {
            return current.is_empty();
        }
        packages.is_subset_of(&current)
    }

    fn read_enabled(&self) -> OverlayPackages {
        let mut packages = OverlayPackages::new();

        for target in self.targets.all() {
            for info in self.overlays.enabled_overlays(target) {
                let Some(category) = Category::from_overlay_category(&info.category) else {
                    continue;
                };
                if self.targets.for_category(category) != target {
                    tracing::debug!(
                        "ignoring {category} overlay {} on unexpected target {target}",
                        info.package
                    );
                    continue;
                }
                if let Some(existing) = packages.get(category) {
                    tracing::warn!(
                        "more than one {category} overlay enabled ({existing}, {}); keeping the first",
                        info.package
                    );
                    continue;
                }
                packages.insert(category, info.package);
            }
        }

        tracing::trace!("enabled overlays: {packages:?}");
        packages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tint_platform::{MemoryOverlayService, OverlayInfo};

    fn service() -> Arc<MemoryOverlayService> {
        Arc::new(MemoryOverlayService::with_overlays([
            OverlayInfo::new(
                "pkg.color.ocean",
                "android",
                Category::Color.overlay_category(),
            )
            .enabled(true),
            OverlayInfo::new(
                "pkg.color.forest",
                "android",
                Category::Color.overlay_category(),
            ),
            OverlayInfo::new(
                "pkg.icon.sysui",
                "com.android.systemui",
                Category::IconSysUi.overlay_category(),
            )
            .enabled(true),
            OverlayInfo::new("pkg.clock", "com.android.systemui", "android.theme.customization.clock")
                .enabled(true),
        ]))
    }

    #[test]
    fn reads_enabled_overlays_across_targets() {
        let resolver = OverlayStateResolver::new(service(), TargetPackages::default());
        let expected: OverlayPackages = [
            (Category::Color, "pkg.color.ocean"),
            (Category::IconSysUi, "pkg.icon.sysui"),
        ]
        .into();
        assert_eq!(resolver.current_overlays(), expected);
    }

    #[test]
    fn caches_until_invalidated() {
        let service = service();
        let resolver = OverlayStateResolver::new(service.clone(), TargetPackages::default());
        assert!(resolver.is_active(&[(Category::Color, "pkg.color.ocean")].into()));

        assert!(service.set_enabled_exclusive_in_category("pkg.color.forest"));
        assert!(resolver.is_active(&[(Category::Color, "pkg.color.ocean")].into()));

        resolver.invalidate();
        assert!(!resolver.is_active(&[(Category::Color, "pkg.color.ocean")].into()));
        assert!(resolver.is_active(&[(Category::Color, "pkg.color.forest")].into()));
    }

    #[test]
    fn empty_mapping_is_active_only_without_overlays() {
        let service = service();
        let resolver = OverlayStateResolver::new(service.clone(), TargetPackages::default());
        assert!(!resolver.is_active(&OverlayPackages::new()));

        service.set_enabled("pkg.color.ocean", false);
        service.set_enabled("pkg.icon.sysui", false);
        resolver.invalidate();
        assert!(resolver.is_active(&OverlayPackages::new()));
    }
}
