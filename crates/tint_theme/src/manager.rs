//! Theme manager
//!
//! Applies a [`ThemeBundle`] to the device: optionally sets the bundle's
//! wallpaper, reconciles every category's overlay on its target package,
//! persists the selection, and reports the outcome.
//!
//! An apply walks a small state machine:
//!
//! ```text
//! Idle -> [WallpaperPending] -> ApplyingOverlays -> Done(Success | PartialFailure)
//!                  \-> Done(Failed)
//! ```
//!
//! The phases of the last apply are kept as a transition history.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use smallvec::SmallVec;
use tint_platform::{
    OverlayService, PlatformError, ResourceProvider, SettingsStore, ThemeEventLogger,
    WallpaperCollaborator, WallpaperDestination, WallpaperInfo,
};
use tokio::sync::oneshot;

use crate::bundle::ThemeBundle;
use crate::category::Category;
use crate::component::{options_from_catalog, ComponentOption};
use crate::config::ThemeConfig;
use crate::error::{ApplyError, CatalogError};
use crate::packages::OverlayPackages;
use crate::provider::ThemeProvider;
use crate::selection;
use crate::state::OverlayStateResolver;

/// Device services the manager drives
#[derive(Clone)]
pub struct Collaborators {
    pub overlays: Arc<dyn OverlayService>,
    pub settings: Arc<dyn SettingsStore>,
    pub wallpaper: Arc<dyn WallpaperCollaborator>,
    pub events: Arc<dyn ThemeEventLogger>,
}

/// How an apply ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Success,
    /// Some categories or the settings write failed; the rest stayed applied
    PartialFailure,
    /// Wallpaper branch failed before any overlay was touched
    Failed,
}

/// Phase of the current (or last) apply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyPhase {
    Idle,
    WallpaperPending,
    ApplyingOverlays,
    Done(ApplyOutcome),
}

/// What reconciliation did for one category
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayAction {
    /// Enabled exclusively within the category
    Enable(String),
    /// Disabled to restore the platform identity; every overlay of the
    /// category that was enabled on its target
    Disable(Vec<String>),
    /// Already at the platform identity
    Unchanged,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryOutcome {
    pub category: Category,
    pub action: OverlayAction,
    pub succeeded: bool,
}

/// Successful apply
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyReport {
    pub title: String,
    /// Selection string written to settings
    pub selection: String,
    pub outcomes: SmallVec<[CategoryOutcome; 7]>,
    pub wallpaper: Option<WallpaperDestination>,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ThemeManager {
    config: ThemeConfig,
    provider: ThemeProvider,
    state: OverlayStateResolver,
    collaborators: Collaborators,
    in_flight: AtomicBool,
    history: Mutex<SmallVec<[ApplyPhase; 4]>>,
}

impl ThemeManager {
    pub fn new(
        resources: Arc<dyn ResourceProvider>,
        collaborators: Collaborators,
        config: ThemeConfig,
    ) -> Self {
        let mut history = SmallVec::new();
        history.push(ApplyPhase::Idle);

        Self {
            provider: ThemeProvider::new(resources, config.clone()),
            state: OverlayStateResolver::new(collaborators.overlays.clone(), config.targets.clone()),
            config,
            collaborators,
            in_flight: AtomicBool::new(false),
            history: Mutex::new(history),
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn provider(&self) -> &ThemeProvider {
        &self.provider
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    pub fn fetch_themes(&self, reload: bool) -> Result<Arc<[ThemeBundle]>, CatalogError> {
        self.provider.fetch(reload)
    }

    /// Per-component options derived from the catalog
    pub fn fetch_options(&self, reload: bool) -> Result<Vec<ComponentOption>, CatalogError> {
        let themes = self.provider.fetch(reload)?;
        let catalog: Vec<ThemeBundle> = themes.iter().filter(|b| !b.is_custom()).cloned().collect();
        Ok(options_from_catalog(&catalog))
    }

    pub fn current_overlays(&self) -> OverlayPackages {
        self.state.current_overlays()
    }

    pub fn invalidate_overlay_state(&self) {
        self.state.invalidate();
    }

    /// Whether `bundle` matches what is enabled on the device
    pub fn is_active(&self, bundle: &ThemeBundle) -> bool {
        if bundle.is_default() {
            return self.state.current_overlays().is_empty();
        }
        self.state.is_active(bundle.overlay_packages())
    }

    /// Selection persisted by the last successful settings write
    pub fn stored_overlays(&self) -> Option<OverlayPackages> {
        let stored = self.collaborators.settings.read_string(&self.config.setting_key)?;
        match selection::deserialize(&stored) {
            Ok(packages) => Some(packages),
            Err(err) => {
                tracing::warn!("ignoring unreadable stored theme selection: {err}");
                None
            }
        }
    }

    /// Bundle (catalog first, then custom) equivalent to `packages`
    pub fn find_theme_by_packages(
        &self,
        packages: &OverlayPackages,
    ) -> Result<Option<ThemeBundle>, CatalogError> {
        self.provider.find_equivalent(packages)
    }

    pub fn remove_custom_theme(&self, id: &str) -> bool {
        self.provider.remove_custom_theme(id)
    }

    pub fn phase(&self) -> ApplyPhase {
        self.history
            .lock()
            .unwrap()
            .last()
            .copied()
            .unwrap_or(ApplyPhase::Idle)
    }

    /// Phases visited by the last apply, starting at `Idle`
    pub fn history(&self) -> Vec<ApplyPhase> {
        self.history.lock().unwrap().to_vec()
    }

    /// Apply `bundle`.
    ///
    /// Returns [`ApplyError::Busy`] without touching anything while another
    /// apply is in flight on this manager.
    pub async fn apply(&self, bundle: &ThemeBundle) -> Result<ApplyReport, ApplyError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("apply of {:?} rejected, another apply is running", bundle.title());
            return Err(ApplyError::Busy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.reset_history();
        tracing::debug!("applying theme {:?}", bundle.title());

        let wallpaper = match bundle.wallpaper() {
            Some(info) if bundle.should_use_theme_wallpaper() => {
                self.transition(ApplyPhase::WallpaperPending);
                match self.apply_wallpaper(info).await {
                    Ok(destination) => Some(destination),
                    Err(err) => {
                        self.transition(ApplyPhase::Done(ApplyOutcome::Failed));
                        tracing::warn!("couldn't set wallpaper for theme {:?}: {err}", bundle.title());
                        return Err(ApplyError::WallpaperSetFailed(err));
                    }
                }
            }
            _ => None,
        };

        self.transition(ApplyPhase::ApplyingOverlays);
        self.apply_overlays(bundle, wallpaper)
    }

    fn apply_overlays(
        &self,
        bundle: &ThemeBundle,
        wallpaper: Option<WallpaperDestination>,
    ) -> Result<ApplyReport, ApplyError> {
        self.state.invalidate();
        let outcomes = self.reconcile(bundle);

        let (selection, settings_written) = self.persist(bundle);

        if bundle.is_custom() {
            self.provider.store_custom_theme(bundle.clone());
        }
        self.state.invalidate();

        let failed: Vec<Category> = outcomes
            .iter()
            .filter(|outcome| !outcome.succeeded)
            .map(|outcome| outcome.category)
            .collect();

        if !failed.is_empty() || !settings_written {
            self.transition(ApplyPhase::Done(ApplyOutcome::PartialFailure));
            tracing::warn!(
                "theme {:?} only partially applied (failed: {failed:?}, settings written: {settings_written})",
                bundle.title()
            );
            return Err(ApplyError::NotApplied {
                failed,
                settings_written,
            });
        }

        self.transition(ApplyPhase::Done(ApplyOutcome::Success));
        self.collaborators
            .events
            .log_theme_applied(bundle.title(), bundle.is_custom());

        Ok(ApplyReport {
            title: bundle.title().to_string(),
            selection,
            outcomes,
            wallpaper,
        })
    }

    /// Bring every category to the bundle's choice; each one independently
    fn reconcile(&self, bundle: &ThemeBundle) -> SmallVec<[CategoryOutcome; 7]> {
        let mut outcomes = SmallVec::new();

        for category in Category::ALL {
            let wanted = if bundle.is_default() {
                None
            } else {
                bundle.overlay_packages().get(category)
            };

            let (action, succeeded) = match wanted {
                Some(package) => (
                    OverlayAction::Enable(package.to_string()),
                    self.collaborators
                        .overlays
                        .set_enabled_exclusive_in_category(package),
                ),
                None => self.restore_platform(category),
            };

            if !succeeded {
                let err = PlatformError::OverlayToggleFailed(format!(
                    "{action:?} for {category} on {}",
                    self.config.targets.for_category(category)
                ));
                tracing::warn!("{err}");
            }
            outcomes.push(CategoryOutcome {
                category,
                action,
                succeeded,
            });
        }

        outcomes
    }

    /// Disable every enabled overlay of `category` on its target.
    ///
    /// Reads the overlay service directly: the cached state keeps one package
    /// per category and would miss duplicates.
    fn restore_platform(&self, category: Category) -> (OverlayAction, bool) {
        let overlays = &self.collaborators.overlays;
        let target = self.config.targets.for_category(category);
        let enabled: Vec<String> = overlays
            .enabled_overlays(target)
            .into_iter()
            .filter(|info| info.category == category.overlay_category())
            .map(|info| info.package)
            .collect();

        if enabled.is_empty() {
            return (OverlayAction::Unchanged, true);
        }

        // attempt all of them even after a denial
        let succeeded = enabled
            .iter()
            .fold(true, |ok, package| overlays.set_enabled(package, false) && ok);
        (OverlayAction::Disable(enabled), succeeded)
    }

    fn persist(&self, bundle: &ThemeBundle) -> (String, bool) {
        let serialized = match bundle.serialized_packages() {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!("couldn't serialize theme {:?}: {err}", bundle.title());
                return (String::new(), false);
            }
        };

        let written = self
            .collaborators
            .settings
            .write_string(&self.config.setting_key, &serialized);
        if !written {
            let err = PlatformError::SettingsWriteFailed(self.config.setting_key.clone());
            tracing::warn!("{err}");
        }
        (serialized, written)
    }

    async fn apply_wallpaper(
        &self,
        info: &WallpaperInfo,
    ) -> Result<WallpaperDestination, PlatformError> {
        let wallpaper = &self.collaborators.wallpaper;
        let timeout = self.config.wallpaper_timeout();

        let (reply, answer) = oneshot::channel();
        wallpaper.request_destination(&self.config.wallpaper_message, reply);
        let destination = await_reply(answer, timeout, "destination dialog").await?;

        let (done, result) = oneshot::channel();
        wallpaper.set_wallpaper(info, destination, done);
        await_reply(result, timeout, "wallpaper set").await??;

        tracing::debug!("wallpaper {} set on {destination:?}", info.resource_name);
        Ok(destination)
    }

    fn reset_history(&self) {
        let mut history = self.history.lock().unwrap();
        history.clear();
        history.push(ApplyPhase::Idle);
    }

    fn transition(&self, to: ApplyPhase) {
        let mut history = self.history.lock().unwrap();
        tracing::trace!("apply phase {:?} -> {to:?}", history.last());
        history.push(to);
    }
}

async fn await_reply<T>(
    receiver: oneshot::Receiver<T>,
    timeout: Duration,
    what: &str,
) -> Result<T, PlatformError> {
    match tokio::time::timeout(timeout, receiver).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) => Err(PlatformError::WallpaperSetFailed(format!("{what} dismissed"))),
        Err(_) => Err(PlatformError::WallpaperSetFailed(format!(
            "{what} timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}
