use thiserror::Error;
use tint_platform::PlatformError;

use crate::bundle::BundleError;
use crate::category::Category;

/// Catalog load failures
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The default theme could not get a mandatory category from anywhere
    #[error("default theme has no {category} overlay and no platform fallback")]
    DefaultTheme {
        category: Category,
        #[source]
        source: PlatformError,
    },

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Bundle(#[from] BundleError),
}

/// Apply failures
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Another apply is in flight on this manager
    #[error("another theme is already being applied")]
    Busy,

    /// Wallpaper branch failed (dismissed, timed out, or rejected); no overlay was touched
    #[error("couldn't set theme wallpaper")]
    WallpaperSetFailed(#[source] PlatformError),

    /// At least one category toggle or the settings write failed.
    /// Categories applied before the failure stay applied.
    #[error("couldn't apply theme")]
    NotApplied {
        failed: Vec<Category>,
        settings_written: bool,
    },
}
