//! Tint platform layer
//!
//! Traits for everything the theme engine asks of the device, plus in-memory
//! and file-backed implementations:
//!
//! - [`ResourceProvider`] / [`ResourceSpace`]: labeled resource lookup in the
//!   stub namespace, overlay packages, and the platform namespace
//! - [`OverlayService`]: enabled overlays per target package, toggling
//! - [`SettingsStore`]: the persisted "current theme" string
//! - [`WallpaperCollaborator`]: destination dialog and wallpaper setting
//! - [`ThemeEventLogger`]: "theme applied" notifications

pub mod catalog;
pub mod error;
pub mod events;
pub mod overlay;
pub mod resources;
pub mod settings;
pub mod wallpaper;

pub use catalog::{NamespaceResources, ResourceCatalog, SYSTEM_PACKAGE};
pub use error::{PlatformError, Result};
pub use events::{RecordingLogger, ThemeAppliedEvent, ThemeEventLogger, TracingLogger};
pub use overlay::{MemoryOverlayService, OverlayInfo, OverlayService, OverlayToggle};
pub use resources::{Color, Drawable, ResourceKind, ResourceProvider, ResourceSpace};
pub use settings::{MemorySettings, SettingsStore};
pub use wallpaper::{
    AppliedWallpaper, MemoryWallpaper, WallpaperCollaborator, WallpaperDestination, WallpaperInfo,
};
