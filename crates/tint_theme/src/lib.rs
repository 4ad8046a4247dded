//! Tint Theme Engine
//!
//! Loads a catalog of theme bundles from labeled resources and applies them
//! to a device by toggling resource overlays.
//!
//! # Overview
//!
//! - **Catalog**: themes are declared in a stub resource namespace; each one
//!   names an overlay package per category (color, font, shape, four icon
//!   packs). Categories a theme leaves out fall back to the platform.
//! - **Bundles**: a [`ThemeBundle`] is the overlay mapping plus everything a
//!   picker needs to preview it (accent colors, fonts, icon mask, icons,
//!   optional wallpaper).
//! - **Apply**: [`ThemeManager::apply`] reconciles every category on its
//!   target package, persists the selection, and reports failures without
//!   rolling back.
//! - **Components**: [`ComponentOption`]s let a user compose a custom theme
//!   one category at a time.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tint_theme::{Collaborators, ThemeConfig, ThemeManager};
//!
//! let manager = ThemeManager::new(Arc::new(resources), collaborators, ThemeConfig::default());
//!
//! let themes = manager.fetch_themes(false)?;
//! let ocean = themes.iter().find(|t| t.title() == "Ocean").unwrap();
//! manager.apply(ocean).await?;
//! assert!(manager.is_active(ocean));
//! ```
//!
//! # Selection format
//!
//! The applied mapping is stored under [`THEME_SETTING`] as
//! `category=package` pairs joined with `;` (see [`selection`]).

pub mod bundle;
pub mod category;
pub mod component;
pub mod config;
pub mod error;
pub mod loader;
pub mod manager;
pub mod packages;
pub mod provider;
pub mod selection;
pub mod state;

// Re-export commonly used types
pub use bundle::{BundleError, FontHandle, ThemeBundle, ThemeBundleBuilder, ThemePreview};
pub use category::{Category, Target, TargetPackages};
pub use component::{
    options_from_catalog, ColorOption, ComponentOption, CustomThemeComposer, FontOption,
    IconOption, OptionKind, PreviewCard, ShapeOption, Thumbnail,
};
pub use config::{ThemeConfig, THEME_SETTING};
pub use error::{ApplyError, CatalogError};
pub use loader::{CatalogLoader, Resolution, DEFAULT_THEME_NAME};
pub use manager::{
    ApplyOutcome, ApplyPhase, ApplyReport, CategoryOutcome, Collaborators, OverlayAction,
    ThemeManager,
};
pub use packages::OverlayPackages;
pub use provider::ThemeProvider;
pub use selection::SelectionError;
pub use state::OverlayStateResolver;
