//! Platform error types

use thiserror::Error;

use crate::resources::ResourceKind;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// A named resource is missing from a namespace
    #[error("Resource not found: {kind} `{name}` in {namespace}")]
    ResourceNotFound {
        namespace: String,
        kind: ResourceKind,
        name: String,
    },

    /// Overlay package is not installed or has no resources
    #[error("Package not resolvable: {0}")]
    PackageNotResolvable(String),

    /// The overlay service refused to enable/disable a package
    #[error("Overlay toggle failed: {0}")]
    OverlayToggleFailed(String),

    /// Settings storage rejected a write
    #[error("Settings write failed: {0}")]
    SettingsWriteFailed(String),

    /// Wallpaper could not be set (includes a dismissed destination dialog)
    #[error("Wallpaper set failed: {0}")]
    WallpaperSetFailed(String),

    /// Declarative resource catalog could not be parsed
    #[error("Resource catalog parse failed: {0}")]
    CatalogParse(String),

    /// Failed to read or write a backing file
    #[error("I/O error: {0}")]
    Io(String),
}

impl PlatformError {
    /// Shorthand for [`PlatformError::ResourceNotFound`]
    pub fn not_found(namespace: &str, kind: ResourceKind, name: &str) -> Self {
        Self::ResourceNotFound {
            namespace: namespace.to_string(),
            kind,
            name: name.to_string(),
        }
    }

    /// Whether this is one of the two lookup failures a catalog load tolerates
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound { .. } | Self::PackageNotResolvable(_)
        )
    }
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
