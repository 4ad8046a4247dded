//! Labeled resource lookup
//!
//! Theme catalogs live in a "stub" resource namespace, preview payloads live
//! in each overlay package's own namespace, and platform defaults live in the
//! system namespace. All three are read through [`ResourceSpace`].

use std::fmt;

use crate::{PlatformError, Result};

/// Kind of a named resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    String,
    StringArray,
    Color,
    Drawable,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::StringArray => "array",
            Self::Color => "color",
            Self::Drawable => "drawable",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packed ARGB color value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Opaque color from a 24-bit RGB value
    pub const fn from_hex(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    /// Color from a 32-bit ARGB value
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn argb(self) -> u32 {
        self.0
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`
    pub fn parse(src: &str) -> Option<Self> {
        let hex = src.trim().strip_prefix('#')?;
        let value = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            6 => Some(Self::from_hex(value)),
            8 => Some(Self::from_argb(value)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Handle to an image resource; decoding happens in the rendering layer
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Drawable {
    /// Namespace the drawable was resolved in
    pub namespace: String,
    /// Resource name
    pub name: String,
    /// Asset source (file path, URI) as declared by the catalog
    pub source: String,
}

/// A single resource namespace (stub package, overlay package, or platform)
pub trait ResourceSpace: Send + Sync {
    /// Namespace (package id) of this resource space
    fn namespace(&self) -> &str;

    fn string(&self, name: &str) -> Result<String>;

    fn string_array(&self, name: &str) -> Result<Vec<String>>;

    fn color(&self, name: &str) -> Result<Color>;

    fn drawable(&self, name: &str) -> Result<Drawable>;

    /// Identifier probe, without loading the value
    fn contains(&self, name: &str, kind: ResourceKind) -> bool;

    /// Optional string lookup; missing resources map to `None`
    fn optional_string(&self, name: &str) -> Option<String> {
        if self.contains(name, ResourceKind::String) {
            self.string(name).ok()
        } else {
            None
        }
    }

    /// Optional drawable lookup; missing resources map to `None`
    fn optional_drawable(&self, name: &str) -> Option<Drawable> {
        if self.contains(name, ResourceKind::Drawable) {
            self.drawable(name).ok()
        } else {
            None
        }
    }
}

/// Resolves resource namespaces by package id
pub trait ResourceProvider: Send + Sync {
    /// The stub namespace holding the theme catalog
    fn stub(&self) -> &dyn ResourceSpace;

    /// The platform's own namespace (defaults outside any overlay)
    fn system(&self) -> &dyn ResourceSpace;

    /// Resources of an installed package
    fn package(&self, id: &str) -> Result<&dyn ResourceSpace>;

    /// Whether `id` resolves to an installed package
    fn has_package(&self, id: &str) -> bool {
        self.package(id).is_ok()
    }
}

pub(crate) fn missing(namespace: &str, kind: ResourceKind, name: &str) -> PlatformError {
    PlatformError::not_found(namespace, kind, name)
}
