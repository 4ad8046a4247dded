//! Serialized "current theme" selection
//!
//! The selection is persisted as `category=package` pairs in registry order,
//! joined with `;`, keyed by overlay category wire name:
//!
//! ```text
//! android.theme.customization.accent_color=pkg.color.ocean;android.theme.customization.font=pkg.font.ocean
//! ```
//!
//! Reading also accepts the JSON object form written by older pickers.

use std::collections::HashMap;

use thiserror::Error;

use crate::category::Category;
use crate::packages::OverlayPackages;

/// Separates pairs
pub const PAIR_SEPARATOR: char = ';';

/// Separates a category from its package
pub const KEY_SEPARATOR: char = '=';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("package id `{package}` for {category} contains a reserved separator")]
    ReservedCharacter { category: Category, package: String },

    #[error("malformed selection pair `{0}`")]
    Malformed(String),

    #[error("category `{0}` appears more than once")]
    Duplicate(String),

    #[error("invalid selection json: {0}")]
    Json(String),
}

fn is_valid_package(package: &str) -> bool {
    !package.is_empty() && !package.contains(&[PAIR_SEPARATOR, KEY_SEPARATOR][..])
}

/// Serialize a mapping for the settings store
pub fn serialize(packages: &OverlayPackages) -> Result<String, SelectionError> {
    let mut out = String::new();
    for (category, package) in packages.iter() {
        if !is_valid_package(package) {
            return Err(SelectionError::ReservedCharacter {
                category,
                package: package.to_string(),
            });
        }
        if !out.is_empty() {
            out.push(PAIR_SEPARATOR);
        }
        out.push_str(category.overlay_category());
        out.push(KEY_SEPARATOR);
        out.push_str(package);
    }
    Ok(out)
}

/// Parse a persisted selection; unknown categories are dropped
pub fn deserialize(src: &str) -> Result<OverlayPackages, SelectionError> {
    let src = src.trim();
    if src.starts_with('{') {
        return deserialize_json(src);
    }

    let mut packages = OverlayPackages::new();
    for pair in src.split(PAIR_SEPARATOR).map(str::trim) {
        if pair.is_empty() {
            continue;
        }
        let Some((key, package)) = pair.split_once(KEY_SEPARATOR) else {
            return Err(SelectionError::Malformed(pair.to_string()));
        };
        let (key, package) = (key.trim(), package.trim());
        if key.is_empty() || package.is_empty() {
            return Err(SelectionError::Malformed(pair.to_string()));
        }
        insert_known(&mut packages, key, package)?;
    }
    Ok(packages)
}

fn deserialize_json(src: &str) -> Result<OverlayPackages, SelectionError> {
    let raw: HashMap<String, String> =
        serde_json::from_str(src).map_err(|e| SelectionError::Json(e.to_string()))?;

    let mut packages = OverlayPackages::new();
    for (key, package) in &raw {
        insert_known(&mut packages, key, package)?;
    }
    Ok(packages)
}

fn insert_known(
    packages: &mut OverlayPackages,
    key: &str,
    package: &str,
) -> Result<(), SelectionError> {
    let Some(category) = Category::from_overlay_category(key) else {
        tracing::debug!("dropping unknown overlay category `{key}` from stored selection");
        return Ok(());
    };
    if packages.insert(category, package).is_some() {
        return Err(SelectionError::Duplicate(key.to_string()));
    }
    Ok(())
}
