//! Category → overlay package mapping

use std::collections::BTreeMap;

use crate::category::Category;

/// Overlay package chosen per category
///
/// Equality is set equality over (category, package) pairs; insertion order
/// never matters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OverlayPackages {
    packages: BTreeMap<Category, String>,
}

impl OverlayPackages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `package` for `category`, returning the previous package
    pub fn insert(&mut self, category: Category, package: impl Into<String>) -> Option<String> {
        self.packages.insert(category, package.into())
    }

    pub fn remove(&mut self, category: Category) -> Option<String> {
        self.packages.remove(&category)
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.packages.get(&category).map(String::as_str)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.packages.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Pairs in registry order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> + '_ {
        self.packages.iter().map(|(c, p)| (*c, p.as_str()))
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.packages.keys().copied()
    }

    /// Every pair of `self` has the same package in `other`
    pub fn is_subset_of(&self, other: &OverlayPackages) -> bool {
        self.iter()
            .all(|(category, package)| other.get(category) == Some(package))
    }

    /// Overlay `other` on top of `self`
    pub fn merge(&mut self, other: &OverlayPackages) {
        for (category, package) in other.iter() {
            self.insert(category, package);
        }
    }
}

impl<S: Into<String>> FromIterator<(Category, S)> for OverlayPackages {
    fn from_iter<T: IntoIterator<Item = (Category, S)>>(iter: T) -> Self {
        let mut packages = Self::new();
        for (category, package) in iter {
            packages.insert(category, package);
        }
        packages
    }
}

impl<S: Into<String>, const N: usize> From<[(Category, S); N]> for OverlayPackages {
    fn from(pairs: [(Category, S); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_insertion_order() {
        let a: OverlayPackages = [
            (Category::Color, "pkg.color.ocean"),
            (Category::Font, "pkg.font.ocean"),
        ]
        .into();
        let b: OverlayPackages = [
            (Category::Font, "pkg.font.ocean"),
            (Category::Color, "pkg.color.ocean"),
        ]
        .into();
        assert_eq!(a, b);
    }

    #[test]
    fn subset_requires_matching_packages() {
        let current: OverlayPackages = [
            (Category::Color, "pkg.color.ocean"),
            (Category::Font, "pkg.font.ocean"),
        ]
        .into();
        let color: OverlayPackages = [(Category::Color, "pkg.color.ocean")].into();
        let other: OverlayPackages = [(Category::Color, "pkg.color.forest")].into();

        assert!(color.is_subset_of(&current));
        assert!(!other.is_subset_of(&current));
        assert!(!current.is_subset_of(&color));
    }

    #[test]
    fn insert_returns_previous_package() {
        let mut packages = OverlayPackages::new();
        assert_eq!(packages.insert(Category::Shape, "a"), None);
        assert_eq!(packages.insert(Category::Shape, "b"), Some("a".to_string()));
        assert_eq!(packages.get(Category::Shape), Some("b"));
    }
}
