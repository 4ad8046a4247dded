use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tint_platform::{
    Color, PlatformError, ResourceCatalog, ResourceKind, ResourceProvider, ResourceSpace,
};

/// Write `contents` into a fresh temp dir; the dir lives as long as the guard
fn catalog_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn loads_catalog_from_disk() {
    let (_dir, path) = catalog_file(
        "resources.toml",
        r##"
stub_package = "com.example.themes"
system_package = "platform"

[stub.string_arrays]
themes = ["default"]

[system.colors]
accent_device_default_light = "#1A73E8"

[packages."pkg.icon.sysui".drawables]
ic_dnd = "icons/ic_dnd.png"
"##,
    );

    let catalog = ResourceCatalog::load(&path).unwrap();
    assert_eq!(catalog.system().namespace(), "platform");
    assert!(catalog
        .stub()
        .contains("themes", ResourceKind::StringArray));
    assert!(!catalog.stub().contains("themes", ResourceKind::String));
    assert_eq!(
        catalog.package("platform").unwrap().color("accent_device_default_light"),
        Ok(Color::from_hex(0x1A73E8))
    );

    let sysui = catalog.package("pkg.icon.sysui").unwrap();
    let dnd = sysui.drawable("ic_dnd").unwrap();
    assert_eq!(dnd.namespace, "pkg.icon.sysui");
    assert_eq!(dnd.source, "icons/ic_dnd.png");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing/resources.toml");
    assert!(matches!(
        ResourceCatalog::load(&path),
        Err(PlatformError::Io(_))
    ));
}

#[test]
fn unknown_sections_are_rejected() {
    let (_dir, path) = catalog_file(
        "bad.toml",
        r#"
stub_package = "com.example.themes"

[stub.fonts]
headline = "serif"
"#,
    );
    assert!(matches!(
        ResourceCatalog::load(&path),
        Err(PlatformError::CatalogParse(_))
    ));
}
