use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
struct WindowDefaults {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DesktopIconSlot {
    label: String,
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct AppManifest {
    schema_version: u32,
    app_id: String,
    display_name: String,
    icon_id: String,
    show_in_start_menu: bool,
    window_defaults: WindowDefaults,
    #[serde(default)]
    desktop_icon: Option<DesktopIconSlot>,
}

/// Catalog entry in the shape `desktop_app_contract::AppRegistration` deserializes.
#[derive(Debug, Clone, Serialize)]
struct CatalogEntry {
    app_id: String,
    display_name: String,
    icon_id: String,
    default_width: i32,
    default_height: i32,
    show_in_start_menu: bool,
    desktop_icon: Option<DesktopIconSlot>,
}

fn manifest_paths(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", dir.display()));
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(".app.toml"))
        })
        .collect();
    paths.sort();
    paths
}

fn is_valid_app_id(raw: &str) -> bool {
    !raw.is_empty()
        && raw.len() <= 64
        && raw.as_bytes()[0].is_ascii_lowercase()
        && !raw.ends_with('-')
        && !raw.contains("--")
        && raw
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

fn validate(path: &Path, manifest: &AppManifest) {
    if manifest.schema_version != 1 {
        panic!(
            "manifest schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }
    if !is_valid_app_id(&manifest.app_id) {
        panic!(
            "invalid app id `{}` in {}",
            manifest.app_id,
            path.display()
        );
    }
    if manifest.display_name.trim().is_empty() {
        panic!("empty display name in {}", path.display());
    }
    if manifest.window_defaults.width <= 0 || manifest.window_defaults.height <= 0 {
        panic!("window defaults must be positive in {}", path.display());
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let manifest_dir = crate_root.join("manifests");
    println!("cargo:rerun-if-changed={}", manifest_dir.display());

    let mut entries = Vec::<CatalogEntry>::new();
    let mut seen_ids = BTreeSet::new();
    let mut seen_slots = BTreeSet::new();

    for path in manifest_paths(&manifest_dir) {
        println!("cargo:rerun-if-changed={}", path.display());
        let raw = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
        let manifest: AppManifest = toml::from_str(&raw)
            .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
        validate(&path, &manifest);

        if !seen_ids.insert(manifest.app_id.clone()) {
            panic!("duplicate app id `{}` in {}", manifest.app_id, path.display());
        }
        if let Some(slot) = &manifest.desktop_icon {
            if !seen_slots.insert((slot.x, slot.y)) {
                panic!(
                    "desktop icon slot ({}, {}) reused in {}",
                    slot.x,
                    slot.y,
                    path.display()
                );
            }
        }

        entries.push(CatalogEntry {
            app_id: manifest.app_id,
            display_name: manifest.display_name,
            icon_id: manifest.icon_id,
            default_width: manifest.window_defaults.width,
            default_height: manifest.window_defaults.height,
            show_in_start_menu: manifest.show_in_start_menu,
            desktop_icon: manifest.desktop_icon,
        });
    }

    if entries.is_empty() {
        panic!("no app manifests found in {}", manifest_dir.display());
    }

    entries.sort_by(|a, b| a.app_id.cmp(&b.app_id));
    let json = serde_json::to_string_pretty(&entries).expect("serialize app manifest catalog");
    let generated = format!(
        "/// Build-time generated app manifest catalog JSON.\n\
pub const APP_MANIFEST_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
