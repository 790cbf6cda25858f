//! Built-in app catalog and the app id to mount function registry.

mod browser;
mod editor;
mod explorer;
mod notes;
mod placeholders;
mod settings;

use std::sync::OnceLock;

use desktop_app_contract::{AppModule, AppMountFn, AppRegistration, ApplicationId};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

/// Returns the manifest-backed catalog, sorted by app id.
pub fn app_catalog() -> &'static [AppRegistration] {
    static CATALOG: OnceLock<Vec<AppRegistration>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(APP_MANIFEST_CATALOG_JSON)
            .expect("generated app manifest catalog should parse")
    })
}

/// Returns the generated catalog JSON payload.
pub fn app_catalog_json() -> &'static str {
    APP_MANIFEST_CATALOG_JSON
}

pub fn app_registration(app_id: &ApplicationId) -> Option<&'static AppRegistration> {
    app_catalog().iter().find(|entry| entry.app_id == *app_id)
}

/// Start menu entries, alphabetical by display name.
pub fn start_menu_apps() -> Vec<&'static AppRegistration> {
    let mut apps: Vec<&'static AppRegistration> = app_catalog()
        .iter()
        .filter(|entry| entry.show_in_start_menu)
        .collect();
    apps.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    apps
}

/// Resolves the mount function for `app_id`. Unknown ids resolve to `None` and the window
/// body stays empty.
pub fn app_module(app_id: &ApplicationId) -> Option<AppModule> {
    let mount: AppMountFn = match app_id.as_str() {
        "file-explorer" => explorer::mount_file_explorer,
        "text-editor" => editor::mount_text_editor,
        "notes" => notes::mount_notes,
        "browser" => browser::mount_browser,
        "settings" => settings::mount_settings,
        "terminal" => placeholders::mount_terminal,
        "calculator" => placeholders::mount_calculator,
        "image-viewer" => placeholders::mount_image_viewer,
        _ => return None,
    };
    Some(AppModule::new(mount))
}

/// Well-known id for the text editor, used by "open with" requests.
pub fn text_editor_id() -> ApplicationId {
    ApplicationId::trusted("text-editor")
}

/// Well-known id for the settings app, used by the "Personalize" desktop menu entry.
pub fn settings_id() -> ApplicationId {
    ApplicationId::trusted("settings")
}
