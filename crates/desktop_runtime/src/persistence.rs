//! Desktop snapshot persistence: icon layout and user settings under one prefs key.
//!
//! Open windows are never written; every reload starts with an empty window list.

use leptos::logging;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};

use crate::icons;
use crate::model::{DesktopSnapshot, DesktopState, UserSettings, DESKTOP_SNAPSHOT_SCHEMA_VERSION};
use crate::reducer::validate_settings;

/// Fixed prefs key for the desktop snapshot.
pub const DESKTOP_STATE_KEY: &str = "webos-state";

/// Snapshot used when nothing usable is stored.
pub fn default_snapshot() -> DesktopSnapshot {
    DesktopSnapshot {
        schema_version: DESKTOP_SNAPSHOT_SCHEMA_VERSION,
        desktop_icons: icons::default_icons(),
        settings: UserSettings::default(),
    }
}

/// Reads the stored snapshot once at boot.
///
/// Missing, malformed, or wrong-schema blobs and store failures all fall back to
/// [`default_snapshot`].
pub async fn load_desktop_snapshot(store: &dyn PrefsStore) -> DesktopSnapshot {
    let loaded = match load_pref_with::<_, DesktopSnapshot>(store, DESKTOP_STATE_KEY).await {
        Ok(loaded) => loaded,
        Err(err) => {
            logging::warn!("desktop snapshot load failed, using defaults: {err}");
            None
        }
    };

    match loaded {
        Some(snapshot) if snapshot.schema_version == DESKTOP_SNAPSHOT_SCHEMA_VERSION => {
            let settings = match validate_settings(snapshot.settings) {
                Ok(settings) => settings,
                Err(err) => {
                    logging::warn!("stored desktop settings rejected, using defaults: {err}");
                    UserSettings::default()
                }
            };
            let desktop_icons = if snapshot.desktop_icons.is_empty() {
                icons::default_icons()
            } else {
                snapshot.desktop_icons
            };
            DesktopSnapshot {
                schema_version: snapshot.schema_version,
                desktop_icons,
                settings,
            }
        }
        Some(snapshot) => {
            logging::warn!(
                "desktop snapshot schema {} unsupported, using defaults",
                snapshot.schema_version
            );
            default_snapshot()
        }
        None => default_snapshot(),
    }
}

/// Writes the icon layout and settings of `state`.
///
/// # Errors
///
/// Returns store or serialization errors.
pub async fn persist_desktop_snapshot(
    store: &dyn PrefsStore,
    state: &DesktopState,
) -> Result<(), String> {
    save_pref_with(store, DESKTOP_STATE_KEY, &state.snapshot()).await
}
