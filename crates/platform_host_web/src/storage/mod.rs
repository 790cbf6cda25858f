//! Browser storage adapters.

pub mod local_documents;
pub mod local_prefs;

#[cfg(target_arch = "wasm32")]
pub(crate) fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn read_item(key: &str) -> Result<Option<String>, String> {
    local_storage()?
        .get_item(key)
        .map_err(|e| format!("localStorage get_item `{key}` failed: {e:?}"))
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn write_item(key: &str, value: &str) -> Result<(), String> {
    local_storage()?
        .set_item(key, value)
        .map_err(|e| format!("localStorage set_item `{key}` failed: {e:?}"))
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn remove_item(key: &str) -> Result<(), String> {
    local_storage()?
        .remove_item(key)
        .map_err(|e| format!("localStorage remove_item `{key}` failed: {e:?}"))
}
