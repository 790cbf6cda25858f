//! Key/value preference storage (JSON text per key).

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for small JSON values addressed by a fixed key.
///
/// The desktop snapshot, the browser tab strip, and the task list all live here. Writes are
/// independent and last-write-wins.
pub trait PrefsStore {
    /// Loads the raw JSON text stored under `key`.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw JSON text stored under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Removes `key`.
    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that remembers nothing; used on targets without browser storage.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory prefs store; clones share the same map.
pub struct MemoryPrefsStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the raw text stored under `key` without going through the async contract.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Seeds raw text under `key`, bypassing serialization.
    pub fn insert_raw(&self, key: impl Into<String>, raw_json: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), raw_json.into());
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.insert_raw(key, raw_json);
            Ok(())
        })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.entries.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes the value stored under `key`.
///
/// # Errors
///
/// Returns an error when the store fails or the stored text is not valid JSON for `T`.
pub async fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| format!("malformed value under `{key}`: {e}"))
}

/// Serializes `value` and stores it under `key`.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_pref(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct IconSlot {
        x: i32,
        y: i32,
    }

    #[test]
    fn memory_store_overwrites_and_deletes() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        block_on(store_obj.save_pref("webos-state", "{\"v\":1}")).expect("save");
        block_on(store_obj.save_pref("webos-state", "{\"v\":2}")).expect("overwrite");
        assert_eq!(
            block_on(store_obj.load_pref("webos-state")).expect("load"),
            Some("{\"v\":2}".to_string())
        );

        block_on(store_obj.delete_pref("webos-state")).expect("delete");
        assert_eq!(block_on(store_obj.load_pref("webos-state")).expect("load"), None);
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryPrefsStore::default();
        let clone = store.clone();
        clone.insert_raw("k", "1");
        assert_eq!(store.raw("k"), Some("1".to_string()));
    }

    #[test]
    fn typed_helpers_round_trip_and_report_malformed_json() {
        let store = MemoryPrefsStore::default();
        block_on(save_pref_with(&store, "slot", &IconSlot { x: 20, y: 120 })).expect("save");
        let loaded: Option<IconSlot> = block_on(load_pref_with(&store, "slot")).expect("load");
        assert_eq!(loaded, Some(IconSlot { x: 20, y: 120 }));

        store.insert_raw("slot", "{not json");
        let err = block_on(load_pref_with::<_, IconSlot>(&store, "slot")).expect_err("malformed");
        assert!(err.contains("slot"));
    }

    #[test]
    fn noop_store_never_returns_values() {
        let store = NoopPrefsStore;
        block_on(store.save_pref("k", "{}")).expect("save");
        assert_eq!(block_on(store.load_pref("k")).expect("load"), None);
        block_on(store.delete_pref("k")).expect("delete");
    }
}
