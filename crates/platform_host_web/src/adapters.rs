use std::rc::Rc;

use platform_host::{
    DocumentId, DocumentStore, DocumentStoreFuture, HostServices, MemoryDocumentStore,
    MemoryPrefsStore, PrefsStore, PrefsStoreFuture,
};
use serde_json::Value;

use crate::{WebDocumentStore, WebPrefsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// `localStorage`-backed adapters.
    Browser,
    /// Session-only in-memory adapters (`memory-host` feature); nothing survives a reload.
    Memory,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "memory-host")]
    {
        HostStrategy::Memory
    }

    #[cfg(not(feature = "memory-host"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Memory => "memory",
    }
}

/// Adapter enum that erases the concrete prefs backend behind [`PrefsStore`].
#[derive(Debug, Clone)]
pub enum PrefsStoreAdapter {
    /// Browser-backed preference storage.
    Browser(WebPrefsStore),
    /// In-memory preference storage.
    Memory(MemoryPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Memory(store) => store.load_pref(key),
        }
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw_json),
            Self::Memory(store) => store.save_pref(key, raw_json),
        }
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Memory(store) => store.delete_pref(key),
        }
    }
}

/// Adapter enum that erases the concrete document backend behind [`DocumentStore`].
#[derive(Debug, Clone)]
pub enum DocumentStoreAdapter {
    /// Browser-backed document storage.
    Browser(WebDocumentStore),
    /// In-memory document storage.
    Memory(MemoryDocumentStore),
}

impl DocumentStore for DocumentStoreAdapter {
    fn allocate_id<'a>(
        &'a self,
        collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<DocumentId, String>> {
        match self {
            Self::Browser(store) => store.allocate_id(collection),
            Self::Memory(store) => store.allocate_id(collection),
        }
    }

    fn get_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<Option<Value>, String>> {
        match self {
            Self::Browser(store) => store.get_document(collection, id),
            Self::Memory(store) => store.get_document(collection, id),
        }
    }

    fn put_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
        document: &'a Value,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.put_document(collection, id, document),
            Self::Memory(store) => store.put_document(collection, id, document),
        }
    }

    fn delete_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete_document(collection, id),
            Self::Memory(store) => store.delete_document(collection, id),
        }
    }

    fn list_documents<'a>(
        &'a self,
        collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Vec<(DocumentId, Value)>, String>> {
        match self {
            Self::Browser(store) => store.list_documents(collection),
            Self::Memory(store) => store.list_documents(collection),
        }
    }
}

/// Builds the prefs store for the selected strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Memory => PrefsStoreAdapter::Memory(MemoryPrefsStore::default()),
    }
}

/// Builds the document store for the selected strategy.
pub fn document_store() -> DocumentStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => DocumentStoreAdapter::Browser(WebDocumentStore),
        HostStrategy::Memory => DocumentStoreAdapter::Memory(MemoryDocumentStore::default()),
    }
}

/// Bundles the selected adapters for injection into the desktop runtime.
pub fn build_host_services() -> HostServices {
    HostServices {
        prefs: Rc::new(prefs_store()),
        documents: Rc::new(document_store()),
        strategy_name: host_strategy_name(),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_adapters_round_trip() {
        let prefs = PrefsStoreAdapter::Memory(MemoryPrefsStore::default());
        block_on(prefs.save_pref("k", "1")).expect("save");
        assert_eq!(block_on(prefs.load_pref("k")).expect("load"), Some("1".to_string()));

        let docs = DocumentStoreAdapter::Memory(MemoryDocumentStore::default());
        let id = block_on(docs.allocate_id("notes")).expect("id");
        block_on(docs.put_document("notes", id, &Value::Bool(true))).expect("put");
        assert_eq!(
            block_on(docs.list_documents("notes")).expect("list"),
            vec![(id, Value::Bool(true))]
        );
    }

    #[test]
    fn host_bundle_reports_selected_strategy() {
        let services = build_host_services();
        assert_eq!(services.strategy_name, host_strategy_name());
    }
}
