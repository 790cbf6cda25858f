//! `localStorage`-backed document store.
//!
//! Each collection is one JSON blob under `webos.docs.<collection>` holding the id sequence
//! and every document.

use std::collections::BTreeMap;

use platform_host::{DocumentId, DocumentStore, DocumentStoreFuture};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const KEY_PREFIX: &str = "webos.docs.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct StoredCollection {
    #[serde(default)]
    last_id: DocumentId,
    #[serde(default)]
    documents: BTreeMap<DocumentId, Value>,
}

impl StoredCollection {
    /// Decodes a stored blob. A corrupt blob reads as an empty collection.
    pub(crate) fn decode(raw: Option<&str>) -> Self {
        raw.and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    pub(crate) fn encode(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }

    fn allocate(&mut self) -> DocumentId {
        self.last_id = self.last_id.saturating_add(1);
        self.last_id
    }

    fn put(&mut self, id: DocumentId, document: Value) {
        self.last_id = self.last_id.max(id);
        self.documents.insert(id, document);
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn collection_key(collection: &str) -> String {
    format!("{KEY_PREFIX}{collection}")
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser document store. Outside `wasm32` every read is empty and every write fails.
pub struct WebDocumentStore;

impl WebDocumentStore {
    fn load(self, collection: &str) -> Result<StoredCollection, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let raw = super::read_item(&collection_key(collection))?;
            Ok(StoredCollection::decode(raw.as_deref()))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = collection;
            Ok(StoredCollection::default())
        }
    }

    fn store(self, collection: &str, stored: &StoredCollection) -> Result<(), String> {
        let raw = stored.encode()?;
        #[cfg(target_arch = "wasm32")]
        {
            super::write_item(&collection_key(collection), &raw)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (collection, raw);
            Err("localStorage unavailable".to_string())
        }
    }
}

impl DocumentStore for WebDocumentStore {
    fn allocate_id<'a>(
        &'a self,
        collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<DocumentId, String>> {
        let store = *self;
        Box::pin(async move {
            let mut stored = store.load(collection)?;
            let id = stored.allocate();
            store.store(collection, &stored)?;
            Ok(id)
        })
    }

    fn get_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<Option<Value>, String>> {
        let store = *self;
        Box::pin(async move { Ok(store.load(collection)?.documents.remove(&id)) })
    }

    fn put_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
        document: &'a Value,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move {
            let mut stored = store.load(collection)?;
            stored.put(id, document.clone());
            store.store(collection, &stored)
        })
    }

    fn delete_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move {
            let mut stored = store.load(collection)?;
            if stored.documents.remove(&id).is_none() {
                return Ok(());
            }
            store.store(collection, &stored)
        })
    }

    fn list_documents<'a>(
        &'a self,
        collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Vec<(DocumentId, Value)>, String>> {
        let store = *self;
        Box::pin(async move { Ok(store.load(collection)?.documents.into_iter().collect()) })
    }
}
