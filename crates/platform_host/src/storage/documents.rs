//! Collection-keyed document storage.
//!
//! Records are JSON documents addressed by `(collection, id)`. Every collection owns an id
//! sequence that only moves forward, so a deleted id is never handed out again.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    future::Future,
    pin::Pin,
    rc::Rc,
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Numeric document id, unique within its collection.
pub type DocumentId = u64;

/// Object-safe boxed future used by [`DocumentStore`] async methods.
pub type DocumentStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for independently keyed JSON records.
pub trait DocumentStore {
    /// Reserves the next id for `collection`.
    fn allocate_id<'a>(
        &'a self,
        collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<DocumentId, String>>;

    /// Loads one document.
    fn get_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<Option<Value>, String>>;

    /// Inserts or replaces one document.
    fn put_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
        document: &'a Value,
    ) -> DocumentStoreFuture<'a, Result<(), String>>;

    /// Removes one document. Removing a missing id succeeds.
    fn delete_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<(), String>>;

    /// Lists every document of `collection` in ascending id order.
    fn list_documents<'a>(
        &'a self,
        collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Vec<(DocumentId, Value)>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store without backing storage. Reads are empty and writes are dropped.
pub struct NoopDocumentStore;

impl DocumentStore for NoopDocumentStore {
    fn allocate_id<'a>(
        &'a self,
        _collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<DocumentId, String>> {
        Box::pin(async { Err("document store unavailable".to_string()) })
    }

    fn get_document<'a>(
        &'a self,
        _collection: &'a str,
        _id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<Option<Value>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn put_document<'a>(
        &'a self,
        _collection: &'a str,
        _id: DocumentId,
        _document: &'a Value,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_document<'a>(
        &'a self,
        _collection: &'a str,
        _id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn list_documents<'a>(
        &'a self,
        _collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Vec<(DocumentId, Value)>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[derive(Debug, Default)]
struct Collection {
    last_id: DocumentId,
    documents: BTreeMap<DocumentId, Value>,
}

#[derive(Debug, Clone, Default)]
/// In-memory document store; clones share the same collections.
pub struct MemoryDocumentStore {
    collections: Rc<RefCell<HashMap<String, Collection>>>,
}

impl DocumentStore for MemoryDocumentStore {
    fn allocate_id<'a>(
        &'a self,
        collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<DocumentId, String>> {
        Box::pin(async move {
            let mut collections = self.collections.borrow_mut();
            let entry = collections.entry(collection.to_string()).or_default();
            entry.last_id = entry.last_id.saturating_add(1);
            Ok(entry.last_id)
        })
    }

    fn get_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<Option<Value>, String>> {
        Box::pin(async move {
            Ok(self
                .collections
                .borrow()
                .get(collection)
                .and_then(|entry| entry.documents.get(&id).cloned()))
        })
    }

    fn put_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
        document: &'a Value,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut collections = self.collections.borrow_mut();
            let entry = collections.entry(collection.to_string()).or_default();
            entry.last_id = entry.last_id.max(id);
            entry.documents.insert(id, document.clone());
            Ok(())
        })
    }

    fn delete_document<'a>(
        &'a self,
        collection: &'a str,
        id: DocumentId,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if let Some(entry) = self.collections.borrow_mut().get_mut(collection) {
                entry.documents.remove(&id);
            }
            Ok(())
        })
    }

    fn list_documents<'a>(
        &'a self,
        collection: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Vec<(DocumentId, Value)>, String>> {
        Box::pin(async move {
            Ok(self
                .collections
                .borrow()
                .get(collection)
                .map(|entry| {
                    entry
                        .documents
                        .iter()
                        .map(|(id, doc)| (*id, doc.clone()))
                        .collect()
                })
                .unwrap_or_default())
        })
    }
}

/// Loads and deserializes one document.
///
/// # Errors
///
/// Returns an error when the store fails or the document does not match `T`.
pub async fn get_document_typed<S: DocumentStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    collection: &str,
    id: DocumentId,
) -> Result<Option<T>, String> {
    let Some(raw) = store.get_document(collection, id).await? else {
        return Ok(None);
    };
    serde_json::from_value(raw)
        .map(Some)
        .map_err(|e| format!("malformed {collection}#{id}: {e}"))
}

/// Serializes and stores one document.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn put_document_typed<S: DocumentStore + ?Sized, T: Serialize>(
    store: &S,
    collection: &str,
    id: DocumentId,
    document: &T,
) -> Result<(), String> {
    let raw = serde_json::to_value(document).map_err(|e| e.to_string())?;
    store.put_document(collection, id, &raw).await
}

/// Lists a collection, skipping documents that no longer deserialize as `T`.
///
/// # Errors
///
/// Returns an error when the store fails.
pub async fn list_documents_typed<S: DocumentStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    collection: &str,
) -> Result<Vec<T>, String> {
    let raw = store.list_documents(collection).await?;
    Ok(raw
        .into_iter()
        .filter_map(|(_, doc)| serde_json::from_value(doc).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn ids_are_never_reused_after_delete() {
        let store = MemoryDocumentStore::default();
        let first = block_on(store.allocate_id("files")).expect("id");
        block_on(store.put_document("files", first, &json!({"n": 1}))).expect("put");
        block_on(store.delete_document("files", first)).expect("delete");
        let second = block_on(store.allocate_id("files")).expect("id");
        assert!(second > first);
    }

    #[test]
    fn collections_are_partitioned() {
        let store = MemoryDocumentStore::default();
        block_on(store.put_document("files", 1, &json!("file"))).expect("put");
        block_on(store.put_document("notes", 1, &json!("note"))).expect("put");

        assert_eq!(
            block_on(store.get_document("files", 1)).expect("get"),
            Some(json!("file"))
        );
        assert_eq!(
            block_on(store.list_documents("notes")).expect("list"),
            vec![(1, json!("note"))]
        );
        assert_eq!(block_on(store.list_documents("tabs")).expect("list"), Vec::new());
    }

    #[test]
    fn explicit_put_advances_the_sequence() {
        let store = MemoryDocumentStore::default();
        block_on(store.put_document("notes", 7, &json!({}))).expect("put");
        assert_eq!(block_on(store.allocate_id("notes")).expect("id"), 8);
    }

    #[test]
    fn typed_listing_skips_foreign_documents() {
        let store = MemoryDocumentStore::default();
        block_on(put_document_typed(&store, "nums", 1, &5u32)).expect("put");
        block_on(store.put_document("nums", 2, &json!("five"))).expect("put");
        let nums: Vec<u32> = block_on(list_documents_typed(&store, "nums")).expect("list");
        assert_eq!(nums, vec![5]);

        let err = block_on(get_document_typed::<_, u32>(&store, "nums", 2)).expect_err("bad doc");
        assert!(err.contains("nums#2"));
    }
}
