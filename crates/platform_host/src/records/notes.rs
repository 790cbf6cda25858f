//! Notes stored in the `notes` document collection.

use serde::{Deserialize, Serialize};

use crate::{
    storage::documents::{
        get_document_typed, list_documents_typed, put_document_typed, DocumentId,
        DocumentStore,
    },
    time::next_monotonic_timestamp_ms,
};

/// Collection name for notes.
pub const NOTES_COLLECTION: &str = "notes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One note.
pub struct NoteRecord {
    /// Store-assigned id.
    pub id: DocumentId,
    /// Title line.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Pinned notes sort to the top of the notes app.
    #[serde(default)]
    pub pinned: bool,
    /// Archived notes are hidden from search.
    #[serde(default)]
    pub archived: bool,
    /// Creation time (unix ms).
    pub created_at_ms: u64,
    /// Last modification time (unix ms).
    pub modified_at_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Partial update applied by [`NoteRecords::update`].
#[allow(missing_docs)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub pinned: Option<bool>,
    pub archived: Option<bool>,
}

/// Note operations over a [`DocumentStore`].
#[derive(Clone, Copy)]
pub struct NoteRecords<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> NoteRecords<'a> {
    /// Wraps `store`.
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Lists every note, most recently modified first.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn list(&self) -> Result<Vec<NoteRecord>, String> {
        let mut notes: Vec<NoteRecord> = list_documents_typed(self.store, NOTES_COLLECTION).await?;
        notes.sort_by(|a, b| b.modified_at_ms.cmp(&a.modified_at_ms));
        Ok(notes)
    }

    /// Loads one note.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn get(&self, id: DocumentId) -> Result<Option<NoteRecord>, String> {
        get_document_typed(self.store, NOTES_COLLECTION, id).await
    }

    /// Creates an empty "Untitled Note".
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn create(&self) -> Result<NoteRecord, String> {
        let id = self.store.allocate_id(NOTES_COLLECTION).await?;
        let now = next_monotonic_timestamp_ms();
        let note = NoteRecord {
            id,
            title: "Untitled Note".to_string(),
            content: String::new(),
            tags: Vec::new(),
            pinned: false,
            archived: false,
            created_at_ms: now,
            modified_at_ms: now,
        };
        put_document_typed(self.store, NOTES_COLLECTION, id, &note).await?;
        Ok(note)
    }

    /// Applies `patch` and bumps the modification time.
    ///
    /// # Errors
    ///
    /// Returns an error when the note does not exist or the store fails.
    pub async fn update(&self, id: DocumentId, patch: NotePatch) -> Result<NoteRecord, String> {
        let mut note = self
            .get(id)
            .await?
            .ok_or_else(|| format!("note {id} not found"))?;
        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(tags) = patch.tags {
            note.tags = tags;
        }
        if let Some(pinned) = patch.pinned {
            note.pinned = pinned;
        }
        if let Some(archived) = patch.archived {
            note.archived = archived;
        }
        note.modified_at_ms = next_monotonic_timestamp_ms();
        put_document_typed(self.store, NOTES_COLLECTION, id, &note).await?;
        Ok(note)
    }

    /// Deletes one note.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn delete(&self, id: DocumentId) -> Result<(), String> {
        self.store.delete_document(NOTES_COLLECTION, id).await
    }

    /// Case-insensitive search over title and content, skipping archived notes.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn search(&self, query: &str) -> Result<Vec<NoteRecord>, String> {
        let needle = query.to_lowercase();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|n| {
                !n.archived
                    && (n.title.to_lowercase().contains(&needle)
                        || n.content.to_lowercase().contains(&needle))
            })
            .collect())
    }
}
