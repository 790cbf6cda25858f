//! Virtual filesystem records stored in the `files` document collection.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    storage::documents::{
        get_document_typed, list_documents_typed, put_document_typed, DocumentId,
        DocumentStore,
    },
    time::next_monotonic_timestamp_ms,
};

/// Collection name for filesystem records.
pub const FILES_COLLECTION: &str = "files";

const ROOT_FOLDERS: [&str; 6] = [
    "Desktop",
    "Documents",
    "Downloads",
    "Pictures",
    "Music",
    "Videos",
];

const WELCOME_TEXT: &str = "Welcome to WebOS!

This is a browser-based desktop simulation.

- Open apps from the desktop, the start menu, or the taskbar
- Drag windows by their title bar and resize them from any edge
- Files, notes, and settings are stored locally in this browser
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// File or folder.
pub enum FileKind {
    /// Leaf record with content.
    File,
    /// Container record.
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One filesystem item.
pub struct FileRecord {
    /// Store-assigned id.
    pub id: DocumentId,
    /// Display name.
    pub name: String,
    /// File or folder.
    pub kind: FileKind,
    /// Containing folder; `None` for root items.
    pub parent_id: Option<DocumentId>,
    /// Text content for files.
    #[serde(default)]
    pub content: String,
    /// MIME type for files.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Content length in bytes.
    pub size: u64,
    /// Creation time (unix ms).
    pub created_at_ms: u64,
    /// Last modification time (unix ms).
    pub modified_at_ms: u64,
    /// Whether the item sits in the trash.
    #[serde(default)]
    pub deleted: bool,
    /// When the item was trashed.
    #[serde(default)]
    pub deleted_at_ms: Option<u64>,
    /// Whether the item is pinned to favorites.
    #[serde(default)]
    pub favorite: bool,
}

impl FileRecord {
    /// Returns `true` for folders.
    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Partial update applied by [`FileRecords::update`].
pub struct FilePatch {
    /// New name.
    pub name: Option<String>,
    /// New text content; also recomputes `size`.
    pub content: Option<String>,
    /// New favorite flag.
    pub favorite: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Aggregate counts over non-trashed items.
pub struct StorageStats {
    /// Sum of item sizes in bytes.
    pub used_bytes: u64,
    /// Number of files.
    pub file_count: usize,
    /// Number of folders.
    pub folder_count: usize,
}

/// Filesystem operations over a [`DocumentStore`].
#[derive(Clone, Copy)]
pub struct FileRecords<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> FileRecords<'a> {
    /// Wraps `store`.
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    async fn all(&self) -> Result<Vec<FileRecord>, String> {
        list_documents_typed(self.store, FILES_COLLECTION).await
    }

    async fn save(&self, record: &FileRecord) -> Result<(), String> {
        put_document_typed(self.store, FILES_COLLECTION, record.id, record).await
    }

    async fn insert(
        &self,
        name: &str,
        kind: FileKind,
        parent_id: Option<DocumentId>,
        content: String,
        mime_type: Option<String>,
        favorite: bool,
    ) -> Result<FileRecord, String> {
        let id = self.store.allocate_id(FILES_COLLECTION).await?;
        let now = next_monotonic_timestamp_ms();
        let record = FileRecord {
            id,
            name: name.to_string(),
            kind,
            parent_id,
            size: content.len() as u64,
            content,
            mime_type,
            created_at_ms: now,
            modified_at_ms: now,
            deleted: false,
            deleted_at_ms: None,
            favorite,
        };
        self.save(&record).await?;
        Ok(record)
    }

    /// Creates the default root folders and welcome file when the collection is empty.
    ///
    /// Returns `true` when seeding happened.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn seed_defaults(&self) -> Result<bool, String> {
        if !self.store.list_documents(FILES_COLLECTION).await?.is_empty() {
            return Ok(false);
        }
        let mut documents_id = None;
        for name in ROOT_FOLDERS {
            let folder = self
                .insert(name, FileKind::Folder, None, String::new(), None, true)
                .await?;
            if name == "Documents" {
                documents_id = Some(folder.id);
            }
        }
        self.insert(
            "Welcome.txt",
            FileKind::File,
            documents_id,
            WELCOME_TEXT.to_string(),
            Some("text/plain".to_string()),
            false,
        )
        .await?;
        Ok(true)
    }

    /// Lists the children of `parent_id`, folders first, then by case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn children(
        &self,
        parent_id: Option<DocumentId>,
        include_deleted: bool,
    ) -> Result<Vec<FileRecord>, String> {
        let mut children: Vec<FileRecord> = self
            .all()
            .await?
            .into_iter()
            .filter(|f| f.parent_id == parent_id && (include_deleted || !f.deleted))
            .collect();
        sort_listing(&mut children);
        Ok(children)
    }

    /// Loads one item.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn get(&self, id: DocumentId) -> Result<Option<FileRecord>, String> {
        get_document_typed(self.store, FILES_COLLECTION, id).await
    }

    async fn require(&self, id: DocumentId) -> Result<FileRecord, String> {
        self.get(id)
            .await?
            .ok_or_else(|| format!("file {id} not found"))
    }

    /// Creates a text file.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn create_file(
        &self,
        name: &str,
        parent_id: Option<DocumentId>,
        content: &str,
        mime_type: Option<&str>,
    ) -> Result<FileRecord, String> {
        self.insert(
            name,
            FileKind::File,
            parent_id,
            content.to_string(),
            Some(mime_type.unwrap_or("text/plain").to_string()),
            false,
        )
        .await
    }

    /// Creates an empty folder.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<DocumentId>,
    ) -> Result<FileRecord, String> {
        self.insert(name, FileKind::Folder, parent_id, String::new(), None, false)
            .await
    }

    /// Applies `patch` and bumps the modification time.
    ///
    /// # Errors
    ///
    /// Returns an error when the item does not exist or the store fails.
    pub async fn update(&self, id: DocumentId, patch: FilePatch) -> Result<FileRecord, String> {
        let mut record = self.require(id).await?;
        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(content) = patch.content {
            record.size = content.len() as u64;
            record.content = content;
        }
        if let Some(favorite) = patch.favorite {
            record.favorite = favorite;
        }
        record.modified_at_ms = next_monotonic_timestamp_ms();
        self.save(&record).await?;
        Ok(record)
    }

    /// Moves an item to the trash.
    ///
    /// # Errors
    ///
    /// Returns an error when the item does not exist or the store fails.
    pub async fn soft_delete(&self, id: DocumentId) -> Result<(), String> {
        let mut record = self.require(id).await?;
        record.deleted = true;
        record.deleted_at_ms = Some(next_monotonic_timestamp_ms());
        self.save(&record).await
    }

    /// Takes an item back out of the trash.
    ///
    /// # Errors
    ///
    /// Returns an error when the item does not exist or the store fails.
    pub async fn restore(&self, id: DocumentId) -> Result<(), String> {
        let mut record = self.require(id).await?;
        record.deleted = false;
        record.deleted_at_ms = None;
        self.save(&record).await
    }

    /// Removes an item and every descendant.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn delete_permanently(&self, id: DocumentId) -> Result<(), String> {
        let all = self.all().await?;
        for victim in subtree_ids(&all, id) {
            self.store.delete_document(FILES_COLLECTION, victim).await?;
        }
        Ok(())
    }

    /// Lists trashed items.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn trash(&self) -> Result<Vec<FileRecord>, String> {
        Ok(self.all().await?.into_iter().filter(|f| f.deleted).collect())
    }

    /// Permanently removes every trashed item (and its descendants).
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn empty_trash(&self) -> Result<usize, String> {
        let all = self.all().await?;
        let mut victims = HashSet::new();
        for trashed in all.iter().filter(|f| f.deleted) {
            victims.extend(subtree_ids(&all, trashed.id));
        }
        for victim in &victims {
            self.store.delete_document(FILES_COLLECTION, *victim).await?;
        }
        Ok(victims.len())
    }

    /// Re-parents an item.
    ///
    /// # Errors
    ///
    /// Returns an error when the item does not exist, when the target lies inside the item
    /// itself, or when the store fails.
    pub async fn move_to(
        &self,
        id: DocumentId,
        new_parent_id: Option<DocumentId>,
    ) -> Result<(), String> {
        if let Some(target) = new_parent_id {
            let all = self.all().await?;
            if subtree_ids(&all, id).contains(&target) {
                return Err(format!("cannot move {id} into its own subtree"));
            }
        }
        let mut record = self.require(id).await?;
        record.parent_id = new_parent_id;
        record.modified_at_ms = next_monotonic_timestamp_ms();
        self.save(&record).await
    }

    /// Copies an item under `new_parent_id`, recursively for folders.
    ///
    /// The top-level copy is named `new_name` or `"<name> (Copy)"`; descendants keep their
    /// names. Trashed descendants are not copied.
    ///
    /// # Errors
    ///
    /// Returns an error when the item does not exist or the store fails.
    pub async fn copy(
        &self,
        id: DocumentId,
        new_parent_id: Option<DocumentId>,
        new_name: Option<&str>,
    ) -> Result<FileRecord, String> {
        let all = self.all().await?;
        let source = all
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| format!("file {id} not found"))?;
        let name = new_name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} (Copy)", source.name));

        let root = self
            .insert(
                &name,
                source.kind,
                new_parent_id,
                source.content.clone(),
                source.mime_type.clone(),
                false,
            )
            .await?;

        // (source folder, copied folder) pairs still to descend into.
        let mut pending = vec![(source.id, root.id)];
        while let Some((old_parent, new_parent)) = pending.pop() {
            for child in all
                .iter()
                .filter(|f| f.parent_id == Some(old_parent) && !f.deleted)
            {
                let copied = self
                    .insert(
                        &child.name,
                        child.kind,
                        Some(new_parent),
                        child.content.clone(),
                        child.mime_type.clone(),
                        false,
                    )
                    .await?;
                if child.is_folder() {
                    pending.push((child.id, copied.id));
                }
            }
        }
        Ok(root)
    }

    /// Case-insensitive substring search over names, excluding trashed items.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn search(
        &self,
        query: &str,
        parent_id: Option<Option<DocumentId>>,
    ) -> Result<Vec<FileRecord>, String> {
        let needle = query.to_lowercase();
        let mut hits: Vec<FileRecord> = self
            .all()
            .await?
            .into_iter()
            .filter(|f| !f.deleted && f.name.to_lowercase().contains(&needle))
            .filter(|f| parent_id.map_or(true, |parent| f.parent_id == parent))
            .collect();
        sort_listing(&mut hits);
        Ok(hits)
    }

    /// Lists favorite items that are not trashed.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn favorites(&self) -> Result<Vec<FileRecord>, String> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|f| f.favorite && !f.deleted)
            .collect())
    }

    /// Flips the favorite flag. Missing ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn toggle_favorite(&self, id: DocumentId) -> Result<(), String> {
        let Some(mut record) = self.get(id).await? else {
            return Ok(());
        };
        record.favorite = !record.favorite;
        self.save(&record).await
    }

    /// Counts non-trashed items.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn storage_stats(&self) -> Result<StorageStats, String> {
        Ok(self
            .all()
            .await?
            .iter()
            .filter(|f| !f.deleted)
            .fold(StorageStats::default(), |mut stats, f| {
                stats.used_bytes += f.size;
                match f.kind {
                    FileKind::File => stats.file_count += 1,
                    FileKind::Folder => stats.folder_count += 1,
                }
                stats
            }))
    }

    /// Returns the chain of items from the root down to `id` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn path(&self, id: DocumentId) -> Result<Vec<FileRecord>, String> {
        let all = self.all().await?;
        let by_id: HashMap<DocumentId, &FileRecord> = all.iter().map(|f| (f.id, f)).collect();
        let mut chain = Vec::new();
        let mut cursor = by_id.get(&id).copied();
        while let Some(item) = cursor {
            if chain.iter().any(|seen: &FileRecord| seen.id == item.id) {
                break;
            }
            chain.push(item.clone());
            cursor = item.parent_id.and_then(|parent| by_id.get(&parent).copied());
        }
        chain.reverse();
        Ok(chain)
    }
}

fn sort_listing(items: &mut [FileRecord]) {
    items.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

fn subtree_ids(all: &[FileRecord], root: DocumentId) -> Vec<DocumentId> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if out.contains(&id) {
            continue;
        }
        out.push(id);
        stack.extend(
            all.iter()
                .filter(|f| f.parent_id == Some(id))
                .map(|f| f.id),
        );
    }
    out
}
