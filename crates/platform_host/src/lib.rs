//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate owns the persistence boundary the window manager and the hosted apps talk to:
//! a lightweight key/value prefs store, a collection-keyed document store, and the record
//! services (files, notes, browser tabs, tasks) layered over them. Concrete browser adapters
//! live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod records;
pub mod storage;
pub mod time;

pub use host::HostServices;
pub use records::files::{
    FileKind, FilePatch, FileRecord, FileRecords, StorageStats, FILES_COLLECTION,
};
pub use records::notes::{NotePatch, NoteRecord, NoteRecords, NOTES_COLLECTION};
pub use records::tabs::{close_tab, load_tabs, new_tab, save_tabs, BrowserTab, BROWSER_TABS_KEY};
pub use records::tasks::{kill_task, list_tasks, register_task, TaskRecord, TASKS_KEY};
pub use storage::documents::{
    get_document_typed, list_documents_typed, put_document_typed, DocumentId, DocumentStore,
    DocumentStoreFuture, MemoryDocumentStore, NoopDocumentStore,
};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
pub use time::{next_monotonic_timestamp_ms, unique_token, unix_time_ms_now};
