//! Browser (`wasm32`) implementations of [`platform_host`] storage contracts.
//!
//! Everything persists through `window.localStorage`: the prefs store maps keys directly,
//! and the document store keeps one JSON blob per collection. Native builds compile these
//! adapters to inert stand-ins so the runtime can be tested without a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod storage;

pub use adapters::{
    build_host_services, document_store, host_strategy_name, prefs_store,
    selected_host_strategy, DocumentStoreAdapter, HostStrategy, PrefsStoreAdapter,
};
pub use storage::local_documents::WebDocumentStore;
pub use storage::local_prefs::WebPrefsStore;
