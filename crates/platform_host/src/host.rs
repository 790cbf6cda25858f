//! Host service bundle injected into the desktop runtime by the entry layer.

use std::rc::Rc;

use crate::{DocumentStore, MemoryDocumentStore, MemoryPrefsStore, PrefsStore};

/// Runtime-selected persistence services.
///
/// Environment-specific adapter selection happens before this bundle reaches
/// `desktop_runtime`, so the runtime never names a browser type.
#[derive(Clone)]
pub struct HostServices {
    /// Key/value store holding the desktop snapshot, browser tabs, and task list.
    pub prefs: Rc<dyn PrefsStore>,
    /// Document store holding file and note records.
    pub documents: Rc<dyn DocumentStore>,
    /// Stable adapter name for diagnostics.
    pub strategy_name: &'static str,
}

impl HostServices {
    /// Builds a bundle backed entirely by in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            prefs: Rc::new(MemoryPrefsStore::default()),
            documents: Rc::new(MemoryDocumentStore::default()),
            strategy_name: "memory",
        }
    }
}
