//! Persistence contracts: key/value prefs and collection-keyed documents.

pub mod documents;
pub mod prefs;
