//! Record services used by the built-in apps.
//!
//! Each service owns one logically partitioned collection or prefs key. The window manager
//! never reads these records.

pub mod files;
pub mod notes;
pub mod tabs;
pub mod tasks;
