//! Desktop window manager runtime: state model, reducer, and the Leptos shell around it.

mod app_runtime;
pub mod apps;
pub mod components;
mod effect_executor;
pub mod headless;
mod host;
pub mod icons;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod wallpaper;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use headless::HeadlessDesktop;
pub use model::*;
pub use persistence::{load_desktop_snapshot, persist_desktop_snapshot, DESKTOP_STATE_KEY};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
