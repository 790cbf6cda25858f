//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! The reducer stays pure; everything that touches storage, timers, or the DOM is routed through
//! [`DesktopHostContext`].

mod boot;
mod effects;
mod host_ui;
mod persistence_effects;

pub use host_ui::window_primary_input_dom_id;

use std::rc::Rc;

use leptos::Callback;
use platform_host::{DocumentStore, HostServices, PrefsStore};

use crate::{
    model::{Viewport, WindowId},
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    services: HostServices,
}

impl DesktopHostContext {
    /// Wraps the services assembled by the entry layer.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Returns the full service bundle handed to mounted apps.
    pub fn host_services(&self) -> HostServices {
        self.services.clone()
    }

    /// Returns the configured lightweight preference service.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.services.prefs.clone()
    }

    /// Returns the configured document service.
    pub fn document_store(&self) -> Rc<dyn DocumentStore> {
        self.services.documents.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.strategy_name
    }

    /// Starts the boot sequence and hydrates the persisted desktop snapshot.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        effects::run_runtime_effect(self.clone(), runtime, effect);
    }

    /// Moves keyboard focus into the primary input of a window, if it has one.
    pub fn focus_window_input(&self, window_id: WindowId) {
        host_ui::focus_window_input(window_id);
    }

    /// Returns the current browser viewport.
    pub fn desktop_viewport(&self) -> Viewport {
        host_ui::desktop_viewport()
    }
}
