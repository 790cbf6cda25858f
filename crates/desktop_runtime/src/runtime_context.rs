//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, per-window app
//! sessions, and host bootstrap wiring. UI composition stays in [`crate::components`].

use leptos::*;
use platform_host::HostServices;

use crate::{
    app_runtime::{sync_runtime_sessions, AppRuntimeState},
    apps, effect_executor,
    host::DesktopHostContext,
    model::{DesktopState, InteractionState, OpenWindowRequest},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Long-lived reactive owner for per-window signals that must outlive transient app views.
    pub owner: Owner,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Per-window lifecycle signals.
    pub app_runtime: RwSignal<AppRuntimeState>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Injected host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(DesktopHostContext::new(host_services));
    let owner = Owner::current().expect("DesktopProvider owner");
    let state = create_rw_signal(DesktopState::with_default_icons());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let app_runtime = create_rw_signal(AppRuntimeState::default());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui.clone();

        match reduce_desktop(&mut desktop, &mut ui, action) {
            Ok(new_effects) => {
                if desktop.windows != previous_desktop.windows {
                    sync_runtime_sessions(app_runtime, owner, &desktop.windows);
                }
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        owner,
        state,
        interaction,
        effects,
        app_runtime,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    runtime.host.get_value().install_boot_hydration(runtime.dispatch);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

/// Opens Settings by focusing an existing window or creating a new one.
pub(crate) fn open_system_settings(runtime: DesktopRuntimeContext) {
    let app_id = apps::settings_id();
    let existing = runtime.state.with_untracked(|desktop| {
        desktop
            .windows
            .iter()
            .filter(|window| window.app_id == app_id && !window.closing)
            .max_by_key(|window| window.z_index)
            .map(|window| window.id)
    });
    match existing {
        Some(window_id) => runtime.dispatch_action(DesktopAction::FocusWindow { window_id }),
        None => runtime.dispatch_action(DesktopAction::OpenWindow(OpenWindowRequest::new(app_id))),
    }
}
