//! Runtime-effect dispatch for the desktop host boundary.

use std::time::Duration;

use leptos::{set_timeout, SignalGetUntracked};

use crate::{
    app_runtime::set_window_lifecycle,
    host::{host_ui, persistence_effects, DesktopHostContext},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

pub(super) fn run_runtime_effect(
    host: DesktopHostContext,
    runtime: DesktopRuntimeContext,
    effect: RuntimeEffect,
) {
    match effect {
        RuntimeEffect::PersistDesktop => persistence_effects::persist_desktop(host, runtime),
        RuntimeEffect::ApplyTheme => {
            host_ui::apply_theme(&runtime.state.get_untracked().settings);
        }
        RuntimeEffect::DispatchAfter { delay_ms, action } => {
            set_timeout(
                move || runtime.dispatch_action(*action),
                Duration::from_millis(u64::from(delay_ms)),
            );
        }
        RuntimeEffect::FocusWindowInput(window_id) => host.focus_window_input(window_id),
        RuntimeEffect::Lifecycle { window_id, event } => {
            set_window_lifecycle(runtime.app_runtime, runtime.owner, window_id, event);
        }
    }
}
