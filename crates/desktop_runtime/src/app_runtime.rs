//! Per-window app sessions owned by the desktop shell.
//!
//! Each open window gets one lifecycle signal. The app mounted in the window reads it through
//! [`desktop_app_contract::AppMountContext::lifecycle`]; the effect executor writes to it.

use std::collections::{BTreeSet, HashMap};

use desktop_app_contract::AppLifecycleEvent;
use leptos::*;

use crate::model::{WindowId, WindowRecord};

#[derive(Default)]
/// Runtime-owned lifecycle signals keyed by window.
pub struct AppRuntimeState {
    sessions: HashMap<WindowId, RwSignal<AppLifecycleEvent>>,
}

impl AppRuntimeState {
    fn ensure_session(&mut self, owner: Owner, window_id: WindowId) -> RwSignal<AppLifecycleEvent> {
        *self
            .sessions
            .entry(window_id)
            .or_insert_with(|| with_owner(owner, || create_rw_signal(AppLifecycleEvent::Mounted)))
    }

    fn sync_windows(&mut self, owner: Owner, windows: &[WindowRecord]) {
        let active: BTreeSet<WindowId> = windows.iter().map(|win| win.id).collect();
        for window_id in &active {
            self.ensure_session(owner, *window_id);
        }
        self.sessions.retain(|window_id, _| active.contains(window_id));
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Ensures and returns the lifecycle signal for `window_id`.
pub fn ensure_window_session(
    runtime_state: RwSignal<AppRuntimeState>,
    owner: Owner,
    window_id: WindowId,
) -> RwSignal<AppLifecycleEvent> {
    if let Some(session) =
        runtime_state.with_untracked(|state| state.sessions.get(&window_id).copied())
    {
        return session;
    }
    let mut session = None;
    runtime_state.update_untracked(|state| {
        session = Some(state.ensure_session(owner, window_id));
    });
    session.unwrap_or_else(|| create_rw_signal(AppLifecycleEvent::Mounted))
}

/// Adds sessions for new windows and drops sessions of removed ones.
pub fn sync_runtime_sessions(
    runtime_state: RwSignal<AppRuntimeState>,
    owner: Owner,
    windows: &[WindowRecord],
) {
    runtime_state.update_untracked(|state| state.sync_windows(owner, windows));
}

/// Publishes a lifecycle event to the app mounted in `window_id`.
pub fn set_window_lifecycle(
    runtime_state: RwSignal<AppRuntimeState>,
    owner: Owner,
    window_id: WindowId,
    event: AppLifecycleEvent,
) {
    ensure_window_session(runtime_state, owner, window_id).set(event);
}
