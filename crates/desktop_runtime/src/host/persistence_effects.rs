use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_desktop(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let state = runtime.state.get_untracked();
    spawn_local(async move {
        let prefs = host.prefs_store();
        if let Err(err) = persistence::persist_desktop_snapshot(prefs.as_ref(), &state).await {
            logging::warn!("persist desktop snapshot failed: {err}");
        }
    });
}
