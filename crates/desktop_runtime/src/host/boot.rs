use leptos::{logging, spawn_local, Callable, Callback};

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    dispatch.call(DesktopAction::SetViewport {
        viewport: host.desktop_viewport(),
    });
    dispatch.call(DesktopAction::StartBoot);

    spawn_local(async move {
        let prefs = host.prefs_store();
        let snapshot = persistence::load_desktop_snapshot(prefs.as_ref()).await;
        logging::log!(
            "desktop snapshot hydrated via {} host ({} icons)",
            host.host_strategy_name(),
            snapshot.desktop_icons.len()
        );
        dispatch.call(DesktopAction::HydrateSnapshot { snapshot });
    });
}
