//! Placeholder apps whose behavior is out of scope for the shell.

use desktop_app_contract::AppMountContext;
use leptos::*;

pub(super) fn mount_terminal(context: AppMountContext) -> View {
    let prompt = format!("user@webos:~$ (window {})", context.window_id);
    view! {
        <div class="app-shell app-terminal-shell">
            <pre class="app-terminal-output">
                "WebOS terminal\n"
                "Command execution is not available in this build.\n"
            </pre>
            <div class="app-statusbar">
                <span>{prompt}</span>
            </div>
        </div>
    }
    .into_view()
}

pub(super) fn mount_calculator(_: AppMountContext) -> View {
    let keys = [
        "7", "8", "9", "/", "4", "5", "6", "*", "1", "2", "3", "-", "0", ".", "=", "+",
    ];
    view! {
        <div class="app-shell app-calculator-shell">
            <output class="app-calculator-display">"0"</output>
            <div class="app-calculator-keys" role="group" aria-label="Calculator keys">
                {keys
                    .into_iter()
                    .map(|key| view! { <button type="button" class="app-action" disabled=true>{key}</button> })
                    .collect_view()}
            </div>
        </div>
    }
    .into_view()
}

pub(super) fn mount_image_viewer(context: AppMountContext) -> View {
    let source = context
        .launch_params
        .get("src")
        .and_then(|value| value.as_str())
        .map(str::to_string);
    view! {
        <div class="app-shell app-image-viewer-shell">
            {match source {
                Some(src) => view! { <img class="app-image" src=src alt="Opened image" /> }.into_view(),
                None => view! { <p class="app-empty">"No image selected"</p> }.into_view(),
            }}
        </div>
    }
    .into_view()
}
