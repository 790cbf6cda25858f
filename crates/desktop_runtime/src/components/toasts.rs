use desktop_app_contract::NotificationKind;

use super::*;

fn toast_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "toast toast-info",
        NotificationKind::Success => "toast toast-success",
        NotificationKind::Warning => "toast toast-warning",
        NotificationKind::Error => "toast toast-error",
    }
}

#[component]
pub(super) fn NotificationToasts() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let notifications = create_memo(move |_| runtime.state.with(|state| state.notifications.clone()));

    view! {
        <div class="toast-stack" aria-live="polite">
            <For each=move || notifications.get() key=|notification| notification.id let:notification>
                {
                    let id = notification.id;
                    view! {
                        <div class=toast_class(notification.kind) role="status">
                            <div class="toast-text">
                                <strong>{notification.title}</strong>
                                <p>{notification.message}</p>
                            </div>
                            <button
                                type="button"
                                class="toast-dismiss"
                                aria-label="Dismiss notification"
                                on:click=move |ev| {
                                    stop_mouse_event(&ev);
                                    runtime.dispatch_action(DesktopAction::DismissNotification { id });
                                }
                            >
                                "\u{2715}"
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
