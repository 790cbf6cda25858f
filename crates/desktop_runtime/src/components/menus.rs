use desktop_app_contract::{AppRegistration, ApplicationId};
use platform_host::FileRecords;

use super::*;
use crate::{apps, model::OpenWindowRequest};

pub(super) const CONTEXT_MENU_WIDTH_PX: i32 = 200;
pub(super) const CONTEXT_MENU_HEIGHT_PX: i32 = 96;

const START_MENU_ID: &str = "start-menu";
const CONTEXT_MENU_ID: &str = "desktop-context-menu";

/// Start menu entries whose display name contains `query`, ignoring case.
fn filter_start_menu_apps(query: &str) -> Vec<&'static AppRegistration> {
    let needle = query.trim().to_lowercase();
    apps::start_menu_apps()
        .into_iter()
        .filter(|app| needle.is_empty() || app.display_name.to_lowercase().contains(&needle))
        .collect()
}

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let open = create_memo(move |_| state.with(|state| state.start_menu_open));
    let username = create_memo(move |_| state.with(|state| state.settings.username.clone()));
    let query = create_rw_signal(String::new());

    create_effect(move |was_open: Option<bool>| {
        let is_open = open.get();
        if is_open && was_open != Some(true) {
            query.set(String::new());
            let _ = focus_first_menu_item(START_MENU_ID);
        }
        is_open
    });

    let launch = move |app_id: ApplicationId| {
        query.set(String::new());
        runtime.dispatch_action(DesktopAction::OpenWindow(OpenWindowRequest::new(app_id)));
    };

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div
                id=START_MENU_ID
                class="start-menu"
                role="menu"
                aria-label="Start menu"
                on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    let _ = handle_menu_roving_keydown(&ev, START_MENU_ID);
                }
            >
                <div class="start-menu-user">{move || username.get()}</div>
                <input
                    class="start-menu-search"
                    type="search"
                    placeholder="Search apps"
                    aria-label="Search apps"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <div class="start-menu-apps">
                    <For
                        each=move || filter_start_menu_apps(&query.get())
                        key=|app| app.app_id.to_string()
                        let:app
                    >
                        {
                            let app_id = app.app_id.clone();
                            view! {
                                <button
                                    type="button"
                                    role="menuitem"
                                    class="start-menu-item"
                                    data-icon=app.icon_id.clone()
                                    on:click=move |_| launch(app_id.clone())
                                >
                                    {app.display_name.clone()}
                                </button>
                            }
                        }
                    </For>
                    <Show
                        when=move || query.with(|query| filter_start_menu_apps(query).is_empty())
                        fallback=|| ()
                    >
                        <p class="start-menu-empty">"No apps found"</p>
                    </Show>
                </div>
            </div>
        </Show>
    }
}

fn create_desktop_folder(runtime: DesktopRuntimeContext) {
    let documents = runtime.host.with_value(|host| host.document_store());
    spawn_local(async move {
        match FileRecords::new(documents.as_ref())
            .create_folder("New Folder", None)
            .await
        {
            Ok(folder) => logging::log!("created folder {} at root", folder.id),
            Err(err) => logging::warn!("create desktop folder failed: {err}"),
        }
    });
}

#[component]
pub(super) fn DesktopContextMenu(menu: RwSignal<Option<DesktopContextMenuState>>) -> impl IntoView {
    let runtime = use_desktop_runtime();

    create_effect(move |was_open: Option<bool>| {
        let is_open = menu.with(Option::is_some);
        if is_open && was_open != Some(true) {
            let _ = focus_first_menu_item(CONTEXT_MENU_ID);
        }
        is_open
    });

    view! {
        {move || {
            menu.get()
                .map(|position| {
                    view! {
                        <div
                            id=CONTEXT_MENU_ID
                            class="context-menu"
                            role="menu"
                            aria-label="Desktop context menu"
                            style=format!("left:{}px;top:{}px;", position.x, position.y)
                            on:click=move |ev| ev.stop_propagation()
                            on:contextmenu=move |ev| stop_mouse_event(&ev)
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                let _ = handle_menu_roving_keydown(&ev, CONTEXT_MENU_ID);
                            }
                        >
                            <button
                                type="button"
                                role="menuitem"
                                class="context-menu-item"
                                on:click=move |ev| {
                                    stop_mouse_event(&ev);
                                    menu.set(None);
                                    create_desktop_folder(runtime);
                                }
                            >
                                "New Folder"
                            </button>
                            <div class="context-menu-separator" role="separator"></div>
                            <button
                                type="button"
                                role="menuitem"
                                class="context-menu-item"
                                on:click=move |ev| {
                                    stop_mouse_event(&ev);
                                    menu.set(None);
                                    open_system_settings(runtime);
                                }
                            >
                                "Personalize"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
