//! Simulated browser: a tab strip over the persisted tab list.

use desktop_app_contract::AppMountContext;
use leptos::*;
use platform_host::{close_tab, load_tabs, new_tab, save_tabs, BrowserTab, HostServices};

pub(super) fn mount_browser(context: AppMountContext) -> View {
    view! { <BrowserApp host=context.host /> }.into_view()
}

fn persist(host: StoredValue<HostServices>, tabs: Vec<BrowserTab>) {
    let prefs = host.with_value(|host| host.prefs.clone());
    spawn_local(async move {
        if let Err(err) = save_tabs(prefs.as_ref(), &tabs).await {
            logging::warn!("browser tabs save failed: {err}");
        }
    });
}

#[component]
fn BrowserApp(host: HostServices) -> impl IntoView {
    let tabs = create_rw_signal(Vec::<BrowserTab>::new());
    let active = create_rw_signal::<Option<String>>(None);
    let address = create_rw_signal(String::new());

    let prefs = host.prefs.clone();
    let host = store_value(host);
    spawn_local(async move {
        match load_tabs(prefs.as_ref()).await {
            Ok(loaded) => {
                active.set(loaded.first().map(|tab| tab.id.clone()));
                address.set(loaded.first().map(|tab| tab.url.clone()).unwrap_or_default());
                tabs.set(loaded);
            }
            Err(err) => logging::warn!("browser tabs load failed: {err}"),
        }
    });

    let select = move |id: String| {
        let url = tabs.with_untracked(|tabs| {
            tabs.iter()
                .find(|tab| tab.id == id)
                .map(|tab| tab.url.clone())
        });
        address.set(url.unwrap_or_default());
        active.set(Some(id));
    };

    let on_new_tab = move |_| {
        let tab = new_tab();
        let id = tab.id.clone();
        tabs.update(|tabs| tabs.push(tab));
        persist(host, tabs.get_untracked());
        select(id);
    };

    let on_close_tab = move |id: String| {
        let remaining = close_tab(&tabs.get_untracked(), &id);
        let next = remaining.first().map(|tab| tab.id.clone());
        tabs.set(remaining);
        persist(host, tabs.get_untracked());
        if active.get_untracked().as_deref() == Some(id.as_str()) {
            match next {
                Some(next) => select(next),
                None => {
                    active.set(None);
                    address.set(String::new());
                }
            }
        }
    };

    let on_navigate = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = active.get_untracked() else {
            return;
        };
        let url = address.get_untracked().trim().to_string();
        if url.is_empty() {
            return;
        }
        tabs.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|tab| tab.id == id) {
                tab.url = url;
            }
        });
        persist(host, tabs.get_untracked());
    };

    view! {
        <div class="app-shell app-browser-shell">
            <div class="app-tabstrip" role="tablist">
                <For each=move || tabs.get() key=|tab| tab.id.clone() let:tab>
                    {
                        let id = tab.id;
                        let label_id = id.clone();
                        let selected_id = id.clone();
                        let close_id = id.clone();
                        view! {
                            <div
                                class="app-tab"
                                role="tab"
                                aria-selected=move || (active.get().as_deref() == Some(selected_id.as_str())).to_string()
                                on:click=move |_| select(id.clone())
                            >
                                <span>
                                    {move || tabs.with(|tabs| {
                                        tabs.iter()
                                            .find(|tab| tab.id == label_id)
                                            .map(|tab| tab.url.clone())
                                            .unwrap_or_default()
                                    })}
                                </span>
                                <button
                                    type="button"
                                    class="app-tab-close"
                                    aria-label="Close tab"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        on_close_tab(close_id.clone());
                                    }
                                >
                                    "x"
                                </button>
                            </div>
                        }
                    }
                </For>
                <button type="button" class="app-action" aria-label="New tab" on:click=on_new_tab>
                    "+"
                </button>
            </div>
            <form class="app-toolbar" on:submit=on_navigate>
                <input
                    class="app-address"
                    type="text"
                    aria-label="Address"
                    prop:value=move || address.get()
                    on:input=move |ev| address.set(event_target_value(&ev))
                />
            </form>
            <div class="app-browser-page">
                <Show
                    when=move || active.get().is_some()
                    fallback=|| view! { <p class="app-empty">"No open tabs"</p> }
                >
                    <p>{move || format!("Simulated page for {}", address.get())}</p>
                </Show>
            </div>
        </div>
    }
}
