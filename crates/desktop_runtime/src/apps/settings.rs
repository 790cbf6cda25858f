//! Settings app. It edits desktop-wide state, so it talks to the runtime context directly
//! instead of going through window-scoped app services.

use desktop_app_contract::AppMountContext;
use leptos::*;

use crate::{
    model::{IconSize, SettingsPatch, ThemeMode},
    reducer::{merge_settings, DesktopAction},
    runtime_context::use_desktop_runtime,
    wallpaper::{ACCENT_PRESETS, WALLPAPER_PRESETS},
};

pub(super) fn mount_settings(_: AppMountContext) -> View {
    view! { <SettingsApp /> }.into_view()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsSection {
    Personalization,
    Account,
    About,
}

impl SettingsSection {
    const ALL: [Self; 3] = [Self::Personalization, Self::Account, Self::About];

    const fn label(self) -> &'static str {
        match self {
            Self::Personalization => "Personalization",
            Self::Account => "Account",
            Self::About => "About",
        }
    }
}

#[component]
fn SettingsApp() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let settings = create_memo(move |_| runtime.state.with(|state| state.settings.clone()));
    let section = create_rw_signal(SettingsSection::Personalization);
    let username_draft = create_rw_signal(settings.get_untracked().username);
    let error = create_rw_signal::<Option<String>>(None);

    let apply = move |patch: SettingsPatch| {
        // Validated here as well so the error shows inline.
        match merge_settings(&settings.get_untracked(), &patch) {
            Ok(_) => {
                error.set(None);
                runtime.dispatch_action(DesktopAction::UpdateSettings { patch });
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    };

    let personalization = move || {
        view! {
            <section class="settings-section" aria-label="Personalization">
                <h3>"Wallpaper"</h3>
                <div class="settings-wallpapers" role="radiogroup" aria-label="Wallpaper">
                    {WALLPAPER_PRESETS
                        .iter()
                        .map(|preset| {
                            let id = preset.id;
                            view! {
                                <button
                                    type="button"
                                    class="settings-wallpaper"
                                    role="radio"
                                    aria-checked=move || settings.with(|s| s.wallpaper == id).to_string()
                                    style=format!("background: {}", preset.background)
                                    on:click=move |_| {
                                        apply(SettingsPatch {
                                            wallpaper: Some(id.to_string()),
                                            ..SettingsPatch::default()
                                        })
                                    }
                                >
                                    {preset.display_name}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <h3>"Theme"</h3>
                <div class="settings-row" role="radiogroup" aria-label="Theme">
                    {[(ThemeMode::Dark, "Dark"), (ThemeMode::Light, "Light")]
                        .into_iter()
                        .map(|(mode, label)| {
                            view! {
                                <button
                                    type="button"
                                    class="app-action"
                                    role="radio"
                                    aria-checked=move || settings.with(|s| s.theme == mode).to_string()
                                    on:click=move |_| {
                                        apply(SettingsPatch {
                                            theme: Some(mode),
                                            ..SettingsPatch::default()
                                        })
                                    }
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <h3>"Accent color"</h3>
                <div class="settings-row" role="radiogroup" aria-label="Accent color">
                    {ACCENT_PRESETS
                        .into_iter()
                        .map(|(hex, name)| {
                            view! {
                                <button
                                    type="button"
                                    class="settings-swatch"
                                    role="radio"
                                    title=name
                                    aria-label=name
                                    aria-checked=move || settings.with(|s| s.accent_color == hex).to_string()
                                    style=format!("background: {hex}")
                                    on:click=move |_| {
                                        apply(SettingsPatch {
                                            accent_color: Some(hex.to_string()),
                                            ..SettingsPatch::default()
                                        })
                                    }
                                ></button>
                            }
                        })
                        .collect_view()}
                </div>

                <h3>"Desktop icons"</h3>
                <div class="settings-row" role="radiogroup" aria-label="Icon size">
                    {[IconSize::Small, IconSize::Medium, IconSize::Large]
                        .into_iter()
                        .map(|size| {
                            view! {
                                <button
                                    type="button"
                                    class="app-action"
                                    role="radio"
                                    aria-checked=move || settings.with(|s| s.icon_size == size).to_string()
                                    on:click=move |_| {
                                        apply(SettingsPatch {
                                            icon_size: Some(size),
                                            ..SettingsPatch::default()
                                        })
                                    }
                                >
                                    {size.token()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <label class="settings-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || settings.with(|s| s.animations_enabled)
                        on:change=move |ev| {
                            apply(SettingsPatch {
                                animations_enabled: Some(event_target_checked(&ev)),
                                ..SettingsPatch::default()
                            })
                        }
                    />
                    "Animations"
                </label>
                <label class="settings-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || settings.with(|s| s.transparency)
                        on:change=move |ev| {
                            apply(SettingsPatch {
                                transparency: Some(event_target_checked(&ev)),
                                ..SettingsPatch::default()
                            })
                        }
                    />
                    "Transparency effects"
                </label>
            </section>
        }
        .into_view()
    };

    let account = move || {
        view! {
            <section class="settings-section" aria-label="Account">
                <form
                    class="settings-row"
                    on:submit=move |ev: ev::SubmitEvent| {
                        ev.prevent_default();
                        apply(SettingsPatch {
                            username: Some(username_draft.get_untracked()),
                            ..SettingsPatch::default()
                        });
                    }
                >
                    <label>
                        "Username "
                        <input
                            type="text"
                            prop:value=move || username_draft.get()
                            on:input=move |ev| username_draft.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="submit" class="app-action">"Save"</button>
                </form>
                <p>{move || format!("Signed in as {}", settings.with(|s| s.username.clone()))}</p>
            </section>
        }
        .into_view()
    };

    let about = move || {
        let host = runtime.host.with_value(|host| host.host_strategy_name());
        view! {
            <section class="settings-section" aria-label="About">
                <p>"WebOS desktop"</p>
                <p>{format!("Version {}", env!("CARGO_PKG_VERSION"))}</p>
                <p>{format!("Storage host: {host}")}</p>
            </section>
        }
        .into_view()
    };

    view! {
        <div class="app-shell app-settings-shell">
            <nav class="settings-nav" aria-label="Settings sections">
                {SettingsSection::ALL
                    .into_iter()
                    .map(|entry| {
                        view! {
                            <button
                                type="button"
                                class="settings-nav-item"
                                aria-current=move || (section.get() == entry).then_some("page")
                                on:click=move |_| section.set(entry)
                            >
                                {entry.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="settings-body">
                {move || error.get().map(|message| view! { <p class="settings-error" role="alert">{message}</p> })}
                {move || match section.get() {
                    SettingsSection::Personalization => personalization(),
                    SettingsSection::Account => account(),
                    SettingsSection::About => about(),
                }}
            </div>
        </div>
    }
}
