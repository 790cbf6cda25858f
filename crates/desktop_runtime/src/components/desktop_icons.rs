use super::*;
use crate::model::{DesktopIcon, IconSize};

fn icon_size_px(size: IconSize) -> i32 {
    match size {
        IconSize::Small => 48,
        IconSize::Medium => 64,
        IconSize::Large => 80,
    }
}

#[component]
pub(super) fn DesktopIcons() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let icon_ids = create_memo(move |_| {
        state.with(|state| state.icons.iter().map(|icon| icon.id.clone()).collect::<Vec<_>>())
    });
    let size = create_memo(move |_| state.with(|state| state.settings.icon_size));

    view! {
        <div
            class=move || format!("desktop-icons icons-{}", size.get().token())
            style=move || format!("--icon-size:{}px", icon_size_px(size.get()))
            role="listbox"
            aria-label="Desktop"
            aria-multiselectable="true"
        >
            <For each=move || icon_ids.get() key=|id| id.clone() let:icon_id>
                <DesktopIconButton icon_id=icon_id />
            </For>
        </div>
    }
}

#[component]
fn DesktopIconButton(icon_id: String) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let icon_id = store_value(icon_id);
    let icon = create_memo(move |_| {
        icon_id.with_value(|id| {
            state.with(|state| state.icons.iter().find(|icon| icon.id == *id).cloned())
        })
    });
    let selected = create_memo(move |_| {
        icon_id.with_value(|id| state.with(|state| state.selected_icons.contains(id)))
    });

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_pointer(&ev) {
            return;
        }
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginIconDrag {
            icon_id: icon_id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::SelectIcon {
            icon_id: icon_id.get_value(),
            multi_select: ev.ctrl_key() || ev.meta_key(),
        });
    };
    let activate = move || {
        runtime.dispatch_action(DesktopAction::ActivateIcon {
            icon_id: icon_id.get_value(),
        });
    };
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if is_activation_key(&ev.key()) {
            ev.prevent_default();
            activate();
        }
    };
    let field = move |read: fn(&DesktopIcon) -> String| {
        icon.with(|icon| icon.as_ref().map(read).unwrap_or_default())
    };

    view! {
        <button
            type="button"
            class=move || if selected.get() { "desktop-icon selected" } else { "desktop-icon" }
            role="option"
            aria-selected=move || selected.get().to_string()
            style=move || {
                icon.with(|icon| {
                    icon.as_ref()
                        .map(|icon| format!("left:{}px;top:{}px;", icon.x, icon.y))
                        .unwrap_or_default()
                })
            }
            on:pointerdown=on_pointerdown
            on:click=on_click
            on:dblclick=move |ev| {
                stop_mouse_event(&ev);
                activate();
            }
            on:keydown=on_keydown
        >
            <span
                class="desktop-icon-glyph"
                aria-hidden="true"
                data-icon=move || field(|icon| icon.icon_id.clone())
            ></span>
            <span class="desktop-icon-label">{move || field(|icon| icon.label.clone())}</span>
        </button>
    }
}
