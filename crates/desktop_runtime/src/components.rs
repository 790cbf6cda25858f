//! Desktop shell UI composition and interaction surfaces.

mod a11y;
mod desktop_icons;
mod menus;
mod taskbar;
mod taskbar_input;
mod toasts;
mod window;

use std::time::Duration;

use leptos::*;

use self::{
    a11y::{focus_element_by_id, focus_first_menu_item, handle_menu_roving_keydown},
    desktop_icons::DesktopIcons,
    menus::{DesktopContextMenu, StartMenu},
    taskbar::Taskbar,
    taskbar_input::{is_activation_key, shell_shortcut, ShellShortcut},
    toasts::NotificationToasts,
    window::DesktopWindow,
};

use crate::{
    model::{BootState, InteractionState, PointerPosition, Viewport, WindowId, TASKBAR_HEIGHT_PX},
    reducer::DesktopAction,
    runtime_context::open_system_settings,
    wallpaper,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

const POPUP_MARGIN_PX: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DesktopContextMenuState {
    x: i32,
    y: i32,
}

/// Keeps a popup of `popup_w`x`popup_h` inside the desktop work area.
fn clamp_popup_position(viewport: Viewport, x: i32, y: i32, popup_w: i32, popup_h: i32) -> (i32, i32) {
    let area = viewport.work_area();
    let max_x = (area.w - popup_w - POPUP_MARGIN_PX).max(POPUP_MARGIN_PX);
    let max_y = (area.h - popup_h - POPUP_MARGIN_PX).max(POPUP_MARGIN_PX);
    (x.clamp(POPUP_MARGIN_PX, max_x), y.clamp(POPUP_MARGIN_PX, max_y))
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Mouse presses other than the main button and secondary touch points start nothing.
fn is_primary_pointer(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

/// Update action for the active pointer session, if any.
fn pointer_update_action(interaction: &InteractionState, pointer: PointerPosition) -> Option<DesktopAction> {
    match interaction {
        InteractionState::Idle => None,
        InteractionState::Dragging(_) => Some(DesktopAction::UpdateMove { pointer }),
        InteractionState::Resizing(_) => Some(DesktopAction::UpdateResize { pointer }),
        InteractionState::DraggingIcon(_) => Some(DesktopAction::UpdateIconDrag { pointer }),
    }
}

/// End action for the active pointer session, if any.
fn pointer_end_action(interaction: &InteractionState) -> Option<DesktopAction> {
    match interaction {
        InteractionState::Idle => None,
        InteractionState::Dragging(_) => Some(DesktopAction::EndMove),
        InteractionState::Resizing(_) => Some(DesktopAction::EndResize),
        InteractionState::DraggingIcon(_) => Some(DesktopAction::EndIconDrag),
    }
}

fn install_global_listeners(
    runtime: DesktopRuntimeContext,
    context_menu: RwSignal<Option<DesktopContextMenuState>>,
) {
    let keydown = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        match shell_shortcut(&ev.key(), ev.alt_key(), ev.ctrl_key()) {
            Some(ShellShortcut::ToggleStartMenu) => {
                ev.prevent_default();
                context_menu.set(None);
                runtime.dispatch_action(DesktopAction::ToggleStartMenu);
            }
            Some(ShellShortcut::Dismiss) => {
                let start_open = runtime.state.with_untracked(|state| state.start_menu_open);
                if start_open || context_menu.get_untracked().is_some() {
                    ev.prevent_default();
                    context_menu.set(None);
                    runtime.dispatch_action(DesktopAction::CloseStartMenu);
                    let _ = focus_element_by_id("desktop-shell-root");
                }
            }
            None => {}
        }
    });

    let pointermove = window_event_listener(ev::pointermove, move |ev| {
        let pointer = pointer_from_pointer_event(&ev);
        let action = runtime
            .interaction
            .with_untracked(|interaction| pointer_update_action(interaction, pointer));
        if let Some(action) = action {
            runtime.dispatch_action(action);
        }
    });

    let end_session = move || {
        if let Some(action) = runtime.interaction.with_untracked(pointer_end_action) {
            runtime.dispatch_action(action);
        }
    };
    let pointerup = window_event_listener(ev::pointerup, move |_| end_session());
    let pointercancel = window_event_listener(ev::pointercancel, move |_| end_session());

    let resize = window_event_listener(ev::resize, move |_| {
        let viewport = runtime.host.with_value(|host| host.desktop_viewport());
        runtime.dispatch_action(DesktopAction::SetViewport { viewport });
    });

    on_cleanup(move || {
        keydown.remove();
        pointermove.remove();
        pointerup.remove();
        pointercancel.remove();
        resize.remove();
    });
}

#[component]
/// Renders the full desktop shell: boot screen, wallpaper, icons, windows, menus, and taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let context_menu = create_rw_signal(None::<DesktopContextMenuState>);
    let boot = create_memo(move |_| state.with(|state| state.boot.clone()));
    let booting = create_memo(move |_| boot.with(|boot| boot.booting));
    let background = create_memo(move |_| {
        state.with(|state| wallpaper::wallpaper_preset(&state.settings.wallpaper).background)
    });
    let window_ids = create_memo(move |_| {
        state.with(|state| state.windows.iter().map(|win| win.id).collect::<Vec<WindowId>>())
    });

    install_global_listeners(runtime, context_menu);

    let on_surface_click = move |_| {
        context_menu.set(None);
        runtime.dispatch_action(DesktopAction::CloseStartMenu);
        runtime.dispatch_action(DesktopAction::ClearIconSelection);
    };
    let on_surface_context_menu = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::CloseStartMenu);
        let viewport = state.with_untracked(|state| state.viewport);
        let (x, y) = clamp_popup_position(
            viewport,
            ev.client_x(),
            ev.client_y(),
            menus::CONTEXT_MENU_WIDTH_PX,
            menus::CONTEXT_MENU_HEIGHT_PX,
        );
        context_menu.set(Some(DesktopContextMenuState { x, y }));
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            style=format!("--taskbar-height:{TASKBAR_HEIGHT_PX}px")
        >
            <Show when=move || booting.get() fallback=|| ()>
                <BootScreen boot=boot />
            </Show>
            <main
                class="desktop-surface"
                style=move || format!("background:{}", background.get())
                on:click=on_surface_click
                on:contextmenu=on_surface_context_menu
            >
                <DesktopIcons />
                <div class="desktop-window-layer">
                    <For each=move || window_ids.get() key=|id| id.0 let:window_id>
                        <DesktopWindow window_id=window_id />
                    </For>
                </div>
                <DesktopContextMenu menu=context_menu />
            </main>
            <StartMenu />
            <NotificationToasts />
            <Taskbar />
        </div>
    }
}

#[component]
fn BootScreen(boot: Memo<BootState>) -> impl IntoView {
    let progress = move || boot.with(|boot| boot.progress);
    view! {
        <div class="boot-screen" role="status" aria-live="polite">
            <div class="boot-logo" aria-hidden="true">"WebOS"</div>
            <div
                class="boot-progress"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=progress
            >
                <div class="boot-progress-fill" style=move || format!("width:{}%", progress())></div>
            </div>
            <p class="boot-status">{move || boot.with(|boot| boot.status.clone())}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{DragSession, IconDragSession};

    #[test]
    fn popups_stay_inside_the_work_area() {
        let viewport = Viewport {
            width: 1024,
            height: 768,
        };
        assert_eq!(clamp_popup_position(viewport, 100, 100, 200, 120), (100, 100));
        assert_eq!(
            clamp_popup_position(viewport, 1020, 760, 200, 120),
            (1024 - 200 - 6, 768 - TASKBAR_HEIGHT_PX - 120 - 6)
        );
        assert_eq!(clamp_popup_position(viewport, -5, -5, 200, 120), (6, 6));
    }

    #[test]
    fn pointer_actions_follow_the_active_session() {
        let pointer = PointerPosition { x: 3, y: 4 };
        assert_eq!(pointer_update_action(&InteractionState::Idle, pointer), None);
        assert_eq!(pointer_end_action(&InteractionState::Idle), None);

        let dragging = InteractionState::Dragging(DragSession {
            window_id: WindowId(1),
            grab_offset: PointerPosition { x: 0, y: 0 },
        });
        assert_eq!(
            pointer_update_action(&dragging, pointer),
            Some(DesktopAction::UpdateMove { pointer })
        );
        assert_eq!(pointer_end_action(&dragging), Some(DesktopAction::EndMove));

        let icon = InteractionState::DraggingIcon(IconDragSession {
            icon_id: "icon-notes".to_string(),
            grab_offset: PointerPosition { x: 0, y: 0 },
            moved: false,
        });
        assert_eq!(
            pointer_update_action(&icon, pointer),
            Some(DesktopAction::UpdateIconDrag { pointer })
        );
        assert_eq!(pointer_end_action(&icon), Some(DesktopAction::EndIconDrag));
    }
}
