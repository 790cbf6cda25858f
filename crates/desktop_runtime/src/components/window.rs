use std::{cell::RefCell, rc::Rc};

use desktop_app_contract::{AppMountContext, AppServices};
use platform_host::{kill_task, register_task};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::*;
use crate::{
    app_runtime::ensure_window_session,
    apps,
    host::window_primary_input_dom_id,
    model::{ResizeEdge, WindowRecord},
    window_manager::effective_rect,
};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn window_class(window: &WindowRecord, focused: bool) -> String {
    let mut class = String::from("desktop-window");
    for (flag, name) in [
        (focused, " focused"),
        (window.minimized, " minimized"),
        (window.maximized, " maximized"),
        (window.closing, " closing"),
    ] {
        if flag {
            class.push_str(name);
        }
    }
    class
}

fn window_style(window: &WindowRecord, viewport: Viewport) -> String {
    let rect = effective_rect(window, viewport);
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        rect.x, rect.y, rect.w, rect.h, window.z_index
    )
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window = create_memo(move |_| runtime.state.with(|state| state.window(window_id).cloned()));
    let viewport = create_memo(move |_| runtime.state.with(|state| state.viewport));
    let focused = create_memo(move |_| runtime.state.with(|state| state.focused == Some(window_id)));
    let maximized = move || window.with(|win| win.as_ref().is_some_and(|win| win.maximized));
    let title = move || {
        window.with(|win| win.as_ref().map(|win| win.title.clone()).unwrap_or_default())
    };

    let focus = move |_| {
        if !focused.get_untracked() {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    };
    let minimize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
    };
    let toggle_maximize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::ToggleMaximize { window_id });
    };
    let close = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_pointer(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let swallow_pointer = move |ev: web_sys::PointerEvent| ev.stop_propagation();

    view! {
        <section
            class=move || {
                window.with(|win| win.as_ref().map(|win| window_class(win, focused.get())).unwrap_or_default())
            }
            style=move || {
                window.with(|win| win.as_ref().map(|win| window_style(win, viewport.get())).unwrap_or_default())
            }
            role="dialog"
            aria-label=title
            on:pointerdown=focus
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=toggle_maximize
            >
                <span
                    class="titlebar-app-icon"
                    aria-hidden="true"
                    data-icon=move || window.with(|win| win.as_ref().map(|win| win.icon_id.clone()))
                ></span>
                <span class="titlebar-title">{title}</span>
                <div class="titlebar-controls">
                    <button
                        type="button"
                        aria-label="Minimize window"
                        on:pointerdown=swallow_pointer
                        on:dblclick=stop_mouse_event_handler
                        on:click=minimize
                    >
                        "_"
                    </button>
                    <button
                        type="button"
                        aria-label=move || if maximized() { "Restore window" } else { "Maximize window" }
                        on:pointerdown=swallow_pointer
                        on:dblclick=stop_mouse_event_handler
                        on:click=toggle_maximize
                    >
                        {move || if maximized() { "\u{2750}" } else { "\u{25a1}" }}
                    </button>
                    <button
                        type="button"
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=swallow_pointer
                        on:dblclick=stop_mouse_event_handler
                        on:click=close
                    >
                        "\u{2715}"
                    </button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody window_id=window_id />
            </div>
            <Show when=move || !maximized() fallback=|| ()>
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle window_id=window_id edge=edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
}

fn stop_mouse_event_handler(ev: web_sys::MouseEvent) {
    stop_mouse_event(&ev);
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_pointer(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=format!("window-resize-handle edge-{}", edge.token())
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

/// Registers a task for the mounted app and kills it when the view is torn down.
fn track_window_task(prefs: Rc<dyn platform_host::PrefsStore>, name: String) {
    let task_id = Rc::new(RefCell::new(None::<String>));

    let slot = task_id.clone();
    let register_prefs = prefs.clone();
    spawn_local(async move {
        match register_task(register_prefs.as_ref(), &name).await {
            Ok(task) => *slot.borrow_mut() = Some(task.id),
            Err(err) => logging::warn!("register task `{name}` failed: {err}"),
        }
    });

    on_cleanup(move || {
        let Some(id) = task_id.borrow_mut().take() else {
            return;
        };
        spawn_local(async move {
            if let Err(err) = kill_task(prefs.as_ref(), &id).await {
                logging::warn!("kill task `{id}` failed: {err}");
            }
        });
    });
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let Some(record) = runtime
        .state
        .with_untracked(|state| state.window(window_id).cloned())
    else {
        return ().into_view();
    };

    let lifecycle = ensure_window_session(runtime.app_runtime, runtime.owner, window_id).read_only();
    let command_sender = Callback::new(move |command| {
        runtime.dispatch_action(DesktopAction::AppCommand { window_id, command });
    });
    let host = runtime.host.with_value(|host| host.host_services());
    track_window_task(host.prefs.clone(), record.title.clone());

    let contents = apps::app_module(&record.app_id).map(|module| {
        module.mount(AppMountContext {
            app_id: record.app_id.clone(),
            window_id: window_id.0,
            launch_params: record.launch_params.clone(),
            lifecycle,
            services: AppServices::new(command_sender),
            host,
        })
    });

    view! {
        <div
            id=window_primary_input_dom_id(window_id)
            class="window-body-content"
            tabindex="-1"
        >
            {contents}
        </div>
    }
    .into_view()
}
