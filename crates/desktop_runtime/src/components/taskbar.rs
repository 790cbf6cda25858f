use super::*;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarClockSnapshot {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl TaskbarClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            Self {
                year: date.get_full_year(),
                month: date.get_month() + 1,
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                year: 1970,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
            }
        }
    }
}

fn format_clock_time(snapshot: TaskbarClockSnapshot) -> String {
    let hour = match snapshot.hour % 12 {
        0 => 12,
        hour => hour,
    };
    let suffix = if snapshot.hour >= 12 { "PM" } else { "AM" };
    format!("{hour}:{:02} {suffix}", snapshot.minute)
}

fn format_clock_date(snapshot: TaskbarClockSnapshot) -> String {
    let month = MONTHS
        .get(snapshot.month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("Jan");
    format!("{month} {}, {}", snapshot.day, snapshot.year)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskbarEntry {
    window_id: WindowId,
    title: String,
    icon_id: String,
    focused: bool,
    minimized: bool,
}

/// Taskbar buttons in open order. Windows already closing are left out.
fn taskbar_entries(state: &crate::model::DesktopState) -> Vec<TaskbarEntry> {
    state
        .windows
        .iter()
        .filter(|win| !win.closing)
        .map(|win| TaskbarEntry {
            window_id: win.id,
            title: win.title.clone(),
            icon_id: win.icon_id.clone(),
            focused: state.focused == Some(win.id) && !win.minimized,
            minimized: win.minimized,
        })
        .collect()
}

fn taskbar_entry_class(entry: &TaskbarEntry) -> &'static str {
    match (entry.focused, entry.minimized) {
        (true, _) => "taskbar-window active",
        (false, true) => "taskbar-window minimized",
        (false, false) => "taskbar-window",
    }
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let entries = create_memo(move |_| state.with(taskbar_entries));
    let start_open = create_memo(move |_| state.with(|state| state.start_menu_open));
    let clock_now = create_rw_signal(TaskbarClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(TaskbarClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let entry_for = move |window_id: WindowId| {
        entries.with(|entries| entries.iter().find(|entry| entry.window_id == window_id).cloned())
    };

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <button
                type="button"
                class=move || if start_open.get() { "taskbar-start active" } else { "taskbar-start" }
                aria-label="Start"
                aria-haspopup="menu"
                aria-expanded=move || start_open.get().to_string()
                on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::ToggleStartMenu);
                }
            >
                "Start"
            </button>
            <div class="taskbar-windows" role="list">
                <For
                    each=move || entries.with(|entries| entries.iter().map(|entry| entry.window_id).collect::<Vec<_>>())
                    key=|window_id| window_id.0
                    let:window_id
                >
                    <button
                        type="button"
                        role="listitem"
                        class=move || entry_for(window_id).map(|entry| taskbar_entry_class(&entry)).unwrap_or("taskbar-window")
                        aria-pressed=move || entry_for(window_id).is_some_and(|entry| entry.focused).to_string()
                        title=move || entry_for(window_id).map(|entry| entry.title).unwrap_or_default()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow { window_id });
                        }
                    >
                        <span
                            class="taskbar-window-icon"
                            aria-hidden="true"
                            data-icon=move || entry_for(window_id).map(|entry| entry.icon_id)
                        ></span>
                        <span class="taskbar-window-title">
                            {move || entry_for(window_id).map(|entry| entry.title).unwrap_or_default()}
                        </span>
                    </button>
                </For>
            </div>
            <div class="taskbar-tray">
                <time class="taskbar-clock" aria-live="off">
                    <span class="taskbar-clock-time">{move || format_clock_time(clock_now.get())}</span>
                    <span class="taskbar-clock-date">{move || format_clock_date(clock_now.get())}</span>
                </time>
            </div>
        </footer>
    }
}
