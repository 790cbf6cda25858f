//! Window lifecycle and z-order transitions used by the desktop reducer.
//!
//! Each operation returns `true` when it changed state. Unknown or closing window ids are
//! ignored so late UI events racing a close never fail.

use desktop_app_contract::ApplicationId;

use crate::interaction::clamp_window_origin;
use crate::model::{
    DesktopState, OpenWindowRequest, Viewport, WindowId, WindowRecord, WindowRect,
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    OPEN_EDGE_RESERVE, OPEN_MIN_OFFSET, OPEN_STAGGER_PX,
};

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn next_z_index(state: &mut DesktopState) -> u64 {
    let z = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z
}

fn find_live_window_mut(state: &mut DesktopState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id && !w.closing)
}

/// Initial geometry: centered, staggered by the number of open windows, kept on screen.
pub fn initial_rect(state: &DesktopState, w: i32, h: i32) -> WindowRect {
    let viewport = state.viewport;
    let stagger = state.windows.len() as i32 * OPEN_STAGGER_PX;
    let center_x = ((viewport.width - w) / 2 + stagger).max(OPEN_MIN_OFFSET);
    let center_y = ((viewport.height - h) / 2 + stagger).max(OPEN_MIN_OFFSET);
    WindowRect {
        x: center_x.min(viewport.width - OPEN_EDGE_RESERVE).max(0),
        y: center_y.min(viewport.height - OPEN_EDGE_RESERVE).max(0),
        w,
        h,
    }
}

/// Opens a window on top of the stack, focuses it and closes the start menu.
///
/// Missing title and icon fall back to the app id; the reducer fills them from the catalog.
pub fn open_window(state: &mut DesktopState, req: OpenWindowRequest) -> WindowId {
    let w = req.width.unwrap_or(DEFAULT_WINDOW_WIDTH).max(MIN_WINDOW_WIDTH);
    let h = req.height.unwrap_or(DEFAULT_WINDOW_HEIGHT).max(MIN_WINDOW_HEIGHT);
    let rect = initial_rect(state, w, h);
    let id = next_window_id(state);
    let z_index = next_z_index(state);
    let record = WindowRecord {
        id,
        title: req.title.unwrap_or_else(|| req.app_id.to_string()),
        icon_id: req.icon_id.unwrap_or_else(|| req.app_id.to_string()),
        app_id: req.app_id,
        rect,
        z_index,
        minimized: false,
        maximized: false,
        closing: false,
        launch_params: req.launch_params,
    };
    state.windows.push(record);
    state.focused = Some(id);
    state.start_menu_open = false;
    id
}

/// Highest-z window that can take focus, skipping `excluding`.
pub fn top_focus_candidate(state: &DesktopState, excluding: Option<WindowId>) -> Option<WindowId> {
    state
        .windows
        .iter()
        .filter(|w| Some(w.id) != excluding && !w.minimized && !w.closing)
        .max_by_key(|w| w.z_index)
        .map(|w| w.id)
}

/// Un-minimizes, raises with a fresh z-order value, and focuses `window_id`.
pub fn focus_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let z_index = state.next_z_index;
    let Some(window) = find_live_window_mut(state, window_id) else {
        return false;
    };
    window.minimized = false;
    window.z_index = z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    state.focused = Some(window_id);
    true
}

/// Hides `window_id`; focus moves to the next candidate when it was focused.
pub fn minimize_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = find_live_window_mut(state, window_id) else {
        return false;
    };
    if window.minimized {
        return false;
    }
    window.minimized = true;
    if state.focused == Some(window_id) {
        state.focused = top_focus_candidate(state, Some(window_id));
    }
    true
}

pub fn maximize_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = find_live_window_mut(state, window_id) else {
        return false;
    };
    if window.maximized {
        return false;
    }
    window.maximized = true;
    true
}

/// Restores `window_id` and focuses it with a fresh z-order value.
///
/// A minimized window is only un-minimized, so a maximized window comes back maximized. A
/// visible window leaves the maximized state and returns to its stored geometry.
pub fn restore_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = find_live_window_mut(state, window_id) else {
        return false;
    };
    if window.minimized {
        window.minimized = false;
    } else {
        window.maximized = false;
    }
    focus_window(state, window_id)
}

/// Title-bar double click. Minimized windows have no visible title bar and are left alone.
pub fn toggle_maximize(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = state.window(window_id) else {
        return false;
    };
    if window.minimized {
        return false;
    }
    if window.maximized {
        restore_window(state, window_id)
    } else {
        maximize_window(state, window_id)
    }
}

/// Taskbar entry click: restore when minimized, minimize when focused, focus otherwise.
pub fn toggle_taskbar_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = state.window(window_id) else {
        return false;
    };
    if window.minimized {
        restore_window(state, window_id)
    } else if state.focused == Some(window_id) {
        minimize_window(state, window_id)
    } else {
        focus_window(state, window_id)
    }
}

/// Marks `window_id` as closing. Removal happens in [`finalize_close`].
pub fn begin_close(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = find_live_window_mut(state, window_id) else {
        return false;
    };
    window.closing = true;
    true
}

/// Removes `window_id` and reassigns focus if it held it.
pub fn finalize_close(state: &mut DesktopState, window_id: WindowId) -> bool {
    let before = state.windows.len();
    state.windows.retain(|w| w.id != window_id);
    if state.windows.len() == before {
        return false;
    }
    if state.focused == Some(window_id) {
        state.focused = top_focus_candidate(state, None);
    }
    true
}

/// Moves a window, clamped so part of it stays on screen. Focus and z-order are untouched.
pub fn update_window_position(state: &mut DesktopState, window_id: WindowId, x: i32, y: i32) -> bool {
    let viewport = state.viewport;
    let Some(window) = find_live_window_mut(state, window_id) else {
        return false;
    };
    let (x, y) = clamp_window_origin(x, y, viewport);
    if window.rect.x == x && window.rect.y == y {
        return false;
    }
    window.rect.x = x;
    window.rect.y = y;
    true
}

pub fn update_window_size(state: &mut DesktopState, window_id: WindowId, w: i32, h: i32) -> bool {
    let Some(window) = find_live_window_mut(state, window_id) else {
        return false;
    };
    let w = w.max(MIN_WINDOW_WIDTH);
    let h = h.max(MIN_WINDOW_HEIGHT);
    if window.rect.w == w && window.rect.h == h {
        return false;
    }
    window.rect.w = w;
    window.rect.h = h;
    true
}

/// Replaces the whole stored rect; used by resize sessions.
pub fn set_window_rect(state: &mut DesktopState, window_id: WindowId, rect: WindowRect) -> bool {
    let Some(window) = find_live_window_mut(state, window_id) else {
        return false;
    };
    let rect = rect.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
    if window.rect == rect {
        return false;
    }
    window.rect = rect;
    true
}

pub fn update_window_title(state: &mut DesktopState, window_id: WindowId, title: String) -> bool {
    let Some(window) = find_live_window_mut(state, window_id) else {
        return false;
    };
    if window.title == title {
        return false;
    }
    window.title = title;
    true
}

pub fn set_viewport(state: &mut DesktopState, viewport: Viewport) -> bool {
    let viewport = Viewport {
        width: viewport.width.max(0),
        height: viewport.height.max(0),
    };
    if state.viewport == viewport {
        return false;
    }
    state.viewport = viewport;
    true
}

/// Geometry the window is painted with.
pub fn effective_rect(window: &WindowRecord, viewport: Viewport) -> WindowRect {
    if window.maximized {
        viewport.work_area()
    } else {
        window.rect
    }
}

/// Open window count per app, in first-open order. Closing windows are not counted.
pub fn running_apps(state: &DesktopState) -> Vec<(ApplicationId, usize)> {
    let mut counts: Vec<(ApplicationId, usize)> = Vec::new();
    for window in state.windows.iter().filter(|w| !w.closing) {
        match counts.iter_mut().find(|(app_id, _)| *app_id == window.app_id) {
            Some((_, count)) => *count += 1,
            None => counts.push((window.app_id.clone(), 1)),
        }
    }
    counts
}

/// Windows in paint order (lowest z first).
pub fn stacking_order(state: &DesktopState) -> Vec<WindowId> {
    let mut windows: Vec<&WindowRecord> = state.windows.iter().collect();
    windows.sort_by_key(|w| w.z_index);
    windows.into_iter().map(|w| w.id).collect()
}
