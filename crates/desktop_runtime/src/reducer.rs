//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

mod boot;
mod notifications;
mod settings;

use desktop_app_contract::{AppCommand, AppLifecycleEvent, ApplicationId, NotificationKind};
use thiserror::Error;

use crate::{
    apps, icons,
    interaction::{drag_origin, grab_offset, icon_drag_position, resize_rect},
    model::{
        DesktopSnapshot, DesktopState, DragSession, IconDragSession, InteractionState,
        OpenWindowRequest, PointerPosition, ResizeEdge, ResizeSession, SettingsPatch, Viewport,
        WindowId, CLOSE_DELAY_MS,
    },
    window_manager,
};

pub use boot::BOOT_STEPS;
pub use settings::{merge_settings, validate_settings};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window. Missing fields are filled from the app catalog.
    OpenWindow(OpenWindowRequest),
    /// Start the close transition for a window.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Remove a closing window; scheduled by [`DesktopAction::CloseWindow`].
    FinalizeClose {
        /// Window to remove.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a window into the work area.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
    },
    /// Restore a minimized or maximized window.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Title-bar double click.
    ToggleMaximize {
        /// Window whose title bar was double clicked.
        window_id: WindowId,
    },
    /// Toggle taskbar behavior for a window (focus, minimize, or restore).
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Move a window; the origin is clamped to the viewport.
    UpdateWindowPosition {
        /// Window to move.
        window_id: WindowId,
        /// New left offset.
        x: i32,
        /// New top offset.
        y: i32,
    },
    /// Resize a window; the size is floored at the window minimum.
    UpdateWindowSize {
        /// Window to resize.
        window_id: WindowId,
        /// New width.
        width: i32,
        /// New height.
        height: i32,
    },
    /// Replace a window title.
    SetWindowTitle {
        /// Window to rename.
        window_id: WindowId,
        /// New title.
        title: String,
    },
    /// Track the browser viewport.
    SetViewport {
        /// Current viewport size.
        viewport: Viewport,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Select a desktop icon.
    SelectIcon {
        /// Icon to select.
        icon_id: String,
        /// Modifier held: toggle membership instead of replacing the selection.
        multi_select: bool,
    },
    /// Clear the desktop icon selection.
    ClearIconSelection,
    /// Double click on a desktop icon.
    ActivateIcon {
        /// Icon that was activated.
        icon_id: String,
    },
    /// Drop an icon at a position; the position is snapped to the grid.
    MoveIcon {
        /// Icon to move.
        icon_id: String,
        /// Drop left offset.
        x: i32,
        /// Drop top offset.
        y: i32,
    },
    /// Pointer down on a desktop icon.
    BeginIconDrag {
        /// Icon under the pointer.
        icon_id: String,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress icon drag.
    UpdateIconDrag {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Pointer up after an icon drag.
    EndIconDrag,
    /// Merge a partial settings update.
    UpdateSettings {
        /// Fields to change.
        patch: SettingsPatch,
    },
    /// Post a notification toast.
    AddNotification {
        /// Headline.
        title: String,
        /// Body text.
        message: String,
        /// Severity.
        kind: NotificationKind,
        /// Posting app, when an app sent it.
        app_id: Option<ApplicationId>,
    },
    /// Remove one notification.
    DismissNotification {
        /// Notification id.
        id: u64,
    },
    /// Remove every notification.
    ClearNotifications,
    /// Reset and start the boot sequence.
    StartBoot,
    /// Apply the next boot step.
    AdvanceBoot,
    /// Leave the boot screen.
    FinishBoot,
    /// Replace icons and settings with a persisted snapshot.
    HydrateSnapshot {
        /// Snapshot payload to restore.
        snapshot: DesktopSnapshot,
    },
    /// Command sent by the app mounted in `window_id`.
    AppCommand {
        /// Sending window.
        window_id: WindowId,
        /// Command payload.
        command: AppCommand,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist the icon layout and settings snapshot.
    PersistDesktop,
    /// Re-apply theme class and accent color to the document.
    ApplyTheme,
    /// Dispatch `action` after `delay_ms` milliseconds.
    DispatchAfter {
        /// Delay before dispatch.
        delay_ms: u32,
        /// Action to dispatch.
        action: Box<DesktopAction>,
    },
    /// Move keyboard focus into the newly focused window.
    FocusWindowInput(WindowId),
    /// Deliver a lifecycle event to the app mounted in a window.
    Lifecycle {
        /// Target window.
        window_id: WindowId,
        /// Event to deliver.
        event: AppLifecycleEvent,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid input. Missing window ids are not errors.
pub enum ReducerError {
    /// A settings patch carried an invalid field; nothing was applied.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    /// The referenced desktop icon does not exist.
    #[error("unknown desktop icon `{0}`")]
    UnknownIcon(String),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// This function is the only place window, icon, settings, notification, and boot state changes.
/// Focus changes are reported as [`RuntimeEffect::Lifecycle`] events and a
/// [`RuntimeEffect::FocusWindowInput`] request.
///
/// # Errors
///
/// Returns [`ReducerError`] for an invalid settings patch or an unknown icon id. State is left
/// untouched in both cases.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let focused_before = state.focused;
    let mut effects = Vec::new();
    apply_action(state, interaction, action, &mut effects)?;

    if state.focused != focused_before {
        if let Some(previous) = focused_before.filter(|id| state.window(*id).is_some()) {
            effects.push(RuntimeEffect::Lifecycle {
                window_id: previous,
                event: AppLifecycleEvent::Blurred,
            });
        }
        if let Some(current) = state.focused {
            effects.push(RuntimeEffect::Lifecycle {
                window_id: current,
                event: AppLifecycleEvent::Focused,
            });
            effects.push(RuntimeEffect::FocusWindowInput(current));
        }
    }

    drop_stale_session(state, interaction);
    Ok(effects)
}

fn apply_action(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    if settings::reduce_settings_action(state, &action, effects)?
        || notifications::reduce_notification_action(state, &action, effects)
        || boot::reduce_boot_action(state, &action, effects)
    {
        return Ok(());
    }

    match action {
        DesktopAction::OpenWindow(req) => {
            window_manager::open_window(state, with_catalog_defaults(req));
        }
        DesktopAction::CloseWindow { window_id } => {
            if window_manager::begin_close(state, window_id) {
                effects.push(RuntimeEffect::Lifecycle {
                    window_id,
                    event: AppLifecycleEvent::Closing,
                });
                effects.push(RuntimeEffect::DispatchAfter {
                    delay_ms: CLOSE_DELAY_MS,
                    action: Box::new(DesktopAction::FinalizeClose { window_id }),
                });
            }
        }
        DesktopAction::FinalizeClose { window_id } => {
            window_manager::finalize_close(state, window_id);
        }
        DesktopAction::FocusWindow { window_id } => {
            window_manager::focus_window(state, window_id);
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if window_manager::minimize_window(state, window_id) {
                effects.push(RuntimeEffect::Lifecycle {
                    window_id,
                    event: AppLifecycleEvent::Minimized,
                });
            }
        }
        DesktopAction::MaximizeWindow { window_id } => {
            window_manager::maximize_window(state, window_id);
        }
        DesktopAction::RestoreWindow { window_id } => {
            window_manager::restore_window(state, window_id);
        }
        DesktopAction::ToggleMaximize { window_id } => {
            window_manager::toggle_maximize(state, window_id);
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let was_minimized = state.window(window_id).is_some_and(|w| w.minimized);
            if window_manager::toggle_taskbar_window(state, window_id)
                && !was_minimized
                && state.window(window_id).is_some_and(|w| w.minimized)
            {
                effects.push(RuntimeEffect::Lifecycle {
                    window_id,
                    event: AppLifecycleEvent::Minimized,
                });
            }
        }
        DesktopAction::UpdateWindowPosition { window_id, x, y } => {
            window_manager::update_window_position(state, window_id, x, y);
        }
        DesktopAction::UpdateWindowSize {
            window_id,
            width,
            height,
        } => {
            window_manager::update_window_size(state, window_id, width, height);
        }
        DesktopAction::SetWindowTitle { window_id, title } => {
            window_manager::update_window_title(state, window_id, title);
        }
        DesktopAction::SetViewport { viewport } => {
            window_manager::set_viewport(state, viewport);
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.window(window_id).filter(|w| !w.closing) else {
                return Ok(());
            };
            let draggable = !window.maximized;
            let rect = window.rect;
            window_manager::focus_window(state, window_id);
            if draggable {
                *interaction = InteractionState::Dragging(DragSession {
                    window_id,
                    grab_offset: grab_offset(rect, pointer),
                });
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let InteractionState::Dragging(session) = interaction {
                let (x, y) = drag_origin(session.grab_offset, pointer, state.viewport);
                window_manager::update_window_position(state, session.window_id, x, y);
            }
        }
        DesktopAction::EndMove => {
            if matches!(interaction, InteractionState::Dragging(_)) {
                *interaction = InteractionState::Idle;
            }
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let Some(window) = state.window(window_id).filter(|w| !w.closing) else {
                return Ok(());
            };
            let resizable = !window.maximized;
            let rect_start = window.rect;
            window_manager::focus_window(state, window_id);
            if resizable {
                *interaction = InteractionState::Resizing(ResizeSession {
                    window_id,
                    edge,
                    pointer_start: pointer,
                    rect_start,
                });
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let InteractionState::Resizing(session) = interaction {
                let rect = resize_rect(
                    session.rect_start,
                    session.edge,
                    pointer.x - session.pointer_start.x,
                    pointer.y - session.pointer_start.y,
                );
                window_manager::set_window_rect(state, session.window_id, rect);
            }
        }
        DesktopAction::EndResize => {
            if matches!(interaction, InteractionState::Resizing(_)) {
                *interaction = InteractionState::Idle;
            }
        }
        DesktopAction::SelectIcon {
            icon_id,
            multi_select,
        } => {
            ensure_icon(state, &icon_id)?;
            icons::select_icon(state, &icon_id, multi_select);
        }
        DesktopAction::ClearIconSelection => {
            icons::clear_selection(state);
        }
        DesktopAction::ActivateIcon { icon_id } => {
            let app_id = state
                .icons
                .iter()
                .find(|icon| icon.id == icon_id)
                .map(|icon| icon.app_id.clone())
                .ok_or_else(|| ReducerError::UnknownIcon(icon_id.clone()))?;
            window_manager::open_window(
                state,
                with_catalog_defaults(OpenWindowRequest::new(app_id)),
            );
        }
        DesktopAction::MoveIcon { icon_id, x, y } => {
            ensure_icon(state, &icon_id)?;
            if icons::drop_icon(state, &icon_id, x, y) {
                effects.push(RuntimeEffect::PersistDesktop);
            }
        }
        DesktopAction::BeginIconDrag { icon_id, pointer } => {
            let icon = state
                .icons
                .iter()
                .find(|icon| icon.id == icon_id)
                .ok_or_else(|| ReducerError::UnknownIcon(icon_id.clone()))?;
            *interaction = InteractionState::DraggingIcon(IconDragSession {
                grab_offset: PointerPosition {
                    x: pointer.x - icon.x,
                    y: pointer.y - icon.y,
                },
                icon_id,
                moved: false,
            });
        }
        DesktopAction::UpdateIconDrag { pointer } => {
            if let InteractionState::DraggingIcon(session) = interaction {
                let (x, y) = icon_drag_position(session.grab_offset, pointer, state.viewport);
                if icons::set_icon_position(state, &session.icon_id, x, y) {
                    session.moved = true;
                }
            }
        }
        DesktopAction::EndIconDrag => {
            if let InteractionState::DraggingIcon(session) =
                std::mem::take(interaction)
            {
                let position = state
                    .icons
                    .iter()
                    .find(|icon| icon.id == session.icon_id)
                    .map(|icon| (icon.x, icon.y));
                if let (true, Some((x, y))) = (session.moved, position) {
                    icons::drop_icon(state, &session.icon_id, x, y);
                    effects.push(RuntimeEffect::PersistDesktop);
                }
            }
        }
        DesktopAction::HydrateSnapshot { snapshot } => {
            state.icons = if snapshot.desktop_icons.is_empty() {
                icons::default_icons()
            } else {
                snapshot.desktop_icons
            };
            state.settings = validate_settings(snapshot.settings).unwrap_or_default();
            let icon_ids: Vec<String> = state.icons.iter().map(|icon| icon.id.clone()).collect();
            state.selected_icons.retain(|id| icon_ids.contains(id));
            effects.push(RuntimeEffect::ApplyTheme);
        }
        DesktopAction::AppCommand { window_id, command } => {
            if let Some(translated) = translate_app_command(state, window_id, command) {
                apply_action(state, interaction, translated, effects)?;
            }
        }
        DesktopAction::UpdateSettings { .. }
        | DesktopAction::AddNotification { .. }
        | DesktopAction::DismissNotification { .. }
        | DesktopAction::ClearNotifications
        | DesktopAction::StartBoot
        | DesktopAction::AdvanceBoot
        | DesktopAction::FinishBoot => {}
    }
    Ok(())
}

/// Fills title, icon, and default size from the app catalog.
pub fn with_catalog_defaults(mut req: OpenWindowRequest) -> OpenWindowRequest {
    if let Some(entry) = apps::app_registration(&req.app_id) {
        req.title.get_or_insert_with(|| entry.display_name.clone());
        req.icon_id.get_or_insert_with(|| entry.icon_id.clone());
        req.width.get_or_insert(entry.default_width);
        req.height.get_or_insert(entry.default_height);
    }
    req
}

fn ensure_icon(state: &DesktopState, icon_id: &str) -> Result<(), ReducerError> {
    if icons::has_icon(state, icon_id) {
        Ok(())
    } else {
        Err(ReducerError::UnknownIcon(icon_id.to_string()))
    }
}

/// Maps an app command onto the window that sent it. Commands from windows that are gone or
/// closing are dropped.
fn translate_app_command(
    state: &DesktopState,
    window_id: WindowId,
    command: AppCommand,
) -> Option<DesktopAction> {
    let window = state.window(window_id).filter(|w| !w.closing)?;
    Some(match command {
        AppCommand::FocusWindow => DesktopAction::FocusWindow { window_id },
        AppCommand::CloseWindow => DesktopAction::CloseWindow { window_id },
        AppCommand::SetWindowTitle { title } => DesktopAction::SetWindowTitle { window_id, title },
        AppCommand::OpenWindow {
            app_id,
            title,
            launch_params,
        } => {
            let mut req = OpenWindowRequest::new(app_id).with_launch_params(launch_params);
            req.title = title;
            DesktopAction::OpenWindow(req)
        }
        AppCommand::Notify {
            title,
            message,
            kind,
        } => DesktopAction::AddNotification {
            title,
            message,
            kind,
            app_id: Some(window.app_id.clone()),
        },
    })
}

fn drop_stale_session(state: &DesktopState, interaction: &mut InteractionState) {
    let window_id = match interaction {
        InteractionState::Dragging(session) => session.window_id,
        InteractionState::Resizing(session) => session.window_id,
        _ => return,
    };
    let live = state
        .window(window_id)
        .is_some_and(|w| !w.closing && !w.minimized && !w.maximized);
    if !live {
        *interaction = InteractionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{
        UserSettings, WindowRect, BOOT_FINISH_MS, BOOT_STEP_MS, MIN_WINDOW_HEIGHT,
        MIN_WINDOW_WIDTH,
    };

    fn app(raw: &str) -> ApplicationId {
        ApplicationId::new(raw).expect("app id")
    }

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, raw: &str) -> WindowId {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::new(app(raw))),
        )
        .unwrap();
        state.windows.last().expect("window").id
    }

    fn scheduled(effects: &[RuntimeEffect]) -> Vec<(u32, DesktopAction)> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                RuntimeEffect::DispatchAfter { delay_ms, action } => {
                    Some((*delay_ms, (**action).clone()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn open_uses_catalog_defaults() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = open(&mut state, &mut interaction, "calculator");
        let window = state.window(id).expect("window");
        assert_eq!(window.title, "Calculator");
        assert_eq!(window.icon_id, "icon-calculator");
        assert_eq!((window.rect.w, window.rect.h), (360, 520));

        let unknown = open(&mut state, &mut interaction, "solitaire");
        let window = state.window(unknown).expect("window");
        assert_eq!(window.title, "solitaire");
        assert_eq!((window.rect.w, window.rect.h), (900, 600));
    }

    #[test]
    fn focus_change_emits_lifecycle_and_input_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let a = open(&mut state, &mut interaction, "notes");
        let b = open(&mut state, &mut interaction, "terminal");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::FocusWindow { window_id: a },
        )
        .unwrap();
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::Lifecycle {
                    window_id: b,
                    event: AppLifecycleEvent::Blurred
                },
                RuntimeEffect::Lifecycle {
                    window_id: a,
                    event: AppLifecycleEvent::Focused
                },
                RuntimeEffect::FocusWindowInput(a),
            ]
        );
    }

    #[test]
    fn close_schedules_finalize_after_delay() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let a = open(&mut state, &mut interaction, "notes");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: a },
        )
        .unwrap();
        assert!(state.window(a).expect("still present").closing);
        assert_eq!(
            scheduled(&effects),
            vec![(CLOSE_DELAY_MS, DesktopAction::FinalizeClose { window_id: a })]
        );

        let again = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: a },
        )
        .unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn missing_window_actions_are_quiet_no_ops() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let ghost = WindowId(7);
        for action in [
            DesktopAction::CloseWindow { window_id: ghost },
            DesktopAction::FinalizeClose { window_id: ghost },
            DesktopAction::FocusWindow { window_id: ghost },
            DesktopAction::MinimizeWindow { window_id: ghost },
            DesktopAction::RestoreWindow { window_id: ghost },
            DesktopAction::UpdateWindowPosition {
                window_id: ghost,
                x: 1,
                y: 1,
            },
            DesktopAction::BeginMove {
                window_id: ghost,
                pointer: PointerPosition { x: 0, y: 0 },
            },
            DesktopAction::AppCommand {
                window_id: ghost,
                command: AppCommand::CloseWindow,
            },
        ] {
            let effects = reduce_desktop(&mut state, &mut interaction, action).unwrap();
            assert!(effects.is_empty());
        }
        assert_eq!(state, DesktopState::default());
        assert!(interaction.is_idle());
    }

    #[test]
    fn drag_session_moves_window_with_clamp_and_ends_on_pointer_up() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let a = open(&mut state, &mut interaction, "notes");
        let start = state.window(a).expect("a").rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: a,
                pointer: PointerPosition {
                    x: start.x + 10,
                    y: start.y + 5,
                },
            },
        )
        .unwrap();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 310, y: 205 },
            },
        )
        .unwrap();
        let rect = state.window(a).expect("a").rect;
        assert_eq!((rect.x, rect.y), (300, 200));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 99_999, y: -50 },
            },
        )
        .unwrap();
        let rect = state.window(a).expect("a").rect;
        assert_eq!((rect.x, rect.y), (924, 0));

        reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).unwrap();
        assert!(interaction.is_idle());
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 400, y: 400 },
            },
        )
        .unwrap();
        assert_eq!(state.window(a).expect("a").rect.x, 924);
    }

    #[test]
    fn maximized_windows_focus_but_do_not_drag() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let a = open(&mut state, &mut interaction, "notes");
        let b = open(&mut state, &mut interaction, "terminal");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow { window_id: a },
        )
        .unwrap();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: a,
                pointer: PointerPosition { x: 10, y: 10 },
            },
        )
        .unwrap();
        assert!(interaction.is_idle());
        assert_eq!(state.focused, Some(a));
        assert_ne!(state.focused, Some(b));
    }

    #[test]
    fn resize_session_floors_size_and_anchors_edges() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let a = open(&mut state, &mut interaction, "notes");
        let start = state.window(a).expect("a").rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: a,
                edge: ResizeEdge::NorthWest,
                pointer: PointerPosition {
                    x: start.x,
                    y: start.y,
                },
            },
        )
        .unwrap();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: 5000, y: 5000 },
            },
        )
        .unwrap();
        let rect = state.window(a).expect("a").rect;
        assert_eq!(
            rect,
            WindowRect {
                x: start.x + start.w - MIN_WINDOW_WIDTH,
                y: start.y + start.h - MIN_WINDOW_HEIGHT,
                w: MIN_WINDOW_WIDTH,
                h: MIN_WINDOW_HEIGHT,
            }
        );

        reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).unwrap();
        assert!(matches!(interaction, InteractionState::Resizing(_)));
        reduce_desktop(&mut state, &mut interaction, DesktopAction::EndResize).unwrap();
        assert!(interaction.is_idle());
    }

    #[test]
    fn minimizing_dragged_window_ends_session() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let a = open(&mut state, &mut interaction, "notes");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: a,
                pointer: PointerPosition { x: 100, y: 100 },
            },
        )
        .unwrap();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: a },
        )
        .unwrap();
        assert!(interaction.is_idle());
        assert_eq!(
            effects[0],
            RuntimeEffect::Lifecycle {
                window_id: a,
                event: AppLifecycleEvent::Minimized
            }
        );
    }

    #[test]
    fn icon_drag_snaps_on_drop_and_persists_only_when_moved() {
        let mut state = DesktopState::with_default_icons();
        let mut interaction = InteractionState::default();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                icon_id: "icon-notes".to_string(),
                pointer: PointerPosition { x: 30, y: 430 },
            },
        )
        .unwrap();
        let effects =
            reduce_desktop(&mut state, &mut interaction, DesktopAction::EndIconDrag).unwrap();
        assert!(effects.is_empty());

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                icon_id: "icon-notes".to_string(),
                pointer: PointerPosition { x: 30, y: 430 },
            },
        )
        .unwrap();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateIconDrag {
                pointer: PointerPosition { x: 268, y: 372 },
            },
        )
        .unwrap();
        let effects =
            reduce_desktop(&mut state, &mut interaction, DesktopAction::EndIconDrag).unwrap();
        assert_eq!(effects, vec![RuntimeEffect::PersistDesktop]);
        let notes = state
            .icons
            .iter()
            .find(|icon| icon.id == "icon-notes")
            .expect("notes");
        assert_eq!((notes.x, notes.y), (300, 400));
        assert!(interaction.is_idle());
    }

    #[test]
    fn unknown_icons_are_rejected() {
        let mut state = DesktopState::with_default_icons();
        let mut interaction = InteractionState::default();
        let before = state.clone();
        for action in [
            DesktopAction::SelectIcon {
                icon_id: "icon-nope".to_string(),
                multi_select: false,
            },
            DesktopAction::ActivateIcon {
                icon_id: "icon-nope".to_string(),
            },
            DesktopAction::MoveIcon {
                icon_id: "icon-nope".to_string(),
                x: 0,
                y: 0,
            },
        ] {
            assert_eq!(
                reduce_desktop(&mut state, &mut interaction, action),
                Err(ReducerError::UnknownIcon("icon-nope".to_string()))
            );
        }
        assert_eq!(state, before);
    }

    #[test]
    fn activating_icon_opens_its_app() {
        let mut state = DesktopState::with_default_icons();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateIcon {
                icon_id: "icon-text-editor".to_string(),
            },
        )
        .unwrap();
        let window = state.windows.last().expect("window");
        assert_eq!(window.app_id, app("text-editor"));
        assert_eq!(window.title, "Text Editor");
        assert_eq!(state.focused, Some(window.id));
    }

    #[test]
    fn settings_update_persists_and_applies_theme() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateSettings {
                patch: SettingsPatch {
                    theme: Some(crate::model::ThemeMode::Light),
                    ..SettingsPatch::default()
                },
            },
        )
        .unwrap();
        assert_eq!(
            effects,
            vec![RuntimeEffect::ApplyTheme, RuntimeEffect::PersistDesktop]
        );

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateSettings {
                patch: SettingsPatch {
                    wallpaper: Some("ocean".to_string()),
                    ..SettingsPatch::default()
                },
            },
        )
        .unwrap();
        assert_eq!(effects, vec![RuntimeEffect::PersistDesktop]);

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateSettings {
                patch: SettingsPatch {
                    wallpaper: Some("cosmic".to_string()),
                    accent_color: Some("red".to_string()),
                    ..SettingsPatch::default()
                },
            },
        );
        assert!(matches!(err, Err(ReducerError::InvalidSettings(_))));
        assert_eq!(state.settings.wallpaper, "ocean");
    }

    #[test]
    fn notifications_cap_and_schedule_dismissal() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let mut last = Vec::new();
        for n in 0..55 {
            last = reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::AddNotification {
                    title: format!("n{n}"),
                    message: String::new(),
                    kind: NotificationKind::Info,
                    app_id: None,
                },
            )
            .unwrap();
        }
        assert_eq!(state.notifications.len(), 50);
        assert_eq!(state.notifications[0].title, "n54");
        assert_eq!(
            scheduled(&last),
            vec![(5000, DesktopAction::DismissNotification { id: 55 })]
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DismissNotification { id: 55 },
        )
        .unwrap();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DismissNotification { id: 1 },
        )
        .unwrap();
        assert_eq!(state.notifications.len(), 49);
        reduce_desktop(&mut state, &mut interaction, DesktopAction::ClearNotifications).unwrap();
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn boot_steps_then_finishes() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::StartBoot).unwrap();
        assert_eq!(
            scheduled(&effects),
            vec![(BOOT_STEP_MS, DesktopAction::AdvanceBoot)]
        );

        let mut progress = Vec::new();
        for _ in 0..5 {
            let effects =
                reduce_desktop(&mut state, &mut interaction, DesktopAction::AdvanceBoot).unwrap();
            assert_eq!(
                scheduled(&effects),
                vec![(BOOT_STEP_MS, DesktopAction::AdvanceBoot)]
            );
            progress.push(state.boot.progress);
        }
        assert_eq!(progress, vec![20, 40, 60, 80, 100]);
        assert_eq!(state.boot.status, "Welcome!");

        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::AdvanceBoot).unwrap();
        assert_eq!(
            scheduled(&effects),
            vec![(BOOT_FINISH_MS, DesktopAction::FinishBoot)]
        );
        reduce_desktop(&mut state, &mut interaction, DesktopAction::FinishBoot).unwrap();
        assert!(!state.boot.booting);
        assert!(reduce_desktop(&mut state, &mut interaction, DesktopAction::AdvanceBoot)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn hydrate_falls_back_to_default_icons_when_empty() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let settings = UserSettings {
            username: "grace".to_string(),
            ..UserSettings::default()
        };
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateSnapshot {
                snapshot: DesktopSnapshot {
                    schema_version: 1,
                    desktop_icons: Vec::new(),
                    settings: settings.clone(),
                },
            },
        )
        .unwrap();
        assert_eq!(effects, vec![RuntimeEffect::ApplyTheme]);
        assert_eq!(state.icons, icons::default_icons());
        assert_eq!(state.settings, settings);
    }

    #[test]
    fn hydrate_replaces_invalid_settings_with_defaults() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateSnapshot {
                snapshot: DesktopSnapshot {
                    schema_version: 1,
                    desktop_icons: icons::default_icons(),
                    settings: UserSettings {
                        wallpaper: "beach".to_string(),
                        accent_color: "red;}".to_string(),
                        username: String::new(),
                        ..UserSettings::default()
                    },
                },
            },
        )
        .unwrap();
        assert_eq!(state.settings, UserSettings::default());
    }

    #[test]
    fn app_commands_target_the_sending_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let explorer = open(&mut state, &mut interaction, "file-explorer");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::AppCommand {
                window_id: explorer,
                command: AppCommand::SetWindowTitle {
                    title: "Documents".to_string(),
                },
            },
        )
        .unwrap();
        assert_eq!(state.window(explorer).expect("explorer").title, "Documents");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::AppCommand {
                window_id: explorer,
                command: AppCommand::OpenWindow {
                    app_id: app("text-editor"),
                    title: Some("Welcome.txt".to_string()),
                    launch_params: json!({ "file_id": 7 }),
                },
            },
        )
        .unwrap();
        let editor = state.windows.last().expect("editor");
        assert_eq!(editor.title, "Welcome.txt");
        assert_eq!(editor.launch_params, json!({ "file_id": 7 }));
        assert_eq!(state.focused, Some(editor.id));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::AppCommand {
                window_id: explorer,
                command: AppCommand::Notify {
                    title: "Saved".to_string(),
                    message: "ok".to_string(),
                    kind: NotificationKind::Success,
                },
            },
        )
        .unwrap();
        assert_eq!(state.notifications[0].app_id, Some(app("file-explorer")));
    }

    #[test]
    fn start_menu_toggles_and_closes_on_open() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(&mut state, &mut interaction, DesktopAction::ToggleStartMenu).unwrap();
        assert!(state.start_menu_open);
        open(&mut state, &mut interaction, "notes");
        assert!(!state.start_menu_open);
        reduce_desktop(&mut state, &mut interaction, DesktopAction::ToggleStartMenu).unwrap();
        reduce_desktop(&mut state, &mut interaction, DesktopAction::CloseStartMenu).unwrap();
        assert!(!state.start_menu_open);
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Open,
        Focus(usize),
        Minimize(usize),
        Restore(usize),
        Maximize(usize),
        Close(usize),
        Finalize(usize),
        Taskbar(usize),
    }

    fn all_ops() -> Vec<Op> {
        let mut ops = vec![Op::Open];
        for slot in 0..3 {
            ops.extend([
                Op::Focus(slot),
                Op::Minimize(slot),
                Op::Restore(slot),
                Op::Maximize(slot),
                Op::Close(slot),
                Op::Finalize(slot),
                Op::Taskbar(slot),
            ]);
        }
        ops
    }

    fn to_action(op: Op, ids: &[WindowId]) -> DesktopAction {
        let pick = |slot: usize| ids.get(slot).copied().unwrap_or(WindowId(999));
        match op {
            Op::Open => DesktopAction::OpenWindow(OpenWindowRequest::new(app("notes"))),
            Op::Focus(s) => DesktopAction::FocusWindow { window_id: pick(s) },
            Op::Minimize(s) => DesktopAction::MinimizeWindow { window_id: pick(s) },
            Op::Restore(s) => DesktopAction::RestoreWindow { window_id: pick(s) },
            Op::Maximize(s) => DesktopAction::MaximizeWindow { window_id: pick(s) },
            Op::Close(s) => DesktopAction::CloseWindow { window_id: pick(s) },
            Op::Finalize(s) => DesktopAction::FinalizeClose { window_id: pick(s) },
            Op::Taskbar(s) => DesktopAction::ToggleTaskbarWindow { window_id: pick(s) },
        }
    }

    fn assert_invariants(state: &DesktopState) {
        if let Some(focused) = state.focused {
            let window = state.window(focused).expect("focused window exists");
            assert!(!window.minimized, "focused window is minimized");
        }
        let mut zs: Vec<u64> = state.windows.iter().map(|w| w.z_index).collect();
        zs.sort_unstable();
        zs.dedup();
        assert_eq!(zs.len(), state.windows.len(), "duplicate z-order values");
        assert!(state.windows.iter().all(|w| w.z_index < state.next_z_index));
    }

    #[test]
    fn operation_sequences_preserve_focus_and_z_order_invariants() {
        let ops = all_ops();
        for first in &ops {
            for second in &ops {
                for third in &ops {
                    let mut state = DesktopState::default();
                    let mut interaction = InteractionState::default();
                    let ids: Vec<WindowId> = (0..3)
                        .map(|_| open(&mut state, &mut interaction, "notes"))
                        .collect();
                    let mut high_water = state.next_z_index;

                    for op in [*first, *second, *third] {
                        reduce_desktop(&mut state, &mut interaction, to_action(op, &ids)).unwrap();
                        assert_invariants(&state);

                        assert!(state.next_z_index >= high_water);
                        if state.next_z_index > high_water {
                            // A focus-causing op: the raised window is focused and on top.
                            let top = state
                                .windows
                                .iter()
                                .max_by_key(|w| w.z_index)
                                .expect("top window");
                            assert_eq!(top.z_index, state.next_z_index - 1);
                            assert!(top.z_index >= high_water);
                            assert_eq!(state.focused, Some(top.id), "{first:?} {second:?} {third:?}");
                        }
                        high_water = state.next_z_index;
                    }
                }
            }
        }
    }

    #[test]
    fn minimize_restore_round_trip_over_window_shapes() {
        for maximized in [false, true] {
            for focus_other in [false, true] {
                let mut state = DesktopState::default();
                let mut interaction = InteractionState::default();
                let w = open(&mut state, &mut interaction, "notes");
                let other = open(&mut state, &mut interaction, "terminal");
                if maximized {
                    reduce_desktop(
                        &mut state,
                        &mut interaction,
                        DesktopAction::MaximizeWindow { window_id: w },
                    )
                    .unwrap();
                }
                if focus_other {
                    reduce_desktop(
                        &mut state,
                        &mut interaction,
                        DesktopAction::FocusWindow { window_id: other },
                    )
                    .unwrap();
                }
                let before = state.window(w).cloned().expect("w");

                reduce_desktop(
                    &mut state,
                    &mut interaction,
                    DesktopAction::MinimizeWindow { window_id: w },
                )
                .unwrap();
                reduce_desktop(
                    &mut state,
                    &mut interaction,
                    DesktopAction::RestoreWindow { window_id: w },
                )
                .unwrap();

                let after = state.window(w).expect("w");
                assert_eq!(after.id, before.id);
                assert_eq!(after.rect, before.rect);
                assert_eq!(after.maximized, before.maximized);
                assert!(!after.minimized);
                assert!(after.z_index > before.z_index);
                assert_eq!(state.focused, Some(w));
            }
        }
    }
}
