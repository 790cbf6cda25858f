//! Browser-free desktop session driven by a virtual clock.
//!
//! [`HeadlessDesktop`] runs the same reducer as the Leptos runtime and turns
//! [`RuntimeEffect::DispatchAfter`] into entries on a timer queue, so close delays, toast
//! dismissal, and the boot sequence can be stepped deterministically.

use crate::model::{DesktopState, InteractionState};
use crate::reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};

#[derive(Debug, Clone, PartialEq)]
struct ScheduledAction {
    due_ms: u64,
    seq: u64,
    action: DesktopAction,
}

#[derive(Debug, Clone, Default)]
/// Reducer plus timer queue with a manually advanced clock.
pub struct HeadlessDesktop {
    pub state: DesktopState,
    pub interaction: InteractionState,
    now_ms: u64,
    next_seq: u64,
    timers: Vec<ScheduledAction>,
    /// Effects other than timers, in emission order.
    emitted: Vec<RuntimeEffect>,
}

impl HeadlessDesktop {
    pub fn new(state: DesktopState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Drains effects recorded since the last call.
    pub fn take_effects(&mut self) -> Vec<RuntimeEffect> {
        std::mem::take(&mut self.emitted)
    }

    /// Dispatches `action` at the current virtual time.
    ///
    /// # Errors
    ///
    /// Returns the reducer's error; the state is unchanged in that case.
    pub fn dispatch(&mut self, action: DesktopAction) -> Result<(), ReducerError> {
        let effects = reduce_desktop(&mut self.state, &mut self.interaction, action)?;
        for effect in effects {
            match effect {
                RuntimeEffect::DispatchAfter { delay_ms, action } => {
                    self.timers.push(ScheduledAction {
                        due_ms: self.now_ms + u64::from(delay_ms),
                        seq: self.next_seq,
                        action: *action,
                    });
                    self.next_seq += 1;
                }
                other => self.emitted.push(other),
            }
        }
        Ok(())
    }

    fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledAction> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))
            .map(|(index, _)| index)?;
        Some(self.timers.remove(index))
    }

    /// Advances the clock by `ms`, firing due timers in due-time then scheduling order.
    /// Timers scheduled while advancing fire too when they fall inside the window.
    ///
    /// # Errors
    ///
    /// Returns the first reducer error raised by a timer action.
    pub fn advance(&mut self, ms: u64) -> Result<(), ReducerError> {
        let until = self.now_ms + ms;
        while let Some(timer) = self.pop_due(until) {
            self.now_ms = timer.due_ms;
            self.dispatch(timer.action)?;
        }
        self.now_ms = until;
        Ok(())
    }

    /// Fires every pending timer, including ones scheduled along the way.
    ///
    /// # Errors
    ///
    /// Returns the first reducer error raised by a timer action.
    pub fn run_until_idle(&mut self) -> Result<(), ReducerError> {
        while let Some(due) = self.timers.iter().map(|timer| timer.due_ms).min() {
            self.advance(due.saturating_sub(self.now_ms))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{ApplicationId, NotificationKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{OpenWindowRequest, WindowId, BOOT_FINISH_MS, BOOT_STEP_MS, CLOSE_DELAY_MS};

    fn open(desktop: &mut HeadlessDesktop, raw: &str, width: i32, height: i32) -> WindowId {
        desktop
            .dispatch(DesktopAction::OpenWindow(
                OpenWindowRequest::new(ApplicationId::new(raw).expect("app id"))
                    .with_size(width, height),
            ))
            .unwrap();
        desktop.state.windows.last().expect("window").id
    }

    #[test]
    fn close_removes_window_only_after_delay() {
        let mut desktop = HeadlessDesktop::default();
        let a = open(&mut desktop, "notes", 800, 600);
        let b = open(&mut desktop, "terminal", 800, 600);

        desktop
            .dispatch(DesktopAction::CloseWindow { window_id: b })
            .unwrap();
        assert!(desktop.state.window(b).expect("present").closing);
        assert_eq!(desktop.state.focused, Some(b));

        desktop.advance(u64::from(CLOSE_DELAY_MS) - 1).unwrap();
        assert!(desktop.state.window(b).is_some());

        desktop.advance(1).unwrap();
        assert!(desktop.state.window(b).is_none());
        assert_eq!(desktop.state.focused, Some(a));
    }

    #[test]
    fn concrete_open_minimize_close_scenario() {
        let mut desktop = HeadlessDesktop::default();
        let a = open(&mut desktop, "notes", 800, 600);
        let b = open(&mut desktop, "terminal", 900, 600);

        let za = desktop.state.window(a).expect("a").z_index;
        let zb = desktop.state.window(b).expect("b").z_index;
        assert!(zb > za);
        assert_eq!(desktop.state.focused, Some(b));

        desktop
            .dispatch(DesktopAction::MinimizeWindow { window_id: b })
            .unwrap();
        assert_eq!(desktop.state.focused, Some(a));

        desktop
            .dispatch(DesktopAction::CloseWindow { window_id: a })
            .unwrap();
        desktop.run_until_idle().unwrap();
        let visible: Vec<WindowId> = desktop
            .state
            .windows
            .iter()
            .filter(|w| !w.minimized)
            .map(|w| w.id)
            .collect();
        assert_eq!(visible, Vec::<WindowId>::new());
        assert!(desktop.state.window(a).is_none());
        assert_eq!(desktop.state.focused, None);

        desktop
            .dispatch(DesktopAction::CloseWindow { window_id: b })
            .unwrap();
        desktop.run_until_idle().unwrap();
        assert!(desktop.state.windows.is_empty());
        assert_eq!(desktop.state.focused, None);
    }

    #[test]
    fn boot_sequence_completes_on_schedule() {
        let mut desktop = HeadlessDesktop::default();
        desktop.dispatch(DesktopAction::StartBoot).unwrap();

        desktop.advance(u64::from(BOOT_STEP_MS)).unwrap();
        assert_eq!(desktop.state.boot.progress, 20);
        assert_eq!(desktop.state.boot.status, "Loading system files...");

        desktop.advance(u64::from(BOOT_STEP_MS) * 4).unwrap();
        assert_eq!(desktop.state.boot.progress, 100);
        assert!(desktop.state.boot.booting);

        let finish_at = u64::from(BOOT_STEP_MS) * 6 + u64::from(BOOT_FINISH_MS);
        desktop.advance(finish_at - desktop.now_ms() - 1).unwrap();
        assert!(desktop.state.boot.booting);
        desktop.advance(1).unwrap();
        assert!(!desktop.state.boot.booting);
        assert_eq!(desktop.pending_timers(), 0);
    }

    #[test]
    fn notifications_auto_dismiss_in_posting_order() {
        let mut desktop = HeadlessDesktop::default();
        for title in ["first", "second"] {
            desktop
                .dispatch(DesktopAction::AddNotification {
                    title: title.to_string(),
                    message: String::new(),
                    kind: NotificationKind::Info,
                    app_id: None,
                })
                .unwrap();
            desktop.advance(1000).unwrap();
        }
        desktop.advance(3000).unwrap();
        assert_eq!(
            desktop
                .state
                .notifications
                .iter()
                .map(|n| n.title.as_str())
                .collect::<Vec<_>>(),
            vec!["second"]
        );
        desktop.advance(1000).unwrap();
        assert!(desktop.state.notifications.is_empty());
    }

    #[test]
    fn non_timer_effects_are_recorded() {
        let mut desktop = HeadlessDesktop::default();
        let a = open(&mut desktop, "notes", 800, 600);
        assert_eq!(
            desktop.take_effects().last(),
            Some(&RuntimeEffect::FocusWindowInput(a))
        );
        assert!(desktop.take_effects().is_empty());
    }
}
