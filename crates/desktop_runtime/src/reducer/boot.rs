//! Reducer helpers for the timed boot sequence.

use crate::{
    model::{BootState, DesktopState, BOOT_FINISH_MS, BOOT_STEP_MS},
    reducer::{DesktopAction, RuntimeEffect},
};

/// `(progress, status)` applied one per tick.
pub const BOOT_STEPS: [(u8, &str); 5] = [
    (20, "Loading system files..."),
    (40, "Initializing desktop..."),
    (60, "Loading applications..."),
    (80, "Starting services..."),
    (100, "Welcome!"),
];

fn schedule(effects: &mut Vec<RuntimeEffect>, delay_ms: u32, action: DesktopAction) {
    effects.push(RuntimeEffect::DispatchAfter {
        delay_ms,
        action: Box::new(action),
    });
}

pub(super) fn reduce_boot_action(
    state: &mut DesktopState,
    action: &DesktopAction,
    effects: &mut Vec<RuntimeEffect>,
) -> bool {
    match action {
        DesktopAction::StartBoot => {
            state.boot = BootState::default();
            schedule(effects, BOOT_STEP_MS, DesktopAction::AdvanceBoot);
        }
        DesktopAction::AdvanceBoot => {
            if !state.boot.booting {
                return true;
            }
            match BOOT_STEPS.get(state.boot.step) {
                Some((progress, status)) => {
                    state.boot.progress = *progress;
                    state.boot.status = (*status).to_string();
                    state.boot.step += 1;
                    schedule(effects, BOOT_STEP_MS, DesktopAction::AdvanceBoot);
                }
                None => schedule(effects, BOOT_FINISH_MS, DesktopAction::FinishBoot),
            }
        }
        DesktopAction::FinishBoot => {
            state.boot.booting = false;
        }
        _ => return false,
    }
    true
}
