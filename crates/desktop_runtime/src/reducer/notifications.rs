//! Reducer helpers for notification toasts.

use crate::{
    model::{DesktopState, Notification, MAX_NOTIFICATIONS, NOTIFICATION_DISMISS_MS},
    reducer::{DesktopAction, RuntimeEffect},
};

pub(super) fn reduce_notification_action(
    state: &mut DesktopState,
    action: &DesktopAction,
    effects: &mut Vec<RuntimeEffect>,
) -> bool {
    match action {
        DesktopAction::AddNotification {
            title,
            message,
            kind,
            app_id,
        } => {
            let id = state.next_notification_id;
            state.next_notification_id = state.next_notification_id.saturating_add(1);
            state.notifications.insert(
                0,
                Notification {
                    id,
                    title: title.clone(),
                    message: message.clone(),
                    kind: *kind,
                    app_id: app_id.clone(),
                },
            );
            state.notifications.truncate(MAX_NOTIFICATIONS);
            effects.push(RuntimeEffect::DispatchAfter {
                delay_ms: NOTIFICATION_DISMISS_MS,
                action: Box::new(DesktopAction::DismissNotification { id }),
            });
        }
        DesktopAction::DismissNotification { id } => {
            state.notifications.retain(|n| n.id != *id);
        }
        DesktopAction::ClearNotifications => {
            state.notifications.clear();
        }
        _ => return false,
    }
    true
}
