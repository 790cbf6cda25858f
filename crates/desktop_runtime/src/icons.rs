//! Desktop icon layer: default layout, selection set, and icon placement.

use crate::apps;
use crate::interaction::snap_icon_position;
use crate::model::{DesktopIcon, DesktopState};

/// Icon id for an app's desktop shortcut.
pub fn icon_id_for(app_id: &str) -> String {
    format!("icon-{app_id}")
}

/// Default layout from the catalog's desktop icon slots.
pub fn default_icons() -> Vec<DesktopIcon> {
    apps::app_catalog()
        .iter()
        .filter_map(|entry| {
            entry.desktop_icon.as_ref().map(|slot| DesktopIcon {
                id: icon_id_for(entry.app_id.as_str()),
                app_id: entry.app_id.clone(),
                label: slot.label.clone(),
                icon_id: entry.icon_id.clone(),
                x: slot.x,
                y: slot.y,
            })
        })
        .collect()
}

pub fn has_icon(state: &DesktopState, icon_id: &str) -> bool {
    state.icons.iter().any(|icon| icon.id == icon_id)
}

/// Single select replaces the set; multi select toggles membership.
pub fn select_icon(state: &mut DesktopState, icon_id: &str, multi_select: bool) {
    if multi_select {
        if !state.selected_icons.remove(icon_id) {
            state.selected_icons.insert(icon_id.to_string());
        }
    } else {
        state.selected_icons.clear();
        state.selected_icons.insert(icon_id.to_string());
    }
}

pub fn clear_selection(state: &mut DesktopState) -> bool {
    if state.selected_icons.is_empty() {
        return false;
    }
    state.selected_icons.clear();
    true
}

/// Places an icon without snapping; used for the live position during a drag.
pub fn set_icon_position(state: &mut DesktopState, icon_id: &str, x: i32, y: i32) -> bool {
    let Some(icon) = state.icons.iter_mut().find(|icon| icon.id == icon_id) else {
        return false;
    };
    if icon.x == x && icon.y == y {
        return false;
    }
    icon.x = x;
    icon.y = y;
    true
}

/// Drops an icon at the nearest grid cell.
pub fn drop_icon(state: &mut DesktopState, icon_id: &str, x: i32, y: i32) -> bool {
    let (x, y) = snap_icon_position(x, y);
    set_icon_position(state, icon_id, x, y)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_layout_comes_from_catalog_slots() {
        let icons = default_icons();
        let files = icons
            .iter()
            .find(|icon| icon.id == "icon-file-explorer")
            .expect("file explorer icon");
        assert_eq!((files.label.as_str(), files.x, files.y), ("Files", 20, 20));
        assert!(icons.iter().all(|icon| icon.id != "icon-image-viewer"));
        assert_eq!(icons.len(), 7);
    }

    #[test]
    fn selection_single_replaces_and_multi_toggles() {
        let mut state = DesktopState::with_default_icons();
        select_icon(&mut state, "icon-notes", false);
        select_icon(&mut state, "icon-browser", true);
        assert_eq!(
            state.selected_icons.iter().cloned().collect::<Vec<_>>(),
            vec!["icon-browser".to_string(), "icon-notes".to_string()]
        );

        select_icon(&mut state, "icon-notes", true);
        assert_eq!(state.selected_icons.len(), 1);

        select_icon(&mut state, "icon-terminal", false);
        assert_eq!(
            state.selected_icons.iter().cloned().collect::<Vec<_>>(),
            vec!["icon-terminal".to_string()]
        );
        assert!(clear_selection(&mut state));
        assert!(!clear_selection(&mut state));
    }

    #[test]
    fn drop_snaps_to_grid() {
        let mut state = DesktopState::with_default_icons();
        assert!(drop_icon(&mut state, "icon-notes", 333, 18));
        let notes = state
            .icons
            .iter()
            .find(|icon| icon.id == "icon-notes")
            .expect("notes");
        assert_eq!((notes.x, notes.y), (300, 20));
        assert!(!drop_icon(&mut state, "icon-missing", 0, 0));
    }
}
