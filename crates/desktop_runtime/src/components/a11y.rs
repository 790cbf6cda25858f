//! DOM focus and menu-keyboard helpers for shell menus.

use wasm_bindgen::JsCast;

const MENU_ITEM_SELECTOR: &str = r#"[role="menuitem"]:not([disabled])"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MenuFocus {
    First,
    Last,
    Next,
    Previous,
}

impl MenuFocus {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(Self::Next),
            "ArrowUp" => Some(Self::Previous),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            _ => None,
        }
    }
}

/// Index to focus among `len` items, wrapping at both ends.
pub(super) fn menu_focus_index(current: Option<usize>, len: usize, focus: MenuFocus) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (focus, current) {
        (MenuFocus::First, _) | (MenuFocus::Next, None) => 0,
        (MenuFocus::Last, _) | (MenuFocus::Previous, None) => len - 1,
        (MenuFocus::Next, Some(index)) => (index + 1) % len,
        (MenuFocus::Previous, Some(index)) => (index + len - 1) % len,
    })
}

fn html_element_by_id(id: &str) -> Option<web_sys::HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

/// Focuses an element by id and reports whether it was found.
pub(super) fn focus_element_by_id(id: &str) -> bool {
    match html_element_by_id(id) {
        Some(element) => element.focus().is_ok(),
        None => false,
    }
}

fn menu_items(menu_id: &str) -> Vec<web_sys::HtmlElement> {
    let Some(nodes) = html_element_by_id(menu_id)
        .and_then(|menu| menu.query_selector_all(MENU_ITEM_SELECTOR).ok())
    else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

fn focus_menu_item(menu_id: &str, focus: MenuFocus) -> bool {
    let items = menu_items(menu_id);
    let active = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element());
    let current = active.and_then(|active| {
        let active: &web_sys::Node = active.as_ref();
        items.iter().position(|item| item.is_same_node(Some(active)))
    });
    let Some(index) = menu_focus_index(current, items.len(), focus) else {
        return false;
    };
    items[index].focus().is_ok()
}

/// Focuses the first enabled item inside a menu container.
pub(super) fn focus_first_menu_item(menu_id: &str) -> bool {
    focus_menu_item(menu_id, MenuFocus::First)
}

/// Arrow/Home/End navigation inside a menu. Prevents default when handled.
pub(super) fn handle_menu_roving_keydown(ev: &web_sys::KeyboardEvent, menu_id: &str) -> bool {
    let Some(focus) = MenuFocus::from_key(&ev.key()) else {
        return false;
    };
    let handled = focus_menu_item(menu_id, focus);
    if handled {
        ev.prevent_default();
        ev.stop_propagation();
    }
    handled
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn roving_focus_wraps() {
        assert_eq!(menu_focus_index(Some(2), 3, MenuFocus::Next), Some(0));
        assert_eq!(menu_focus_index(Some(0), 3, MenuFocus::Previous), Some(2));
        assert_eq!(menu_focus_index(None, 3, MenuFocus::Next), Some(0));
        assert_eq!(menu_focus_index(None, 3, MenuFocus::Previous), Some(2));
        assert_eq!(menu_focus_index(Some(1), 3, MenuFocus::Last), Some(2));
        assert_eq!(menu_focus_index(Some(1), 0, MenuFocus::First), None);
    }

    #[test]
    fn only_navigation_keys_map_to_focus_moves() {
        assert_eq!(MenuFocus::from_key("ArrowDown"), Some(MenuFocus::Next));
        assert_eq!(MenuFocus::from_key("Home"), Some(MenuFocus::First));
        assert_eq!(MenuFocus::from_key("Enter"), None);
    }
}
