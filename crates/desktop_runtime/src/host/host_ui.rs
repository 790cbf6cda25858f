#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::model::{ThemeMode, UserSettings, Viewport, WindowId};

/// DOM id of the element that receives focus when a window becomes active.
pub fn window_primary_input_dom_id(window_id: WindowId) -> String {
    format!("window-{}-primary-input", window_id.0)
}

pub(super) fn focus_window_input(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(element) = document.get_element_by_id(&window_primary_input_dom_id(window_id))
        else {
            return;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            let _ = element.focus();
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}

/// Root element classes derived from the settings.
pub fn theme_classes(settings: &UserSettings) -> Vec<(&'static str, bool)> {
    vec![
        ("light", settings.theme == ThemeMode::Light),
        ("no-animations", !settings.animations_enabled),
        ("no-transparency", !settings.transparency),
    ]
}

pub(super) fn apply_theme(settings: &UserSettings) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        else {
            return;
        };
        let classes = root.class_list();
        for (class, enabled) in theme_classes(settings) {
            let _ = classes.toggle_with_force(class, enabled);
        }
        if let Ok(root) = root.dyn_into::<web_sys::HtmlElement>() {
            let _ = root
                .style()
                .set_property("--accent-color", &settings.accent_color);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = theme_classes(settings);
}

pub(super) fn desktop_viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(1024);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(768);
            return Viewport { width, height };
        }
    }

    Viewport::default()
}
