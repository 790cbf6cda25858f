//! Global keyboard shortcuts for the shell.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ShellShortcut {
    ToggleStartMenu,
    Dismiss,
}

/// Maps a key press to a shell shortcut. Modifier chords with `Meta` belong to the browser.
pub(super) fn shell_shortcut(key: &str, alt: bool, ctrl: bool) -> Option<ShellShortcut> {
    match key {
        "Meta" | "OS" if !alt && !ctrl => Some(ShellShortcut::ToggleStartMenu),
        "Escape" if !alt => Some(ShellShortcut::Dismiss),
        _ => None,
    }
}

/// Enter and Space activate focused desktop icons and taskbar entries.
pub(super) fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn meta_toggles_and_escape_dismisses() {
        assert_eq!(
            shell_shortcut("Meta", false, false),
            Some(ShellShortcut::ToggleStartMenu)
        );
        assert_eq!(shell_shortcut("Meta", false, true), None);
        assert_eq!(
            shell_shortcut("Escape", false, false),
            Some(ShellShortcut::Dismiss)
        );
        assert_eq!(shell_shortcut("Escape", true, false), None);
        assert_eq!(shell_shortcut("a", false, false), None);
    }

    #[test]
    fn activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Tab"));
    }
}
