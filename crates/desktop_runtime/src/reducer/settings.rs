//! Reducer helpers for user settings.

use crate::{
    model::{DesktopState, SettingsPatch, UserSettings, WALLPAPER_IDS},
    reducer::{DesktopAction, ReducerError, RuntimeEffect},
};

fn is_hex_color(raw: &str) -> bool {
    raw.len() == 7
        && raw.starts_with('#')
        && raw[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Merges `patch` over `current`, rejecting the whole patch on the first invalid field.
pub fn merge_settings(
    current: &UserSettings,
    patch: &SettingsPatch,
) -> Result<UserSettings, ReducerError> {
    let mut next = current.clone();
    if let Some(wallpaper) = &patch.wallpaper {
        if !WALLPAPER_IDS.contains(&wallpaper.as_str()) {
            return Err(ReducerError::InvalidSettings(format!(
                "unknown wallpaper `{wallpaper}`"
            )));
        }
        next.wallpaper = wallpaper.clone();
    }
    if let Some(accent) = &patch.accent_color {
        if !is_hex_color(accent) {
            return Err(ReducerError::InvalidSettings(format!(
                "accent color `{accent}` is not #rrggbb"
            )));
        }
        next.accent_color = accent.to_ascii_lowercase();
    }
    if let Some(username) = &patch.username {
        let username = username.trim();
        if username.is_empty() {
            return Err(ReducerError::InvalidSettings(
                "username must not be empty".to_string(),
            ));
        }
        next.username = username.to_string();
    }
    if let Some(theme) = patch.theme {
        next.theme = theme;
    }
    if let Some(icon_size) = patch.icon_size {
        next.icon_size = icon_size;
    }
    if let Some(enabled) = patch.animations_enabled {
        next.animations_enabled = enabled;
    }
    if let Some(enabled) = patch.transparency {
        next.transparency = enabled;
    }
    Ok(next)
}

/// Runs stored settings through the same checks as an update.
///
/// # Errors
///
/// Returns [`ReducerError::InvalidSettings`] for the first field an update would reject.
pub fn validate_settings(settings: UserSettings) -> Result<UserSettings, ReducerError> {
    let patch = SettingsPatch {
        wallpaper: Some(settings.wallpaper),
        theme: Some(settings.theme),
        accent_color: Some(settings.accent_color),
        username: Some(settings.username),
        icon_size: Some(settings.icon_size),
        animations_enabled: Some(settings.animations_enabled),
        transparency: Some(settings.transparency),
    };
    merge_settings(&UserSettings::default(), &patch)
}

/// Fields read by the document root classes and the accent variable.
fn appearance_differs(current: &UserSettings, next: &UserSettings) -> bool {
    current.theme != next.theme
        || current.accent_color != next.accent_color
        || current.animations_enabled != next.animations_enabled
        || current.transparency != next.transparency
}

pub(super) fn reduce_settings_action(
    state: &mut DesktopState,
    action: &DesktopAction,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<bool, ReducerError> {
    match action {
        DesktopAction::UpdateSettings { patch } => {
            let next = merge_settings(&state.settings, patch)?;
            if next == state.settings {
                return Ok(true);
            }
            let appearance_changed = appearance_differs(&state.settings, &next);
            state.settings = next;
            if appearance_changed {
                effects.push(RuntimeEffect::ApplyTheme);
            }
            effects.push(RuntimeEffect::PersistDesktop);
        }
        _ => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{IconSize, ThemeMode};

    #[test]
    fn merge_keeps_unspecified_fields() {
        let current = UserSettings::default();
        let next = merge_settings(
            &current,
            &SettingsPatch {
                theme: Some(ThemeMode::Light),
                icon_size: Some(IconSize::Large),
                username: Some("  ada ".to_string()),
                ..SettingsPatch::default()
            },
        )
        .expect("valid patch");
        assert_eq!(
            next,
            UserSettings {
                theme: ThemeMode::Light,
                icon_size: IconSize::Large,
                username: "ada".to_string(),
                ..current
            }
        );
    }

    #[test]
    fn invalid_fields_reject_whole_patch() {
        let current = UserSettings::default();
        for patch in [
            SettingsPatch {
                wallpaper: Some("beach".to_string()),
                ..SettingsPatch::default()
            },
            SettingsPatch {
                accent_color: Some("blue".to_string()),
                theme: Some(ThemeMode::Light),
                ..SettingsPatch::default()
            },
            SettingsPatch {
                username: Some("   ".to_string()),
                ..SettingsPatch::default()
            },
        ] {
            assert!(matches!(
                merge_settings(&current, &patch),
                Err(ReducerError::InvalidSettings(_))
            ));
        }
        assert!(is_hex_color("#A0b1C2"));
        assert!(!is_hex_color("#a0b1c"));
    }

    fn update(state: &mut DesktopState, patch: SettingsPatch) -> Vec<RuntimeEffect> {
        let mut effects = Vec::new();
        let handled = reduce_settings_action(
            state,
            &DesktopAction::UpdateSettings { patch },
            &mut effects,
        )
        .expect("valid patch");
        assert!(handled);
        effects
    }

    #[test]
    fn motion_and_transparency_toggles_reapply_theme() {
        let mut state = DesktopState::default();
        assert_eq!(
            update(
                &mut state,
                SettingsPatch {
                    animations_enabled: Some(false),
                    ..SettingsPatch::default()
                },
            ),
            vec![RuntimeEffect::ApplyTheme, RuntimeEffect::PersistDesktop]
        );
        assert_eq!(
            update(
                &mut state,
                SettingsPatch {
                    transparency: Some(false),
                    ..SettingsPatch::default()
                },
            ),
            vec![RuntimeEffect::ApplyTheme, RuntimeEffect::PersistDesktop]
        );
    }

    #[test]
    fn stored_settings_are_checked_like_updates() {
        let stored = UserSettings {
            accent_color: "#ABCDEF".to_string(),
            username: " ada ".to_string(),
            ..UserSettings::default()
        };
        let checked = validate_settings(stored).expect("valid settings");
        assert_eq!(checked.accent_color, "#abcdef");
        assert_eq!(checked.username, "ada");

        let broken = UserSettings {
            accent_color: "red;}".to_string(),
            ..UserSettings::default()
        };
        assert!(matches!(
            validate_settings(broken),
            Err(ReducerError::InvalidSettings(_))
        ));
    }

    #[test]
    fn non_appearance_changes_only_persist() {
        let mut state = DesktopState::default();
        assert_eq!(
            update(
                &mut state,
                SettingsPatch {
                    icon_size: Some(IconSize::Large),
                    username: Some("grace".to_string()),
                    ..SettingsPatch::default()
                },
            ),
            vec![RuntimeEffect::PersistDesktop]
        );
    }
}
