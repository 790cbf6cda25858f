//! Built-in gradient wallpapers and accent color presets.

use crate::model::WALLPAPER_IDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One selectable gradient wallpaper.
pub struct WallpaperPreset {
    pub id: &'static str,
    pub display_name: &'static str,
    /// CSS `background` value for the desktop surface.
    pub background: &'static str,
}

pub const WALLPAPER_PRESETS: [WallpaperPreset; 5] = [
    WallpaperPreset {
        id: "cosmic",
        display_name: "Cosmic",
        background: "linear-gradient(135deg, hsl(222 47% 6%) 0%, hsl(260 50% 12%) 30%, hsl(280 40% 8%) 60%, hsl(222 47% 8%) 100%)",
    },
    WallpaperPreset {
        id: "ocean",
        display_name: "Ocean",
        background: "linear-gradient(135deg, hsl(200 80% 15%) 0%, hsl(210 70% 20%) 50%, hsl(220 60% 10%) 100%)",
    },
    WallpaperPreset {
        id: "sunset",
        display_name: "Sunset",
        background: "linear-gradient(135deg, hsl(20 80% 20%) 0%, hsl(340 60% 15%) 50%, hsl(280 50% 10%) 100%)",
    },
    WallpaperPreset {
        id: "forest",
        display_name: "Forest",
        background: "linear-gradient(135deg, hsl(120 40% 10%) 0%, hsl(140 50% 15%) 50%, hsl(160 40% 8%) 100%)",
    },
    WallpaperPreset {
        id: "aurora",
        display_name: "Aurora",
        background: "linear-gradient(135deg, hsl(180 60% 10%) 0%, hsl(280 50% 15%) 50%, hsl(320 40% 12%) 100%)",
    },
];

/// Accent swatches offered by the settings app as `(hex, name)`.
pub const ACCENT_PRESETS: [(&str, &str); 7] = [
    ("#3b82f6", "Blue"),
    ("#8b5cf6", "Purple"),
    ("#ec4899", "Pink"),
    ("#10b981", "Green"),
    ("#f59e0b", "Amber"),
    ("#ef4444", "Red"),
    ("#06b6d4", "Cyan"),
];

/// Resolves a wallpaper id, falling back to the first preset for unknown ids.
pub fn wallpaper_preset(id: &str) -> WallpaperPreset {
    WALLPAPER_PRESETS
        .iter()
        .copied()
        .find(|preset| preset.id == id)
        .unwrap_or(WALLPAPER_PRESETS[0])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn presets_cover_every_accepted_wallpaper_id() {
        let ids: Vec<&str> = WALLPAPER_PRESETS.iter().map(|preset| preset.id).collect();
        assert_eq!(ids, WALLPAPER_IDS.to_vec());
    }

    #[test]
    fn unknown_ids_fall_back_to_cosmic() {
        assert_eq!(wallpaper_preset("forest").display_name, "Forest");
        assert_eq!(wallpaper_preset("plaid").id, "cosmic");
    }
}
