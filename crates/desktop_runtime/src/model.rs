use std::collections::BTreeSet;

use desktop_app_contract::{ApplicationId, NotificationKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DESKTOP_SNAPSHOT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_WINDOW_WIDTH: i32 = 900;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 600;
pub const MIN_WINDOW_WIDTH: i32 = 300;
pub const MIN_WINDOW_HEIGHT: i32 = 200;
pub const TASKBAR_HEIGHT_PX: i32 = 48;
/// Part of a dragged window that must stay on screen, in both axes.
pub const DRAG_VISIBLE_MARGIN: i32 = 100;
pub const OPEN_STAGGER_PX: i32 = 30;
pub const OPEN_MIN_OFFSET: i32 = 50;
/// Space kept free to the right of and below a newly opened window's top-left corner.
pub const OPEN_EDGE_RESERVE: i32 = 200;
pub const CLOSE_DELAY_MS: u32 = 200;
pub const ICON_GRID_PX: i32 = 100;
pub const ICON_FALLBACK_POSITION: i32 = 20;
pub const ICON_DRAG_RIGHT_RESERVE: i32 = 80;
pub const ICON_DRAG_BOTTOM_RESERVE: i32 = 130;
pub const MAX_NOTIFICATIONS: usize = 50;
pub const NOTIFICATION_DISMISS_MS: u32 = 5000;
pub const BOOT_STEP_MS: u32 = 400;
pub const BOOT_FINISH_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: OPEN_MIN_OFFSET,
            y: OPEN_MIN_OFFSET,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Browser viewport in CSS pixels, including the taskbar strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

impl Viewport {
    /// Area a maximized window occupies.
    pub fn work_area(self) -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            w: self.width,
            h: (self.height - TASKBAR_HEIGHT_PX).max(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub icon_id: String,
    /// Stored geometry. Kept untouched while maximized so restore can return to it.
    pub rect: WindowRect,
    pub z_index: u64,
    pub minimized: bool,
    pub maximized: bool,
    /// Set between the close request and the delayed removal.
    pub closing: bool,
    pub launch_params: Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl IconSize {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

pub const WALLPAPER_IDS: [&str; 5] = ["cosmic", "ocean", "sunset", "forest", "aurora"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub wallpaper: String,
    pub theme: ThemeMode,
    pub accent_color: String,
    pub username: String,
    pub icon_size: IconSize,
    pub animations_enabled: bool,
    pub transparency: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            wallpaper: "cosmic".to_string(),
            theme: ThemeMode::Dark,
            accent_color: "#3b82f6".to_string(),
            username: "User".to_string(),
            icon_size: IconSize::Medium,
            animations_enabled: true,
            transparency: true,
        }
    }
}

/// Partial settings update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub wallpaper: Option<String>,
    pub theme: Option<ThemeMode>,
    pub accent_color: Option<String>,
    pub username: Option<String>,
    pub icon_size: Option<IconSize>,
    pub animations_enabled: Option<bool>,
    pub transparency: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopIcon {
    pub id: String,
    pub app_id: ApplicationId,
    pub label: String,
    pub icon_id: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub app_id: Option<ApplicationId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootState {
    pub booting: bool,
    /// Index of the next boot step to apply.
    pub step: usize,
    pub progress: u8,
    pub status: String,
}

impl Default for BootState {
    fn default() -> Self {
        Self {
            booting: true,
            step: 0,
            progress: 0,
            status: "Initializing...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub windows: Vec<WindowRecord>,
    pub focused: Option<WindowId>,
    pub next_window_id: u64,
    pub next_z_index: u64,
    pub start_menu_open: bool,
    pub viewport: Viewport,
    pub icons: Vec<DesktopIcon>,
    pub selected_icons: BTreeSet<String>,
    pub settings: UserSettings,
    pub notifications: Vec<Notification>,
    pub next_notification_id: u64,
    pub boot: BootState,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            focused: None,
            next_window_id: 1,
            next_z_index: 1,
            start_menu_open: false,
            viewport: Viewport::default(),
            icons: Vec::new(),
            selected_icons: BTreeSet::new(),
            settings: UserSettings::default(),
            notifications: Vec::new(),
            next_notification_id: 1,
            boot: BootState::default(),
        }
    }
}

impl DesktopState {
    /// Fresh state with the catalog's default desktop icons.
    pub fn with_default_icons() -> Self {
        Self {
            icons: crate::icons::default_icons(),
            ..Self::default()
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            schema_version: DESKTOP_SNAPSHOT_SCHEMA_VERSION,
            desktop_icons: self.icons.clone(),
            settings: self.settings.clone(),
        }
    }
}

/// Persisted slice of the desktop. Open windows are intentionally absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopSnapshot {
    pub schema_version: u32,
    pub desktop_icons: Vec<DesktopIcon>,
    pub settings: UserSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub app_id: ApplicationId,
    pub title: Option<String>,
    pub icon_id: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub launch_params: Value,
}

impl OpenWindowRequest {
    pub fn new(app_id: ApplicationId) -> Self {
        Self {
            app_id,
            title: None,
            icon_id: None,
            width: None,
            height: None,
            launch_params: Value::Null,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_launch_params(mut self, launch_params: Value) -> Self {
        self.launch_params = launch_params;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Parses a handle token such as `"n"` or `"se"`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "n" => Some(Self::North),
            "s" => Some(Self::South),
            "e" => Some(Self::East),
            "w" => Some(Self::West),
            "ne" => Some(Self::NorthEast),
            "nw" => Some(Self::NorthWest),
            "se" => Some(Self::SouthEast),
            "sw" => Some(Self::SouthWest),
            _ => None,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    pub const fn north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub const fn south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub const fn east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub const fn west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer position relative to the window's top-left corner at drag start.
    pub grab_offset: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDragSession {
    pub icon_id: String,
    pub grab_offset: PointerPosition,
    pub moved: bool,
}

/// Pointer interaction in progress. At most one session exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
    DraggingIcon(IconDragSession),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
