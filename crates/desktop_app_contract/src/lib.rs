//! Shared contract types between the desktop window manager runtime and hosted apps.
//!
//! An app never touches window-manager state. It receives an [`AppMountContext`] holding its
//! own window id and service handles, and every request it makes travels back to the runtime
//! as an [`AppCommand`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::{Callable, Callback, ReadSignal, View};
use platform_host::HostServices;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Stable identifier for an application, such as `file-explorer`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` is lowercase kebab-case.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected lowercase kebab-case"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for trusted built-in constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ApplicationId {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ApplicationId> for String {
    fn from(id: ApplicationId) -> Self {
        id.0
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') || raw.contains("--") {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Window lifecycle events observed by a mounted app.
pub enum AppLifecycleEvent {
    /// App view has been mounted into a managed window.
    Mounted,
    /// Window became focused.
    Focused,
    /// Window lost focus.
    Blurred,
    /// Window was minimized.
    Minimized,
    /// Window close sequence started.
    Closing,
}

impl AppLifecycleEvent {
    /// Returns a stable string token for debugging hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Mounted => "mounted",
            Self::Focused => "focused",
            Self::Blurred => "blurred",
            Self::Minimized => "minimized",
            Self::Closing => "closing",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a desktop notification.
pub enum NotificationKind {
    /// Neutral information.
    #[default]
    Info,
    /// Completed action.
    Success,
    /// Recoverable problem.
    Warning,
    /// Failed action.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Commands an app sends to the desktop runtime about its own window.
pub enum AppCommand {
    /// Bring the current window to the front.
    FocusWindow,
    /// Begin closing the current window.
    CloseWindow,
    /// Replace the current window title.
    SetWindowTitle {
        /// New title text.
        title: String,
    },
    /// Open a new window for another (or the same) application.
    OpenWindow {
        /// Target app.
        app_id: ApplicationId,
        /// Title override; the catalog display name is used when absent.
        title: Option<String>,
        /// Per-instance launch parameters, such as a file id.
        launch_params: Value,
    },
    /// Post a desktop notification.
    Notify {
        /// Headline.
        title: String,
        /// Body text.
        message: String,
        /// Severity.
        kind: NotificationKind,
    },
}

#[derive(Clone, Copy)]
/// Window-scoped service; every call targets the app's own window.
pub struct WindowService {
    sender: Callback<AppCommand>,
}

impl WindowService {
    /// Requests a title change for the current window.
    pub fn set_title(&self, title: impl Into<String>) {
        self.sender.call(AppCommand::SetWindowTitle {
            title: title.into(),
        });
    }

    /// Requests focus for the current window.
    pub fn focus(&self) {
        self.sender.call(AppCommand::FocusWindow);
    }

    /// Requests that the current window close.
    pub fn close(&self) {
        self.sender.call(AppCommand::CloseWindow);
    }

    /// Requests a new window, for example "open this file in the editor".
    pub fn open_app(&self, app_id: ApplicationId, title: Option<String>, launch_params: Value) {
        self.sender.call(AppCommand::OpenWindow {
            app_id,
            title,
            launch_params,
        });
    }
}

#[derive(Clone, Copy)]
/// Desktop notification service.
pub struct NotificationService {
    sender: Callback<AppCommand>,
}

impl NotificationService {
    /// Posts a notification toast.
    pub fn notify(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) {
        self.sender.call(AppCommand::Notify {
            title: title.into(),
            message: message.into(),
            kind,
        });
    }
}

#[derive(Clone, Copy)]
/// Injected app services bundle.
pub struct AppServices {
    /// Window integration service.
    pub window: WindowService,
    /// Notification service.
    pub notifications: NotificationService,
}

impl AppServices {
    /// Creates service handles from the runtime command callback.
    pub fn new(sender: Callback<AppCommand>) -> Self {
        Self {
            window: WindowService { sender },
            notifications: NotificationService { sender },
        }
    }
}

#[derive(Clone)]
/// App mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// App id from the runtime catalog.
    pub app_id: ApplicationId,
    /// Runtime window id.
    pub window_id: WindowRuntimeId,
    /// Launch params supplied at window-open time.
    pub launch_params: Value,
    /// Reactive lifecycle signal for this window.
    pub lifecycle: ReadSignal<AppLifecycleEvent>,
    /// Runtime service bundle.
    pub services: AppServices,
    /// Persistence services for the app's own records.
    pub host: HostServices,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mounted app module descriptor used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Default desktop shortcut placement for an app.
pub struct DesktopIconSlot {
    /// Label under the icon.
    pub label: String,
    /// Left offset in pixels.
    pub x: i32,
    /// Top offset in pixels.
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Manifest-backed registration metadata for a catalog app entry.
pub struct AppRegistration {
    /// Canonical app id.
    pub app_id: ApplicationId,
    /// Human-readable display name, also the default window title.
    pub display_name: String,
    /// Icon reference rendered by the shell.
    pub icon_id: String,
    /// Default window width.
    pub default_width: i32,
    /// Default window height.
    pub default_height: i32,
    /// Start menu visibility flag.
    pub show_in_start_menu: bool,
    /// Desktop shortcut placement; `None` keeps the app off the desktop.
    #[serde(default)]
    pub desktop_icon: Option<DesktopIconSlot>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn application_id_requires_kebab_case() {
        assert!(ApplicationId::new("file-explorer").is_ok());
        assert!(ApplicationId::new("notes").is_ok());
        assert!(ApplicationId::new("image-viewer2").is_ok());
        assert!(ApplicationId::new("").is_err());
        assert!(ApplicationId::new("File-Explorer").is_err());
        assert!(ApplicationId::new("file--explorer").is_err());
        assert!(ApplicationId::new("-notes").is_err());
        assert!(ApplicationId::new("notes-").is_err());
        assert!(ApplicationId::new("system.notes").is_err());
    }

    #[test]
    fn application_id_deserialization_validates() {
        let ok: ApplicationId = serde_json::from_value(json!("terminal")).expect("valid");
        assert_eq!(ok.as_str(), "terminal");
        assert!(serde_json::from_value::<ApplicationId>(json!("Terminal")).is_err());
    }

    #[test]
    fn registration_parses_catalog_json() {
        let registration: AppRegistration = serde_json::from_value(json!({
            "app_id": "notes",
            "display_name": "Notes",
            "icon_id": "notes",
            "default_width": 900,
            "default_height": 600,
            "show_in_start_menu": true,
            "desktop_icon": { "label": "Notes", "x": 20, "y": 420 }
        }))
        .expect("registration");
        assert_eq!(
            registration.desktop_icon,
            Some(DesktopIconSlot {
                label: "Notes".to_string(),
                x: 20,
                y: 420
            })
        );

        let hidden: AppRegistration = serde_json::from_value(json!({
            "app_id": "image-viewer",
            "display_name": "Image Viewer",
            "icon_id": "image",
            "default_width": 800,
            "default_height": 600,
            "show_in_start_menu": true
        }))
        .expect("registration without icon");
        assert_eq!(hidden.desktop_icon, None);
    }

    #[test]
    fn notification_kind_uses_lowercase_tokens() {
        assert_eq!(
            serde_json::to_value(NotificationKind::Warning).expect("ser"),
            json!("warning")
        );
        assert_eq!(AppLifecycleEvent::Closing.token(), "closing");
    }
}
