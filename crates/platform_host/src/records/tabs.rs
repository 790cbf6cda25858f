//! Browser tab strip persisted under a single prefs key.

use serde::{Deserialize, Serialize};

use crate::{
    storage::prefs::{load_pref_with, save_pref_with, PrefsStore},
    time::unique_token,
};

/// Prefs key holding the tab list.
pub const BROWSER_TABS_KEY: &str = "webos.browser.tabs";

const HOME_URL: &str = "https://example.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One simulated browser tab.
pub struct BrowserTab {
    /// Generated tab id.
    pub id: String,
    /// Address shown in the tab.
    pub url: String,
}

/// Creates a tab pointing at the home page.
pub fn new_tab() -> BrowserTab {
    BrowserTab {
        id: unique_token("tab"),
        url: HOME_URL.to_string(),
    }
}

/// Loads the tab list, seeding and saving a single home tab when nothing is stored.
///
/// # Errors
///
/// Returns store or decode errors.
pub async fn load_tabs(store: &dyn PrefsStore) -> Result<Vec<BrowserTab>, String> {
    if let Some(tabs) = load_pref_with::<_, Vec<BrowserTab>>(store, BROWSER_TABS_KEY).await? {
        return Ok(tabs);
    }
    let initial = vec![new_tab()];
    save_tabs(store, &initial).await?;
    Ok(initial)
}

/// Replaces the stored tab list.
///
/// # Errors
///
/// Returns store errors.
pub async fn save_tabs(store: &dyn PrefsStore, tabs: &[BrowserTab]) -> Result<(), String> {
    save_pref_with(store, BROWSER_TABS_KEY, &tabs).await
}

/// Removes `id` from `tabs`; closing the last tab leaves a fresh home tab behind.
pub fn close_tab(tabs: &[BrowserTab], id: &str) -> Vec<BrowserTab> {
    let remaining: Vec<BrowserTab> = tabs.iter().filter(|t| t.id != id).cloned().collect();
    if remaining.is_empty() {
        vec![new_tab()]
    } else {
        remaining
    }
}
