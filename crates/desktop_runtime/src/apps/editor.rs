//! Plain text editor bound to one file record.

use desktop_app_contract::{AppMountContext, AppServices, NotificationKind};
use leptos::*;
use platform_host::{DocumentId, FilePatch, FileRecords, HostServices};
use serde_json::Value;

const UNTITLED_NAME: &str = "Untitled.txt";

pub(super) fn mount_text_editor(context: AppMountContext) -> View {
    let file_id = launch_file_id(&context.launch_params);
    view! { <TextEditorApp host=context.host services=context.services file_id=file_id /> }
        .into_view()
}

/// Reads `{"file_id": <id>}` from the window's launch params.
fn launch_file_id(params: &Value) -> Option<DocumentId> {
    params.get("file_id").and_then(Value::as_u64)
}

fn title_for(name: &str, dirty: bool) -> String {
    if dirty {
        format!("{name} * - Text Editor")
    } else {
        format!("{name} - Text Editor")
    }
}

#[component]
fn TextEditorApp(
    host: HostServices,
    services: AppServices,
    file_id: Option<DocumentId>,
) -> impl IntoView {
    let current_id = create_rw_signal(file_id);
    let name = create_rw_signal(UNTITLED_NAME.to_string());
    let text = create_rw_signal(String::new());
    let dirty = create_rw_signal(false);
    let host = store_value(host);

    create_effect(move |_| {
        let title = title_for(&name.get(), dirty.get());
        services.window.set_title(title);
    });

    if let Some(id) = file_id {
        let documents = host.with_value(|host| host.documents.clone());
        spawn_local(async move {
            match FileRecords::new(documents.as_ref()).get(id).await {
                Ok(Some(record)) => {
                    name.set(record.name);
                    text.set(record.content);
                    dirty.set(false);
                }
                Ok(None) => {
                    logging::warn!("text editor: file {id} not found");
                    current_id.set(None);
                }
                Err(err) => logging::warn!("text editor load failed: {err}"),
            }
        });
    }

    let save = move |_| {
        let documents = host.with_value(|host| host.documents.clone());
        let content = text.get_untracked();
        let target = current_id.get_untracked();
        spawn_local(async move {
            let records = FileRecords::new(documents.as_ref());
            let result = match target {
                Some(id) => {
                    records
                        .update(
                            id,
                            FilePatch {
                                content: Some(content),
                                ..FilePatch::default()
                            },
                        )
                        .await
                }
                None => records.create_file(UNTITLED_NAME, None, &content, None).await,
            };
            match result {
                Ok(record) => {
                    current_id.set(Some(record.id));
                    name.set(record.name.clone());
                    dirty.set(false);
                    services.notifications.notify(
                        "Saved",
                        format!("{} saved", record.name),
                        NotificationKind::Success,
                    );
                }
                Err(err) => {
                    logging::warn!("text editor save failed: {err}");
                    services
                        .notifications
                        .notify("Save failed", err, NotificationKind::Error);
                }
            }
        });
    };

    view! {
        <div class="app-shell app-editor-shell">
            <div class="app-toolbar" role="toolbar" aria-label="Editor actions">
                <button type="button" class="app-action" on:click=save>
                    "Save"
                </button>
                <span class="app-location">{move || name.get()}</span>
            </div>
            <textarea
                class="app-editor-text"
                spellcheck="false"
                aria-label="File contents"
                prop:value=move || text.get()
                on:input=move |ev| {
                    text.set(event_target_value(&ev));
                    dirty.set(true);
                }
            ></textarea>
            <div class="app-statusbar">
                <span>{move || format!("{} characters", text.with(|text| text.chars().count()))}</span>
                <span>{move || if dirty.get() { "Modified" } else { "Saved" }}</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn file_id_comes_from_launch_params() {
        assert_eq!(launch_file_id(&json!({ "file_id": 7 })), Some(7));
        assert_eq!(launch_file_id(&json!({ "file_id": "7" })), None);
        assert_eq!(launch_file_id(&Value::Null), None);
    }

    #[test]
    fn dirty_marker_in_title() {
        assert_eq!(title_for("a.txt", false), "a.txt - Text Editor");
        assert_eq!(title_for("a.txt", true), "a.txt * - Text Editor");
    }
}
