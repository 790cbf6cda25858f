//! File explorer over the document-backed virtual file system.

use desktop_app_contract::{AppMountContext, AppServices, NotificationKind};
use leptos::*;
use platform_host::{DocumentId, FileRecord, FileRecords, HostServices};
use serde_json::json;

use super::text_editor_id;

pub(super) fn mount_file_explorer(context: AppMountContext) -> View {
    view! { <FileExplorerApp host=context.host services=context.services /> }.into_view()
}

#[derive(Debug, Clone, PartialEq)]
struct Location {
    folder: Option<DocumentId>,
    path: Vec<FileRecord>,
}

fn location_label(location: &Location) -> String {
    let mut label = String::from("/");
    label.push_str(
        &location
            .path
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>()
            .join("/"),
    );
    label
}

fn format_size(bytes: u64) -> String {
    match bytes {
        0..=1023 => format!("{bytes} B"),
        1024..=1_048_575 => format!("{:.1} KB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MB", bytes as f64 / 1_048_576.0),
    }
}

#[component]
fn FileExplorerApp(host: HostServices, services: AppServices) -> impl IntoView {
    let location = create_rw_signal(Location {
        folder: None,
        path: Vec::new(),
    });
    let entries = create_rw_signal(Vec::<FileRecord>::new());
    let selected = create_rw_signal::<Option<DocumentId>>(None);
    let status = create_rw_signal(String::new());
    let host = store_value(host);

    let refresh = move || {
        let documents = host.with_value(|host| host.documents.clone());
        let folder = location.get_untracked().folder;
        spawn_local(async move {
            let records = FileRecords::new(documents.as_ref());
            match records.children(folder, false).await {
                Ok(children) => {
                    status.set(format!("{} items", children.len()));
                    entries.set(children);
                }
                Err(err) => {
                    logging::warn!("file listing failed: {err}");
                    status.set(format!("Error: {err}"));
                }
            }
        });
    };

    let navigate = move |folder: Option<DocumentId>| {
        let documents = host.with_value(|host| host.documents.clone());
        spawn_local(async move {
            let records = FileRecords::new(documents.as_ref());
            let path = match folder {
                Some(id) => match records.path(id).await {
                    Ok(path) => path,
                    Err(err) => {
                        logging::warn!("file path lookup failed: {err}");
                        return;
                    }
                },
                None => Vec::new(),
            };
            let next = Location { folder, path };
            services
                .window
                .set_title(format!("File Explorer - {}", location_label(&next)));
            location.set(next);
            selected.set(None);
            refresh();
        });
    };

    {
        let documents = host.with_value(|host| host.documents.clone());
        spawn_local(async move {
            if let Err(err) = FileRecords::new(documents.as_ref()).seed_defaults().await {
                logging::warn!("file system seed failed: {err}");
            }
            navigate(None);
        });
    }

    let go_up = move |_| {
        let parent = location.with_untracked(|location| {
            location
                .path
                .len()
                .checked_sub(2)
                .map(|index| location.path[index].id)
        });
        navigate(parent);
    };

    let new_folder = move |_| {
        let documents = host.with_value(|host| host.documents.clone());
        let parent = location.get_untracked().folder;
        spawn_local(async move {
            match FileRecords::new(documents.as_ref())
                .create_folder("New Folder", parent)
                .await
            {
                Ok(_) => refresh(),
                Err(err) => logging::warn!("create folder failed: {err}"),
            }
        });
    };

    let delete_selected = move |_| {
        let Some(id) = selected.get_untracked() else {
            return;
        };
        let documents = host.with_value(|host| host.documents.clone());
        spawn_local(async move {
            match FileRecords::new(documents.as_ref()).soft_delete(id).await {
                Ok(()) => {
                    selected.set(None);
                    services
                        .notifications
                        .notify("Moved to Trash", "Item moved to trash", NotificationKind::Info);
                    refresh();
                }
                Err(err) => logging::warn!("delete failed: {err}"),
            }
        });
    };

    let open_entry = move |entry: FileRecord| {
        if entry.is_folder() {
            navigate(Some(entry.id));
        } else {
            services.window.open_app(
                text_editor_id(),
                Some(entry.name.clone()),
                json!({ "file_id": entry.id }),
            );
        }
    };

    view! {
        <div class="app-shell app-explorer-shell">
            <div class="app-toolbar" role="toolbar" aria-label="File actions">
                <button
                    type="button"
                    class="app-action"
                    disabled=move || location.with(|location| location.folder.is_none())
                    on:click=go_up
                >
                    "Up"
                </button>
                <button type="button" class="app-action" on:click=new_folder>
                    "New Folder"
                </button>
                <button
                    type="button"
                    class="app-action"
                    disabled=move || selected.get().is_none()
                    on:click=delete_selected
                >
                    "Delete"
                </button>
                <span class="app-location">{move || location.with(location_label)}</span>
            </div>
            <ul class="app-file-list" role="listbox" aria-label="Files">
                <For each=move || entries.get() key=|entry| (entry.id, entry.modified_at_ms) let:entry>
                    {
                        let id = entry.id;
                        let glyph = if entry.is_folder() { "[dir]" } else { "[file]" };
                        let size = if entry.is_folder() {
                            String::new()
                        } else {
                            format_size(entry.size)
                        };
                        let name = entry.name.clone();
                        view! {
                            <li
                                class="app-file-row"
                                role="option"
                                aria-selected=move || (selected.get() == Some(id)).to_string()
                                on:click=move |_| selected.set(Some(id))
                                on:dblclick=move |_| open_entry(entry.clone())
                            >
                                <span class="app-file-glyph">{glyph}</span>
                                <span class="app-file-name">{name}</span>
                                <span class="app-file-size">{size}</span>
                            </li>
                        }
                    }
                </For>
            </ul>
            <div class="app-statusbar">
                <span>{move || status.get()}</span>
            </div>
        </div>
    }
}
