//! Notes app: note list with search beside a title/body editor.

use desktop_app_contract::{AppMountContext, AppServices, NotificationKind};
use leptos::*;
use platform_host::{DocumentId, HostServices, NotePatch, NoteRecord, NoteRecords};

pub(super) fn mount_notes(context: AppMountContext) -> View {
    view! { <NotesApp host=context.host services=context.services /> }.into_view()
}

/// First line of the body, shortened for the list.
fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default().trim();
    if line.chars().count() > 40 {
        let mut short: String = line.chars().take(40).collect();
        short.push_str("...");
        short
    } else {
        line.to_string()
    }
}

#[component]
fn NotesApp(host: HostServices, services: AppServices) -> impl IntoView {
    let notes = create_rw_signal(Vec::<NoteRecord>::new());
    let selected = create_rw_signal::<Option<DocumentId>>(None);
    let query = create_rw_signal(String::new());
    let title = create_rw_signal(String::new());
    let body = create_rw_signal(String::new());
    let host = store_value(host);

    let reload = move || {
        let documents = host.with_value(|host| host.documents.clone());
        let needle = query.get_untracked();
        spawn_local(async move {
            let records = NoteRecords::new(documents.as_ref());
            let result = if needle.trim().is_empty() {
                records.list().await
            } else {
                records.search(needle.trim()).await
            };
            match result {
                Ok(list) => notes.set(list),
                Err(err) => logging::warn!("notes listing failed: {err}"),
            }
        });
    };
    reload();

    let select = move |note: NoteRecord| {
        selected.set(Some(note.id));
        title.set(note.title);
        body.set(note.content);
    };

    let create = move |_| {
        let documents = host.with_value(|host| host.documents.clone());
        spawn_local(async move {
            match NoteRecords::new(documents.as_ref()).create().await {
                Ok(note) => {
                    select(note);
                    reload();
                }
                Err(err) => logging::warn!("note create failed: {err}"),
            }
        });
    };

    let save = move |_| {
        let Some(id) = selected.get_untracked() else {
            return;
        };
        let documents = host.with_value(|host| host.documents.clone());
        let patch = NotePatch {
            title: Some(title.get_untracked()),
            content: Some(body.get_untracked()),
            ..NotePatch::default()
        };
        spawn_local(async move {
            match NoteRecords::new(documents.as_ref()).update(id, patch).await {
                Ok(_) => reload(),
                Err(err) => {
                    logging::warn!("note save failed: {err}");
                    services
                        .notifications
                        .notify("Save failed", err, NotificationKind::Error);
                }
            }
        });
    };

    let delete = move |_| {
        let Some(id) = selected.get_untracked() else {
            return;
        };
        let documents = host.with_value(|host| host.documents.clone());
        spawn_local(async move {
            match NoteRecords::new(documents.as_ref()).delete(id).await {
                Ok(()) => {
                    selected.set(None);
                    title.set(String::new());
                    body.set(String::new());
                    reload();
                }
                Err(err) => logging::warn!("note delete failed: {err}"),
            }
        });
    };

    view! {
        <div class="app-shell app-notes-shell">
            <aside class="app-notes-sidebar">
                <div class="app-toolbar">
                    <input
                        class="app-search"
                        type="search"
                        placeholder="Search notes"
                        aria-label="Search notes"
                        prop:value=move || query.get()
                        on:input=move |ev| {
                            query.set(event_target_value(&ev));
                            reload();
                        }
                    />
                    <button type="button" class="app-action" on:click=create>
                        "New"
                    </button>
                </div>
                <ul class="app-notes-list" role="listbox" aria-label="Notes">
                    <For
                        each=move || notes.get()
                        key=|note| (note.id, note.modified_at_ms)
                        let:note
                    >
                        {
                            let id = note.id;
                            let heading = note.title.clone();
                            let summary = preview(&note.content);
                            view! {
                                <li
                                    class="app-note-row"
                                    role="option"
                                    aria-selected=move || (selected.get() == Some(id)).to_string()
                                    on:click=move |_| select(note.clone())
                                >
                                    <strong>{heading}</strong>
                                    <span>{summary}</span>
                                </li>
                            }
                        }
                    </For>
                </ul>
            </aside>
            <Show
                when=move || selected.get().is_some()
                fallback=|| view! { <p class="app-empty">"Select or create a note"</p> }
            >
                <section class="app-note-editor">
                    <input
                        class="app-note-title"
                        type="text"
                        aria-label="Note title"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <textarea
                        class="app-note-body"
                        aria-label="Note body"
                        prop:value=move || body.get()
                        on:input=move |ev| body.set(event_target_value(&ev))
                    ></textarea>
                    <div class="app-toolbar">
                        <button type="button" class="app-action" on:click=save>
                            "Save"
                        </button>
                        <button type="button" class="app-action" on:click=delete>
                            "Delete"
                        </button>
                    </div>
                </section>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn preview_uses_first_line_and_truncates() {
        assert_eq!(preview("hello\nworld"), "hello");
        assert_eq!(preview(""), "");
        let long = "x".repeat(50);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(40)));
    }
}
