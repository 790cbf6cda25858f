//! Running-task list shown by the task manager, persisted under a prefs key.

use serde::{Deserialize, Serialize};

use crate::{
    storage::prefs::{load_pref_with, save_pref_with, PrefsStore},
    time::{unique_token, unix_time_ms_now},
};

/// Prefs key holding the task list.
pub const TASKS_KEY: &str = "webos.tasks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One running app instance.
pub struct TaskRecord {
    /// Generated task id.
    pub id: String,
    /// Display name, usually the app title.
    pub name: String,
    /// Registration time (unix ms).
    pub started_at_ms: u64,
}

/// Lists registered tasks in registration order.
///
/// # Errors
///
/// Returns store or decode errors.
pub async fn list_tasks(store: &dyn PrefsStore) -> Result<Vec<TaskRecord>, String> {
    Ok(load_pref_with(store, TASKS_KEY).await?.unwrap_or_default())
}

/// Appends a task named `name`.
///
/// # Errors
///
/// Returns store or decode errors.
pub async fn register_task(store: &dyn PrefsStore, name: &str) -> Result<TaskRecord, String> {
    let mut tasks = list_tasks(store).await?;
    let task = TaskRecord {
        id: unique_token("task"),
        name: name.to_string(),
        started_at_ms: unix_time_ms_now(),
    };
    tasks.push(task.clone());
    save_pref_with(store, TASKS_KEY, &tasks).await?;
    Ok(task)
}

/// Removes the task `id`; unknown ids are ignored.
///
/// # Errors
///
/// Returns store or decode errors.
pub async fn kill_task(store: &dyn PrefsStore, id: &str) -> Result<(), String> {
    let tasks: Vec<TaskRecord> = list_tasks(store)
        .await?
        .into_iter()
        .filter(|t| t.id != id)
        .collect();
    save_pref_with(store, TASKS_KEY, &tasks).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::prefs::MemoryPrefsStore;

    #[test]
    fn register_then_kill() {
        let store = MemoryPrefsStore::default();
        let notes = block_on(register_task(&store, "Notes")).expect("register");
        let term = block_on(register_task(&store, "Terminal")).expect("register");

        let names: Vec<_> = block_on(list_tasks(&store))
            .expect("list")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Notes".to_string(), "Terminal".to_string()]);

        block_on(kill_task(&store, &notes.id)).expect("kill");
        block_on(kill_task(&store, "task-unknown")).expect("kill unknown");
        assert_eq!(block_on(list_tasks(&store)).expect("list"), vec![term]);
    }
}
