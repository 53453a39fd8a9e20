//! Task table: schema, CRUD and filter query composition.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row, ToSql};

use super::Store;
use crate::error::{Result, TaskdeckError};
use crate::model::{Task, TaskStatus};

pub(super) const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    due_date TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);";

const SELECT_TASKS: &str =
    "SELECT id, title, description, due_date, status, created_at, updated_at FROM tasks";
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, due_date, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?1, description = ?2, due_date = ?3, status = ?4, updated_at = ?5 WHERE id = ?6";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const WHERE_ID: &str = "id = ?";
const WHERE_STATUS: &str = "status = ?";
const WHERE_TITLE_LIKE: &str = r"LOWER(title) LIKE '%' || ? || '%' ESCAPE '\'";

/// Fields accepted when creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
}

/// Partial update. `None` fields leave the stored value unchanged.
///
/// An empty `title` is also ignored (the stored title stays as is): the
/// browser client resubmits the whole form on edit, so an empty title means
/// "not edited", never "clear". An empty `description` does clear the field.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
}

/// List predicates. Both optional, AND-combined when both present.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Exact status match
    pub status: Option<TaskStatus>,
    /// Case-insensitive substring match against the title only
    pub search: Option<String>,
}

/// Escape LIKE metacharacters so user input matches literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', r"\\").replace('%', r"\%").replace('_', r"\_")
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let status: String = row.get(4)?;
    let status = status.parse::<TaskStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
    })?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        status,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl Store {
    /// Insert a new task and return the stored record.
    ///
    /// Fails with a validation error when the title is empty or whitespace.
    pub fn create_task(&self, new: NewTask) -> Result<Task> {
        if new.title.trim().is_empty() {
            return Err(TaskdeckError::validation("title is required"));
        }

        let now = Utc::now();
        let conn = self.lock();
        conn.execute(
            INSERT_TASK,
            params![
                new.title,
                new.description,
                new.due_date,
                new.status.as_str(),
                now,
                now
            ],
        )?;
        let id = conn.last_insert_rowid();

        let task = conn
            .query_row(&format!("{} WHERE {}", SELECT_TASKS, WHERE_ID), [id], row_to_task)?;
        Ok(task)
    }

    /// Return all tasks matching `filter`. No match is an empty vec.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(status) = filter.status {
            clauses.push(WHERE_STATUS);
            values.push(Box::new(status.as_str().to_string()));
        }
        if let Some(search) = &filter.search {
            clauses.push(WHERE_TITLE_LIKE);
            values.push(Box::new(escape_like(&search.to_lowercase())));
        }

        let query = if clauses.is_empty() {
            SELECT_TASKS.to_string()
        } else {
            format!("{} WHERE {}", SELECT_TASKS, clauses.join(" AND "))
        };

        let conn = self.lock();
        let mut stmt = conn.prepare(&query)?;
        let param_refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
        let rows = stmt.query_map(&param_refs[..], row_to_task)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    /// Fetch a single task by id.
    pub fn get_task(&self, id: i64) -> Result<Task> {
        let conn = self.lock();
        conn.query_row(&format!("{} WHERE {}", SELECT_TASKS, WHERE_ID), [id], row_to_task)
            .optional()?
            .ok_or_else(|| TaskdeckError::not_found(format!("task {}", id)))
    }

    /// Apply a partial update and return the full updated record.
    pub fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task> {
        let mut task = self.get_task(id)?;

        if let Some(title) = &patch.title {
            if !title.trim().is_empty() {
                task.title = title.clone();
            }
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = Utc::now();

        let conn = self.lock();
        conn.execute(
            UPDATE_TASK,
            params![
                task.title,
                task.description,
                task.due_date,
                task.status.as_str(),
                task.updated_at,
                id
            ],
        )?;
        Ok(task)
    }

    /// Permanently delete a task.
    pub fn delete_task(&self, id: i64) -> Result<()> {
        let conn = self.lock();
        let affected = conn.execute(DELETE_TASK, [id])?;
        if affected == 0 {
            return Err(TaskdeckError::not_found(format!("task {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::open_in_memory().unwrap()
    }

    fn new_task(title: &str, status: TaskStatus) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            due_date: None,
            status,
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = store();
        let created = store
            .create_task(NewTask {
                title: "Buy milk".to_string(),
                description: "2 liters".to_string(),
                due_date: None,
                status: TaskStatus::Pending,
            })
            .unwrap();

        let fetched = store.get_task(created.id).unwrap();
        assert_eq!(fetched.title, "Buy milk");
        assert_eq!(fetched.description, "2 liters");
        assert_eq!(fetched.status, TaskStatus::Pending);
        assert!(fetched.due_date.is_none());
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let store = store();
        assert!(matches!(
            store.create_task(new_task("", TaskStatus::Pending)),
            Err(TaskdeckError::Validation(_))
        ));
        assert!(matches!(
            store.create_task(new_task("   ", TaskStatus::Pending)),
            Err(TaskdeckError::Validation(_))
        ));
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let store = store();
        let a = store.create_task(new_task("a", TaskStatus::Pending)).unwrap();
        let b = store.create_task(new_task("b", TaskStatus::Pending)).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_list_filters_by_status() {
        let store = store();
        store.create_task(new_task("one", TaskStatus::Pending)).unwrap();
        store.create_task(new_task("two", TaskStatus::Completed)).unwrap();
        store.create_task(new_task("three", TaskStatus::Completed)).unwrap();

        let completed = store
            .list_tasks(&TaskFilter {
                status: Some(TaskStatus::Completed),
                search: None,
            })
            .unwrap();
        assert_eq!(completed.len(), 2);
        assert!(completed.iter().all(|t| t.status == TaskStatus::Completed));

        let all = store.list_tasks(&TaskFilter::default()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let store = store();
        store.create_task(new_task("Buy Milk", TaskStatus::Pending)).unwrap();
        store
            .create_task(NewTask {
                title: "Call plumber".to_string(),
                description: "about the milk frother".to_string(),
                due_date: None,
                status: TaskStatus::Pending,
            })
            .unwrap();

        let hits = store
            .list_tasks(&TaskFilter {
                status: None,
                search: Some("MILK".to_string()),
            })
            .unwrap();
        // Matches title only, never description
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Buy Milk");
    }

    #[test]
    fn test_search_and_status_combine() {
        let store = store();
        store.create_task(new_task("milk run", TaskStatus::Pending)).unwrap();
        store.create_task(new_task("milk run done", TaskStatus::Completed)).unwrap();

        let hits = store
            .list_tasks(&TaskFilter {
                status: Some(TaskStatus::Completed),
                search: Some("milk".to_string()),
            })
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "milk run done");
    }

    #[test]
    fn test_search_escapes_like_metacharacters() {
        let store = store();
        store.create_task(new_task("100% done", TaskStatus::Pending)).unwrap();
        store.create_task(new_task("1000 done", TaskStatus::Pending)).unwrap();

        let hits = store
            .list_tasks(&TaskFilter {
                status: None,
                search: Some("100%".to_string()),
            })
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "100% done");
    }

    #[test]
    fn test_list_no_match_is_empty() {
        let store = store();
        store.create_task(new_task("something", TaskStatus::Pending)).unwrap();
        let hits = store
            .list_tasks(&TaskFilter {
                status: None,
                search: Some("nope".to_string()),
            })
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_update_partial_keeps_other_fields() {
        let store = store();
        let created = store
            .create_task(NewTask {
                title: "Buy milk".to_string(),
                description: "2 liters".to_string(),
                due_date: None,
                status: TaskStatus::Pending,
            })
            .unwrap();

        let updated = store
            .update_task(
                created.id,
                &TaskPatch {
                    status: Some(TaskStatus::Completed),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.title, "Buy milk");
        assert_eq!(updated.description, "2 liters");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn test_update_ignores_empty_title() {
        let store = store();
        let created = store.create_task(new_task("Buy milk", TaskStatus::Pending)).unwrap();

        let updated = store
            .update_task(
                created.id,
                &TaskPatch {
                    title: Some(String::new()),
                    status: Some(TaskStatus::InProgress),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Buy milk");
        assert_eq!(updated.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_update_clears_description() {
        let store = store();
        let created = store
            .create_task(NewTask {
                title: "t".to_string(),
                description: "old".to_string(),
                due_date: None,
                status: TaskStatus::Pending,
            })
            .unwrap();

        let updated = store
            .update_task(
                created.id,
                &TaskPatch {
                    description: Some(String::new()),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.description, "");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = store();
        assert!(matches!(
            store.update_task(999, &TaskPatch::default()),
            Err(TaskdeckError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let store = store();
        let created = store.create_task(new_task("gone soon", TaskStatus::Pending)).unwrap();

        store.delete_task(created.id).unwrap();
        assert!(matches!(
            store.get_task(created.id),
            Err(TaskdeckError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_task(created.id),
            Err(TaskdeckError::NotFound(_))
        ));
    }
}
