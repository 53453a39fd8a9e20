//! SQLite-backed persistence.
//!
//! The `Store` owns the only connection to the database. It is constructed
//! once at startup and handed to the API layer behind an `Arc`; there is no
//! global storage state.

pub mod tasks;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::Result;

/// Get the ~/.taskdeck/ directory path
pub fn taskdeck_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Cannot find home directory")
        .join(".taskdeck")
}

/// Default database location: ~/.taskdeck/tasks.db
pub fn default_db_path() -> PathBuf {
    taskdeck_dir().join("tasks.db")
}

/// Owner of the SQLite connection.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the database at `path` and ensure the schema exists.
    /// Parent directories are created as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (used by tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.lock().execute(tasks::SCHEMA_TASKS, [])?;
        Ok(())
    }

    /// Lock the connection. Statements never panic while holding the guard,
    /// so a poisoned lock still carries a usable connection.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
