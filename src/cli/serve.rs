//! API server CLI command

use std::path::PathBuf;
use std::sync::Arc;

use crate::api;
use crate::storage::{self, Store};

/// Default port for the API server
pub const DEFAULT_PORT: u16 = 5000;

/// Execute the serve command
pub async fn execute(port: u16, db: Option<PathBuf>, static_dir: Option<PathBuf>) {
    let db_path = db.unwrap_or_else(storage::default_db_path);

    let store = match Store::open(&db_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Failed to open database {}: {}", db_path.display(), e);
            std::process::exit(1);
        }
    };

    let static_dir = static_dir.or_else(api::find_static_dir);

    if static_dir.is_some() {
        println!("Taskdeck web UI: http://localhost:{}", port);
    } else {
        println!("Taskdeck API server: http://localhost:{}/api/tasks", port);
        println!("(No static files found, API only mode)");
    }
    println!("Database: {}", db_path.display());

    if let Err(e) = api::start_server(port, store, static_dir).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
