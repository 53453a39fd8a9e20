//! Web API module for taskdeck

pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

use crate::storage::Store;

/// Create the API router
pub fn create_api_router() -> Router<Arc<Store>> {
    Router::new()
        // Tasks API
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route(
            "/tasks/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
}

/// Create the full router with static file serving
pub fn create_router(store: Arc<Store>, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .nest("/api", create_api_router())
        .with_state(store);

    // Add static file serving if directory is provided
    let router = if let Some(dir) = static_dir {
        let index_file = dir.join("index.html");
        let serve_dir = ServeDir::new(&dir).not_found_service(ServeFile::new(&index_file));
        router.fallback_service(serve_dir)
    } else {
        router
    };

    // Unclassified failures become a plain 500 instead of a dropped connection
    router.layer(cors).layer(CatchPanicLayer::new())
}

/// Find the frontend dist directory
pub fn find_static_dir() -> Option<PathBuf> {
    // Try relative to current executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let dist_path = exe_dir.join("frontend").join("dist");
            if dist_path.exists() {
                return Some(dist_path);
            }
            let dist_path = exe_dir.join("dist");
            if dist_path.exists() {
                return Some(dist_path);
            }
        }
    }

    // Try relative to current working directory
    let cwd_dist = PathBuf::from("frontend/dist");
    if cwd_dist.exists() {
        return Some(cwd_dist);
    }

    None
}

/// Start the web server (API + static files)
pub async fn start_server(
    port: u16,
    store: Arc<Store>,
    static_dir: Option<PathBuf>,
) -> std::io::Result<()> {
    let app = create_router(store, static_dir);
    let addr = format!("0.0.0.0:{}", port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app)
        .await
        .map_err(std::io::Error::other)
}
