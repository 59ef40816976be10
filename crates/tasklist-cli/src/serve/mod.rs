//! REST server for the task collection.
//!
//! Serves the JSON API over the task file plus a single-page browser client
//! at `/`.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API error responses
//! - `templates` - HTML/CSS/JS template rendering

mod handlers;
mod models;
mod templates;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use tasklist_core::{FileStorage, TaskManager, WriteMode};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    /// Task manager; the lock serializes every read-modify-write cycle
    /// handled by this process.
    pub manager: Arc<Mutex<TaskManager<FileStorage>>>,
    /// Path of the backing task file.
    pub data_file: PathBuf,
}

impl AppState {
    pub fn new(storage: FileStorage) -> Self {
        let data_file = storage.path().to_path_buf();
        Self {
            manager: Arc::new(Mutex::new(TaskManager::new(storage))),
            data_file,
        }
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the task server.
pub struct ServeConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to open the browser automatically.
    pub open_browser: bool,
    /// Path to the task file.
    pub data_file: PathBuf,
    /// How the task file is replaced on save.
    pub write_mode: WriteMode,
}

// =============================================================================
// Router
// =============================================================================

/// Build the router with all routes and layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Browser client
        .route("/", get(handlers::index))
        // API endpoints
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/{id}",
            axum::routing::put(handlers::update_task).delete(handlers::delete_task),
        )
        // CORS for API access
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Server Entry Point
// =============================================================================

/// Start the task server.
pub async fn start_server(config: ServeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = FileStorage::new(&config.data_file).with_write_mode(config.write_mode);
    if !storage.path().exists() {
        warn!(
            path = %storage.path().display(),
            "task file does not exist; requests will fail until it is created (tasklist data init)"
        );
    }

    let state = Arc::new(AppState::new(storage));
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let url = format!("http://localhost:{}", config.port);

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, data_file = %config.data_file.display(), "server running on {}", url);

    // Open browser if requested
    if config.open_browser {
        if let Err(e) = open::that(&url) {
            warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app).await?;

    Ok(())
}
