//! Org Chart Backend
//!
//! Loads employee records once, builds the reporting hierarchy, and serves it
//! read-only to the org chart frontend.

mod api;
mod config;
mod dates;
mod errors;
mod hierarchy;
mod loader;
mod models;
mod query;
mod search;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use loader::{DatasetStore, EmployeeDataLoader};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    for fallback in &config.fallbacks {
        tracing::warn!("{}", fallback);
    }

    tracing::info!("Starting Org Chart Backend");
    tracing::info!("Data source: {}", config.data_source);
    tracing::info!("Bind address: {}", config.bind_addr);

    let loader = EmployeeDataLoader::new(config.data_source.clone(), config.fetch_timeout)?;
    let store = Arc::new(DatasetStore::new(loader));

    // Initial load; the server still starts so a later reload can recover
    tracing::info!("Loading employee data...");
    match store.reload().await {
        Ok(dataset) => tracing::info!(
            "Employee data loaded with {} employees",
            dataset.directory.employees().len()
        ),
        Err(e) => tracing::error!("Failed to load employee data: {}", e),
    }

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Datastore
        .route("/datastore", get(api::get_datastore))
        .route("/datastore/revision", get(api::get_revision))
        .route("/datastore/reload", post(api::reload_datastore))
        // Employees
        .route("/employees", get(api::list_employees))
        .route("/employees/{id}", get(api::get_employee))
        .route("/employees/{id}/subordinates", get(api::get_subordinates))
        .route("/employees/{id}/chain", get(api::get_reporting_chain))
        .route("/managers/{id}/name", get(api::get_manager_name))
        // Hierarchy
        .route("/hierarchy", get(api::get_hierarchy))
        .route("/stats", get(api::get_stats))
        .route("/facets", get(api::get_facets));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
