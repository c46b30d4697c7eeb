//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::{AppConfig, Document};
use crate::services::{
    BindingApplier, CatalogService, CatalogStore, ElementStore, InMemoryHost, ScanOrchestrator,
    VariableStore,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<CatalogService>,
    pub orchestrator: Arc<ScanOrchestrator>,
    pub applier: Arc<BindingApplier>,
    pub elements: Arc<dyn ElementStore>,
}

/// Create application state over an in-memory host for a document snapshot.
pub fn create_app_state(document: Document, config: Arc<AppConfig>) -> AppState {
    let host = Arc::new(InMemoryHost::new(document));
    create_app_state_with_stores(config, host.clone(), host.clone(), host)
}

/// Create application state over explicit collaborator stores.
pub fn create_app_state_with_stores(
    config: Arc<AppConfig>,
    catalog_store: Arc<dyn CatalogStore>,
    elements: Arc<dyn ElementStore>,
    variables: Arc<dyn VariableStore>,
) -> AppState {
    let catalog = Arc::new(CatalogService::new(catalog_store.clone()));
    let orchestrator = Arc::new(ScanOrchestrator::new(
        config.clone(),
        catalog.clone(),
        elements.clone(),
    ));
    let applier = Arc::new(BindingApplier::new(catalog_store, elements.clone(), variables));

    AppState {
        config,
        catalog,
        orchestrator,
        applier,
        elements,
    }
}

/// Build the API router with all commands and middleware.
///
/// This is the core router used by both production and tests. The command
/// surface is closed: requests outside it get a structured unrecognized-
/// command payload from the fallback, never a bare 404.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/collections", get(api::handle_collections))
        .route("/api/scan", post(api::handle_scan))
        .route("/api/candidates", get(api::handle_candidates))
        .route("/api/suggestions", get(api::handle_suggestions))
        .route("/api/apply", post(api::handle_apply))
        .route("/api/apply-color", post(api::handle_apply_color))
        .route("/api/select", post(api::handle_select))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .fallback(unrecognized_command)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn unrecognized_command() -> ApiError {
    ApiError::UnrecognizedCommand
}
