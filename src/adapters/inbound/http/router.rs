use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_guest_viewing_request, create_property, create_viewing_request, delete_property,
    get_property, health, list_agent_properties, list_agent_viewing_requests, list_properties,
    update_property, update_viewing_status,
};
use crate::ports::services::{PropertyService, ViewingRequestService};

/// Request body ceiling: five images of up to 10 MiB plus form fields
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 10 * 1024 * 1024 + 64 * 1024;

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub property_service: Arc<dyn PropertyService>,
    pub viewing_request_service: Arc<dyn ViewingRequestService>,
}

impl AppState {
    pub fn new(
        property_service: Arc<dyn PropertyService>,
        viewing_request_service: Arc<dyn ViewingRequestService>,
    ) -> Self {
        Self {
            property_service,
            viewing_request_service,
        }
    }
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    create_router_with_limit(state, DEFAULT_MAX_UPLOAD_BYTES)
}

/// Create the main router with a custom request body ceiling
pub fn create_router_with_limit(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(create_property_router())
        .merge(create_viewing_request_router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        // Add state for dependency injection
        .with_state(state)
}

/// Create a router with just property operations
pub fn create_property_router() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route("/properties/by-agent", get(list_agent_properties))
        .route(
            "/properties/{id}",
            get(get_property)
                .put(update_property)
                .delete(delete_property),
        )
}

/// Create a router with just viewing request operations
pub fn create_viewing_request_router() -> Router<AppState> {
    Router::new()
        .route("/viewing-requests", post(create_viewing_request))
        .route("/viewing-requests/guest", post(create_guest_viewing_request))
        .route("/viewing-requests/by-agent", get(list_agent_viewing_requests))
        .route("/viewing-requests/{id}/status", put(update_viewing_status))
}
