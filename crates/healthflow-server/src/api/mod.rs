//! REST API for the HealthFlow resource store and surge engine.
//!
//! ## Endpoints
//!
//! ### Resources
//! - `GET /api/resources` - List resources with derived status
//! - `PUT /api/resources/:id` - Partially update counts
//!
//! ### Emergency events
//! - `GET /api/emergency-events` - List events (`?status=active|resolved`)
//! - `POST /api/emergency-events` - Create an event
//! - `PUT /api/emergency-events/:id` - Resolve an event
//!
//! ### Surge
//! - `GET /api/reallocation/proposal` - Fresh surge proposal
//! - `POST /api/reallocation/apply` - Apply a plan, best effort per entry
//! - `GET /api/emergency` - Emergency flag and open event count
//! - `POST /api/emergency/activate` - Open an event and raise the flag
//! - `POST /api/emergency/deactivate` - Clear the flag
//!
//! ### Notifications
//! - `GET /api/notifications` - Most recent notifications
//! - `PUT /api/notifications/:id/read` - Mark one read

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::{ApiConfig, AppState};

/// Create the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Resource endpoints
        .route("/api/resources", get(handlers::list_resources))
        .route("/api/resources/:id", put(handlers::update_resource))
        // Emergency event endpoints
        .route(
            "/api/emergency-events",
            get(handlers::list_emergency_events).post(handlers::create_emergency_event),
        )
        .route(
            "/api/emergency-events/:id",
            put(handlers::update_emergency_event),
        )
        // Surge endpoints
        .route("/api/reallocation/proposal", get(handlers::propose_reallocation))
        .route("/api/reallocation/apply", post(handlers::apply_reallocation))
        .route("/api/emergency", get(handlers::emergency_overview))
        .route("/api/emergency/activate", post(handlers::activate_emergency))
        .route("/api/emergency/deactivate", post(handlers::deactivate_emergency))
        // Notification endpoints
        .route("/api/notifications", get(handlers::list_notifications))
        .route("/api/notifications/:id/read", put(handlers::mark_notification_read))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
