//! Defines the HTTP routes for the support-ticket API.
//!
//! All ticket routes require a valid session; ownership and role rules are
//! applied per handler. Nested under `/api/tickets` in the main router.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;

use crate::auth::middleware::require_session;
use crate::state::AppState;

use super::handlers;

pub fn ticket_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::create_ticket).get(handlers::list_tickets))
        .route("/:id", get(handlers::ticket_detail))
        .route("/:id/messages", post(handlers::post_message))
        .route("/:id/status", put(handlers::set_status))
        .route_layer(from_fn_with_state(state.clone(), require_session))
        .with_state(state)
}
