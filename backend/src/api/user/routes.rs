//! Defines the HTTP routes for user profile and management endpoints.
//!
//! Nested under `/api/users`; every route requires a valid session, with
//! the admin-only floor applied inside the handlers.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use axum::Router;

use crate::auth::middleware::require_session;
use crate::state::AppState;

use super::handlers;

pub fn user_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_users))
        .route("/me", put(handlers::update_me))
        .route("/:id", put(handlers::update_user))
        .route_layer(from_fn_with_state(state.clone(), require_session))
        .with_state(state)
}
