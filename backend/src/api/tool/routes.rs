//! Defines the HTTP routes for the tool catalog.
//!
//! `tool_router` serves `/api/tools`, `category_router` serves
//! `/api/categories`; both require a valid session, with catalog mutations
//! gated to admins inside the handlers.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::middleware::require_session;
use crate::state::AppState;

use super::handlers;

pub fn tool_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_tools).post(handlers::create_tool))
        .route(
            "/:id",
            get(handlers::get_tool)
                .put(handlers::update_tool)
                .delete(handlers::delete_tool),
        )
        .route("/:id/launch", post(handlers::launch_tool))
        .route_layer(from_fn_with_state(state.clone(), require_session))
        .with_state(state)
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:id",
            axum::routing::put(handlers::update_category).delete(handlers::delete_category),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session))
        .with_state(state)
}
