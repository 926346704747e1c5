//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle endpoints like user sign-up, login, logout, and the
//! current-profile lookup. They are designed to be nested under `/api/auth`
//! in the main Axum router.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

use super::handlers;
use super::middleware::require_session;

pub fn auth_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/signup", post(handlers::sign_up))
        .route("/login", post(handlers::login));

    let protected = Router::new()
        .route("/logout", post(handlers::logout))
        .route("/me", get(handlers::me))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    public.merge(protected).with_state(state)
}
