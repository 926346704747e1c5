//! Main entry point for the ToolDeck backend.
//!
//! This file initializes the Axum web server, sets up the backing store,
//! and registers all API routes and middleware.
//! It orchestrates the application's startup and defines its overall structure.

use std::env;
use std::sync::Arc;

use axum::{routing::get, Router};
use tooldeck_backend::config::Config;
use tooldeck_backend::state::AppState;
use tooldeck_backend::{api, auth, middleware};
use tooldeck_store::memory::MemoryStore;
use tooldeck_store::models::Role;
use tooldeck_store::ProfileStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        config.session_ttl,
    );
    seed_admin(&state).await;

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth", auth::routes::auth_router(state.clone()))
        .nest("/api/tickets", api::ticket::routes::ticket_router(state.clone()))
        .nest("/api/tools", api::tool::routes::tool_router(state.clone()))
        .nest(
            "/api/categories",
            api::tool::routes::category_router(state.clone()),
        )
        .nest("/api/users", api::user::routes::user_router(state))
        .layer(axum::middleware::from_fn(middleware::trace_request));

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler() -> &'static str {
    "Welcome to ToolDeck!"
}

/// Bootstraps the first admin account from `TOOLDECK_ADMIN_EMAIL` and
/// `TOOLDECK_ADMIN_PASSWORD` when both are set. Without one admin no user
/// or catalog management is reachable on a fresh store.
async fn seed_admin(state: &AppState) {
    let (Ok(email), Ok(password)) = (
        env::var("TOOLDECK_ADMIN_EMAIL"),
        env::var("TOOLDECK_ADMIN_PASSWORD"),
    ) else {
        return;
    };

    match state.auth.sign_up(&email, &password, "Administrator").await {
        Ok((_, mut profile)) => {
            profile.role = Role::Admin;
            if let Err(err) = state.profiles.update_profile(profile).await {
                tracing::warn!("failed to promote seeded admin: {}", err);
            } else {
                tracing::info!(%email, "seeded admin account");
            }
        }
        Err(err) => tracing::warn!("failed to seed admin account: {}", err),
    }
}
