//! ToolDeck backend: session gating, support-ticket workflow, and the
//! catalog/profile management of a digital-tools subscription portal.
//!
//! The library exposes the modules the binary wires together so the
//! integration tests can drive the services directly against a store
//! adapter.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod state;
