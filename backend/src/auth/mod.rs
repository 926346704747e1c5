//! Authentication module for managing user accounts, sessions, and access control.
//!
//! This module provides the public interface for user authentication-related
//! functionalities such as login, registration, session resolution, and the
//! authorization gate every protected page relies on.

pub mod errors;
pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use gate::*;
pub use middleware::*;
pub use models::*;
pub use service::*;
