//! Module for user profile and management API endpoints.
//!
//! This module handles functionalities related to user information that is
//! distinct from the core authentication process: self-service profile
//! edits and the admin-side user management.

pub mod handlers;
pub mod routes;
