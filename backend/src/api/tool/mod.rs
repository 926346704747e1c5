//! Module for the tool-catalog API.
//!
//! This module defines the public interface for browsing and launching
//! tools and for the admin-side catalog management (tools and categories).

pub mod handlers;
pub mod routes;
