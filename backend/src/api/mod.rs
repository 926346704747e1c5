//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for different API domains —
//! the tool catalog, support tickets, and user management — excluding core
//! authentication routes which are handled separately.

pub mod ticket;
pub mod tool;
pub mod user;
