//! Module for the support-ticket API.
//!
//! This module defines the public interface for creating tickets, reading a
//! ticket's thread, posting messages, and staff status changes over HTTP.

pub mod handlers;
pub mod routes;
