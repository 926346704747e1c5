//! Error types for the backing-store boundary.
//!
//! Every store adapter maps its transport- or engine-specific failures into
//! these variants so the backend can treat the hosted service as opaque.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A uniqueness or state constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The presented credential does not match any account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The store failed to respond; the caller may retry the whole request,
    /// the store itself performs no retry or backoff.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
