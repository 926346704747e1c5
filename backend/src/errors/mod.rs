//! Global application error types and handlers.
//!
//! This module defines the error taxonomy used across the entire backend
//! and maps each variant to a consistent HTTP response. Authentication and
//! authorization failures additionally carry the redirect target the
//! presentation layer should follow: missing or invalid sessions go back to
//! the sign-in entry point, while valid-but-insufficient sessions go to the
//! default authenticated landing page, never to sign-in.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tooldeck_store::errors::StoreError;
use tooldeck_store::models::TicketStatus;

/// Sign-in entry point, the redirect target for `Unauthenticated`.
pub const SIGN_IN_PATH: &str = "/login";
/// Default authenticated landing page, the redirect target for `Forbidden`.
pub const LANDING_PATH: &str = "/dashboard";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No session, an expired session, or a session without a profile.
    #[error("authentication required")]
    Unauthenticated,
    /// Valid session, insufficient role, plan, or account status.
    #[error("insufficient permissions")]
    Forbidden,
    /// Malformed input to a workflow operation, with a field-level message.
    #[error("validation failed on {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    /// The ticket is closed; no further messages or transitions.
    #[error("ticket is closed")]
    TicketClosed,
    /// The requested ticket status change is not allowed.
    #[error("invalid transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: TicketStatus,
        to: TicketStatus,
    },
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A uniqueness constraint was violated in the backing store.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The backing store failed to respond. Transient; the caller may retry
    /// the whole request, the backend performs no internal retry.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::TicketClosed | ApiError::InvalidTransition { .. } | ApiError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::Forbidden => "forbidden",
            ApiError::Validation { .. } => "validation_error",
            ApiError::TicketClosed => "ticket_closed",
            ApiError::InvalidTransition { .. } => "invalid_transition",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::StoreUnavailable(_) => "store_unavailable",
        }
    }

    fn redirect(&self) -> Option<&'static str> {
        match self {
            ApiError::Unauthenticated => Some(SIGN_IN_PATH),
            ApiError::Forbidden => Some(LANDING_PATH),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        if let ApiError::Validation { field, .. } = &self {
            body["field"] = json!(field);
        }
        if let Some(redirect) = self.redirect() {
            body["redirect"] = json!(redirect);
        }
        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::NotFound(what),
            StoreError::Conflict(msg) => ApiError::Conflict(msg),
            StoreError::InvalidCredentials => ApiError::Unauthenticated,
            StoreError::Unavailable(msg) => ApiError::StoreUnavailable(msg),
        }
    }
}
