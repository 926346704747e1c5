//! Custom error types specific to authentication failures.
//!
//! This module defines the errors that can occur while signing users in and
//! out and while running the authorization gate, and maps them onto the
//! application-wide taxonomy.

use thiserror::Error;
use tooldeck_store::errors::StoreError;

use crate::errors::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No session, an expired session, or a session whose subject has no
    /// profile.
    #[error("authentication required")]
    Unauthenticated,
    /// Valid session, insufficient role, plan, or account status.
    #[error("insufficient role or plan")]
    Forbidden,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailTaken,
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidCredentials => AuthError::InvalidCredentials,
            // The only uniqueness constraint in the auth flow is the email.
            StoreError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Store(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated | AuthError::InvalidCredentials => {
                ApiError::Unauthenticated
            }
            AuthError::Forbidden => ApiError::Forbidden,
            AuthError::EmailTaken => ApiError::Validation {
                field: "email",
                message: "already registered".to_string(),
            },
            AuthError::Validation { field, message } => ApiError::Validation { field, message },
            AuthError::Store(store) => store.into(),
        }
    }
}
