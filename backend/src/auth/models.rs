//! Data structures for authentication-related entities.
//!
//! Request and response payloads for the auth endpoints. Responses expose
//! the profile record only; credentials live in the session store and are
//! never serialized back to a client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tooldeck_store::models::{Profile, Session};

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub profile: Profile,
}

impl SessionResponse {
    pub fn new(session: Session, profile: Profile) -> Self {
        SessionResponse {
            token: session.token,
            expires_at: session.expires_at,
            profile,
        }
    }
}
