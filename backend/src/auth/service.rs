//! Core business logic for the authentication system.
//!
//! This service handles sign-up, sign-in, sign-out, and session resolution.
//! Credentials never leave the session store; this layer only orchestrates
//! between handlers, the session store, and the profile repository.

use std::sync::Arc;

use chrono::Duration;
use tooldeck_store::models::{Profile, Session};
use tooldeck_store::{ProfileStore, SessionStore};

use super::errors::AuthError;

#[derive(Clone)]
pub struct AuthService {
    sessions: Arc<dyn SessionStore>,
    profiles: Arc<dyn ProfileStore>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        profiles: Arc<dyn ProfileStore>,
        session_ttl: Duration,
    ) -> Self {
        AuthService {
            sessions,
            profiles,
            session_ttl,
        }
    }

    /// Creates the profile (regular user, free plan, active account),
    /// registers the credential with the session store, and signs the new
    /// account in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(Session, Profile), AuthError> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(AuthError::Validation {
                field: "email",
                message: "must be a valid email address".to_string(),
            });
        }
        if password.len() < 8 {
            return Err(AuthError::Validation {
                field: "password",
                message: "must be at least 8 characters".to_string(),
            });
        }
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AuthError::Validation {
                field: "full_name",
                message: "must not be empty".to_string(),
            });
        }

        let profile = Profile::new(email.to_string(), full_name.to_string());
        self.profiles.insert_profile(profile.clone()).await?;
        self.sessions
            .register_credentials(profile.id, email, password)
            .await?;
        let session = self
            .sessions
            .sign_in(email, password, self.session_ttl)
            .await?;
        Ok((session, profile))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(Session, Profile), AuthError> {
        let session = self
            .sessions
            .sign_in(email.trim(), password, self.session_ttl)
            .await?;
        let profile = self
            .profiles
            .get_profile(session.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;
        Ok((session, profile))
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.sign_out(token).await?;
        Ok(())
    }

    /// Resolves a bearer token to its session; expired or unknown tokens are
    /// a hard `Unauthenticated` failure routed back through re-authentication.
    pub async fn current(&self, token: &str) -> Result<Session, AuthError> {
        self.sessions
            .get_session(token)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }
}
