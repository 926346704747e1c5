//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for user authentication
//! (sign-up, login, logout, current profile), parse request data, and
//! interact with the `auth::service` and the gate for core business logic.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use tooldeck_store::models::Profile;

use crate::errors::ApiError;
use crate::state::AppState;

use super::middleware::CurrentSession;
use super::models::{LoginRequest, SessionResponse, SignUpRequest};

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let (session, profile) = state
        .auth
        .sign_up(&req.email, &req.password, &req.full_name)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::new(session, profile)),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (session, profile) = state.auth.sign_in(&req.email, &req.password).await?;
    Ok(Json(SessionResponse::new(session, profile)))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<StatusCode, ApiError> {
    state.auth.sign_out(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.gate.authorize(Some(&session), None, None).await?;
    Ok(Json(profile))
}
