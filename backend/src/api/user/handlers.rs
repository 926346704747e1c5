//! Handler functions for user profile and management API endpoints.
//!
//! These functions process requests for user data. Profile owners may edit
//! their own display fields and preferences; role, plan, and account status
//! are writable by admins only. Profiles are never deleted, only moved
//! through soft account states.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tooldeck_store::models::{AccountStatus, PlanTier, Profile, Role};
use tooldeck_store::ProfileStore;
use uuid::Uuid;

use crate::auth::middleware::CurrentSession;
use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub preferences: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct AdminUserUpdateRequest {
    pub role: Option<Role>,
    pub plan: Option<PlanTier>,
    pub account_status: Option<AccountStatus>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    state
        .gate
        .authorize(Some(&session), Some(Role::Admin), None)
        .await?;
    let profiles = state.profiles.list_profiles().await?;
    Ok(Json(profiles))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<Json<Profile>, ApiError> {
    let mut profile = state.gate.authorize(Some(&session), None, None).await?;

    if let Some(full_name) = req.full_name {
        let full_name = full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ApiError::Validation {
                field: "full_name",
                message: "must not be empty".to_string(),
            });
        }
        profile.full_name = full_name;
    }
    if let Some(preferences) = req.preferences {
        profile.preferences = preferences;
    }
    profile.updated_at = Utc::now();
    state.profiles.update_profile(profile.clone()).await?;
    Ok(Json(profile))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AdminUserUpdateRequest>,
) -> Result<Json<Profile>, ApiError> {
    state
        .gate
        .authorize(Some(&session), Some(Role::Admin), None)
        .await?;

    let mut profile = state
        .profiles
        .get_profile(user_id)
        .await?
        .ok_or(ApiError::NotFound("profile"))?;
    if let Some(role) = req.role {
        profile.role = role;
    }
    if let Some(plan) = req.plan {
        profile.plan = plan;
    }
    if let Some(account_status) = req.account_status {
        profile.account_status = account_status;
    }
    profile.updated_at = Utc::now();
    state.profiles.update_profile(profile.clone()).await?;
    tracing::info!(user_id = %profile.id, "profile updated by admin");
    Ok(Json(profile))
}
