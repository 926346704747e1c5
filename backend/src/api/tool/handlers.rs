//! Handler functions for the tool-catalog API.
//!
//! Browsing and launching run under any valid session (the launch path
//! applies the plan/status tool rule); catalog mutations require the admin
//! role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use tooldeck_store::models::{Category, Role, Tool};
use uuid::Uuid;

use crate::auth::middleware::CurrentSession;
use crate::errors::ApiError;
use crate::services::catalog::{CategoryDraft, CategoryUpdate, ToolDraft, ToolUpdate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListToolsQuery {
    /// Admins may ask for deactivated tools as well.
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn list_tools(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Query(query): Query<ListToolsQuery>,
) -> Result<Json<Vec<Tool>>, ApiError> {
    let profile = state.gate.authorize(Some(&session), None, None).await?;
    let include_inactive = query.include_inactive && profile.role >= Role::Moderator;
    let tools = state.catalog.list_tools(include_inactive).await?;
    Ok(Json(tools))
}

pub async fn get_tool(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(tool_id): Path<Uuid>,
) -> Result<Json<Tool>, ApiError> {
    state.gate.authorize(Some(&session), None, None).await?;
    let tool = state.catalog.get_tool(tool_id).await?;
    Ok(Json(tool))
}

pub async fn launch_tool(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(tool_id): Path<Uuid>,
) -> Result<Json<Tool>, ApiError> {
    let profile = state.gate.authorize(Some(&session), None, None).await?;
    let tool = state.catalog.launch_tool(&profile, tool_id).await?;
    Ok(Json(tool))
}

pub async fn create_tool(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(draft): Json<ToolDraft>,
) -> Result<(StatusCode, Json<Tool>), ApiError> {
    state
        .gate
        .authorize(Some(&session), Some(Role::Admin), None)
        .await?;
    let tool = state.catalog.create_tool(draft).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

pub async fn update_tool(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(tool_id): Path<Uuid>,
    Json(update): Json<ToolUpdate>,
) -> Result<Json<Tool>, ApiError> {
    state
        .gate
        .authorize(Some(&session), Some(Role::Admin), None)
        .await?;
    let tool = state.catalog.update_tool(tool_id, update).await?;
    Ok(Json(tool))
}

pub async fn delete_tool(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(tool_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .gate
        .authorize(Some(&session), Some(Role::Admin), None)
        .await?;
    state.catalog.delete_tool(tool_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_categories(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<Vec<Category>>, ApiError> {
    state.gate.authorize(Some(&session), None, None).await?;
    let categories = state.catalog.list_categories().await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(draft): Json<CategoryDraft>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    state
        .gate
        .authorize(Some(&session), Some(Role::Admin), None)
        .await?;
    let category = state.catalog.create_category(draft).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(category_id): Path<Uuid>,
    Json(update): Json<CategoryUpdate>,
) -> Result<Json<Category>, ApiError> {
    state
        .gate
        .authorize(Some(&session), Some(Role::Admin), None)
        .await?;
    let category = state.catalog.update_category(category_id, update).await?;
    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .gate
        .authorize(Some(&session), Some(Role::Admin), None)
        .await?;
    state.catalog.delete_category(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
