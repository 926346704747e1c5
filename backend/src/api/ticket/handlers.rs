//! Handler functions for the support-ticket API.
//!
//! These functions process ticket requests, run the authorization gate with
//! the floor each route requires, and delegate the workflow rules to
//! `services::ticket_workflow`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tooldeck_store::models::{
    Profile, Role, SupportTicket, TicketMessage, TicketPriority, TicketStatus,
};
use uuid::Uuid;

use crate::auth::middleware::CurrentSession;
use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub description: String,
    /// Defaults to `medium` when the client omits it; the workflow engine
    /// itself always receives an explicit value.
    pub priority: Option<TicketPriority>,
}

#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    pub status: Option<TicketStatus>,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: TicketStatus,
}

#[derive(Debug, Serialize)]
pub struct TicketDetailResponse {
    pub ticket: SupportTicket,
    pub messages: Vec<TicketMessage>,
}

#[derive(Debug, Serialize)]
pub struct PostMessageResponse {
    pub ticket: SupportTicket,
    pub message: TicketMessage,
}

fn is_staff(profile: &Profile) -> bool {
    profile.role >= Role::Moderator
}

/// Owners and staff may see a ticket; everyone else gets `Forbidden`.
fn check_ticket_access(profile: &Profile, ticket: &SupportTicket) -> Result<(), ApiError> {
    if ticket.user_id == profile.id || is_staff(profile) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

pub async fn create_ticket(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<SupportTicket>), ApiError> {
    let profile = state.gate.authorize(Some(&session), None, None).await?;
    let ticket = state
        .tickets
        .create_ticket(
            profile.id,
            &req.subject,
            &req.description,
            req.priority.unwrap_or(TicketPriority::Medium),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

pub async fn list_tickets(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<Vec<SupportTicket>>, ApiError> {
    let profile = state.gate.authorize(Some(&session), None, None).await?;
    let owner = if is_staff(&profile) {
        None
    } else {
        Some(profile.id)
    };
    let tickets = state.tickets.list_tickets(owner, query.status).await?;
    Ok(Json(tickets))
}

pub async fn ticket_detail(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(ticket_id): Path<Uuid>,
) -> Result<Json<TicketDetailResponse>, ApiError> {
    let profile = state.gate.authorize(Some(&session), None, None).await?;
    let (ticket, messages) = state.tickets.ticket_with_messages(ticket_id).await?;
    check_ticket_access(&profile, &ticket)?;
    Ok(Json(TicketDetailResponse { ticket, messages }))
}

pub async fn post_message(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<PostMessageResponse>), ApiError> {
    let profile = state.gate.authorize(Some(&session), None, None).await?;
    let (ticket, _) = state.tickets.ticket_with_messages(ticket_id).await?;
    check_ticket_access(&profile, &ticket)?;

    let (ticket, message) = state
        .tickets
        .post_message(ticket_id, profile.id, &req.message, is_staff(&profile))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PostMessageResponse { ticket, message }),
    ))
}

pub async fn set_status(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<SupportTicket>, ApiError> {
    // The workflow engine enforces the staff-only rule from the acting
    // role; the gate here only resolves the profile.
    let profile = state.gate.authorize(Some(&session), None, None).await?;
    let ticket = state
        .tickets
        .set_status(ticket_id, req.status, profile.role)
        .await?;
    Ok(Json(ticket))
}
