//! Rust structs that represent the portal's durable records.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the backing store: profiles, sessions, the tool catalog, and the
//! support ticket thread. Wire representations use snake_case to match the
//! hosted store's column values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Role of an account, ordered by privilege.
///
/// The variant order defines the one total order used for every
/// authorization comparison: `User < Moderator < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

/// Subscription tier, ordered by entitlement.
///
/// The variant order defines the one total order used for plan gating:
/// `Free < Pro < Premium < Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Pro,
    Premium,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
    Expired,
}

/// Durable record of a user's role, plan, and status, separate from their
/// identity credential. Exactly one exists per session subject, and profiles
/// are never hard-deleted (status changes only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub plan: PlanTier,
    pub account_status: AccountStatus,
    /// Free-form per-user preferences, opaque to the backend.
    pub preferences: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// A fresh profile as produced by sign-up: regular user, free plan,
    /// active account.
    pub fn new(email: String, full_name: String) -> Self {
        let now = Utc::now();
        Profile {
            id: Uuid::new_v4(),
            email,
            full_name,
            role: Role::User,
            plan: PlanTier::Free,
            account_status: AccountStatus::Active,
            preferences: Value::Null,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated proof of identity for the current request. Owned by the session
/// store; read-only to every other component; destroyed on sign-out or
/// expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Catalog entry for a third-party tool offered through the portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub is_free: bool,
    /// Minimum plan tier required to launch the tool; ignored when
    /// `is_free` is set.
    pub min_plan_required: PlanTier,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Append-only audit record of a tool launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tool_id: Uuid,
    pub accessed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A support request and its workflow state. Tickets are never hard-deleted;
/// `resolved_at` is set if and only if the ticket has reached `resolved` at
/// least once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// One entry in a ticket's message thread. Append-only; ordering is
/// creation-time ascending; lifetime bound to the parent ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketMessage {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub is_admin_reply: bool,
    pub created_at: DateTime<Utc>,
}

/// A guarded status change applied together with a message append. The store
/// performs the change only while the ticket still sits in `from`, in the
/// same atomic unit as the append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    pub from: TicketStatus,
    pub to: TicketStatus,
}
