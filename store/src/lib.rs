//! Backing-store boundary for the ToolDeck backend.
//!
//! The hosted relational store of the portal (authentication, row storage)
//! is modeled as a set of async traits so every component receives an
//! explicit store handle instead of importing an ambient client. The crate
//! ships one adapter, [`memory::MemoryStore`], which keeps all tables behind
//! a single lock and therefore satisfies the append/transition atomicity the
//! ticket workflow requires.

pub mod errors;
pub mod memory;
pub mod models;

use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use errors::StoreError;
use models::{
    AccessLog, Category, Profile, Session, StatusTransition, SupportTicket, TicketMessage,
    TicketStatus, Tool,
};

/// Identity provider surface: credentials and session tokens live here and
/// nowhere else.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Registers the credential backing a newly created profile. Fails with
    /// `Conflict` if the email is already registered.
    async fn register_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), StoreError>;

    /// Verifies the credential and issues a fresh session valid for `ttl`.
    async fn sign_in(&self, email: &str, password: &str, ttl: Duration)
        -> Result<Session, StoreError>;

    /// Resolves a token to its session. Expired sessions are destroyed and
    /// reported as absent.
    async fn get_session(&self, token: &str) -> Result<Option<Session>, StoreError>;

    /// Revokes a session. Revoking an unknown token is a no-op.
    async fn sign_out(&self, token: &str) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fails with `Conflict` when a profile with the same id or email
    /// already exists.
    async fn insert_profile(&self, profile: Profile) -> Result<(), StoreError>;
    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError>;
    async fn update_profile(&self, profile: Profile) -> Result<(), StoreError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn insert_ticket(&self, ticket: SupportTicket) -> Result<(), StoreError>;
    async fn get_ticket(&self, id: Uuid) -> Result<Option<SupportTicket>, StoreError>;
    async fn update_ticket(&self, ticket: SupportTicket) -> Result<(), StoreError>;

    /// Tickets ordered by `created_at` descending, optionally narrowed to an
    /// owner and/or a status.
    async fn list_tickets(
        &self,
        owner: Option<Uuid>,
        status: Option<TicketStatus>,
    ) -> Result<Vec<SupportTicket>, StoreError>;

    /// Appends a message and, when `transition` is given and the ticket
    /// still sits in `transition.from`, moves it to `transition.to` and
    /// bumps `updated_at` — all as one atomic unit. Returns the ticket as it
    /// stands after the operation.
    async fn append_message(
        &self,
        message: TicketMessage,
        transition: Option<StatusTransition>,
    ) -> Result<SupportTicket, StoreError>;

    /// Messages of one ticket, creation-time ascending.
    async fn list_messages(&self, ticket_id: Uuid) -> Result<Vec<TicketMessage>, StoreError>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn insert_tool(&self, tool: Tool) -> Result<(), StoreError>;
    async fn get_tool(&self, id: Uuid) -> Result<Option<Tool>, StoreError>;
    async fn update_tool(&self, tool: Tool) -> Result<(), StoreError>;
    async fn delete_tool(&self, id: Uuid) -> Result<(), StoreError>;
    /// Tools ordered by name; `active_only` drops deactivated entries.
    async fn list_tools(&self, active_only: bool) -> Result<Vec<Tool>, StoreError>;

    async fn insert_category(&self, category: Category) -> Result<(), StoreError>;
    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, StoreError>;
    async fn update_category(&self, category: Category) -> Result<(), StoreError>;
    async fn delete_category(&self, id: Uuid) -> Result<(), StoreError>;
    /// Categories ordered by `order_index` ascending.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Appends one launch audit record.
    async fn record_access(&self, log: AccessLog) -> Result<(), StoreError>;
}
