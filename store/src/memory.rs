//! In-memory store adapter.
//!
//! Backs all four store traits with plain maps behind a single
//! `tokio::sync::Mutex`. One lock for the whole table set keeps the ticket
//! workflow's append-plus-transition a genuinely atomic unit and matches the
//! single-writer-per-record model the backend assumes of the hosted store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{
    AccessLog, Category, Profile, Session, StatusTransition, SupportTicket, TicketMessage,
    TicketStatus, Tool,
};
use crate::{CatalogStore, ProfileStore, SessionStore, TicketStore};

#[derive(Debug, Clone)]
struct Credential {
    user_id: Uuid,
    password: String,
}

#[derive(Default)]
struct Tables {
    credentials: HashMap<String, Credential>,
    sessions: HashMap<String, Session>,
    profiles: HashMap<Uuid, Profile>,
    tools: HashMap<Uuid, Tool>,
    categories: HashMap<Uuid, Category>,
    tickets: HashMap<Uuid, SupportTicket>,
    messages: Vec<TicketMessage>,
    access_logs: Vec<AccessLog>,
}

pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            tables: Mutex::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn register_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.credentials.contains_key(email) {
            return Err(StoreError::Conflict(format!(
                "email {} already registered",
                email
            )));
        }
        tables.credentials.insert(
            email.to_string(),
            Credential {
                user_id,
                password: password.to_string(),
            },
        );
        Ok(())
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
        ttl: Duration,
    ) -> Result<Session, StoreError> {
        let mut tables = self.tables.lock().await;
        let credential = tables
            .credentials
            .get(email)
            .filter(|c| c.password == password)
            .cloned()
            .ok_or(StoreError::InvalidCredentials)?;

        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user_id: credential.user_id,
            issued_at: now,
            expires_at: now + ttl,
        };
        tables.sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, token: &str) -> Result<Option<Session>, StoreError> {
        let mut tables = self.tables.lock().await;
        match tables.sessions.get(token) {
            Some(session) if session.is_expired(Utc::now()) => {
                tables.sessions.remove(token);
                Ok(None)
            }
            Some(session) => Ok(Some(session.clone())),
            None => Ok(None),
        }
    }

    async fn sign_out(&self, token: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables.sessions.remove(token);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn insert_profile(&self, profile: Profile) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.profiles.contains_key(&profile.id)
            || tables.profiles.values().any(|p| p.email == profile.email)
        {
            return Err(StoreError::Conflict(format!(
                "profile for {} already exists",
                profile.email
            )));
        }
        tables.profiles.insert(profile.id, profile);
        Ok(())
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.profiles.get(&id).cloned())
    }

    async fn update_profile(&self, profile: Profile) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.profiles.contains_key(&profile.id) {
            return Err(StoreError::NotFound("profile"));
        }
        tables.profiles.insert(profile.id, profile);
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let tables = self.tables.lock().await;
        let mut profiles: Vec<Profile> = tables.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(profiles)
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn insert_ticket(&self, ticket: SupportTicket) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.tickets.contains_key(&ticket.id) {
            return Err(StoreError::Conflict(format!(
                "ticket {} already exists",
                ticket.id
            )));
        }
        tables.tickets.insert(ticket.id, ticket);
        Ok(())
    }

    async fn get_ticket(&self, id: Uuid) -> Result<Option<SupportTicket>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.tickets.get(&id).cloned())
    }

    async fn update_ticket(&self, ticket: SupportTicket) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.tickets.contains_key(&ticket.id) {
            return Err(StoreError::NotFound("ticket"));
        }
        tables.tickets.insert(ticket.id, ticket);
        Ok(())
    }

    async fn list_tickets(
        &self,
        owner: Option<Uuid>,
        status: Option<TicketStatus>,
    ) -> Result<Vec<SupportTicket>, StoreError> {
        let tables = self.tables.lock().await;
        let mut tickets: Vec<SupportTicket> = tables
            .tickets
            .values()
            .filter(|t| owner.map_or(true, |o| t.user_id == o))
            .filter(|t| status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    async fn append_message(
        &self,
        message: TicketMessage,
        transition: Option<StatusTransition>,
    ) -> Result<SupportTicket, StoreError> {
        // Append and conditional transition happen under one lock
        // acquisition; a reader can never observe the message without the
        // transition it carried.
        let mut tables = self.tables.lock().await;
        let ticket = tables
            .tickets
            .get_mut(&message.ticket_id)
            .ok_or(StoreError::NotFound("ticket"))?;

        if let Some(transition) = transition {
            if ticket.status == transition.from {
                ticket.status = transition.to;
                ticket.updated_at = Utc::now();
            }
        }
        let ticket = ticket.clone();
        tables.messages.push(message);
        Ok(ticket)
    }

    async fn list_messages(&self, ticket_id: Uuid) -> Result<Vec<TicketMessage>, StoreError> {
        let tables = self.tables.lock().await;
        let mut messages: Vec<TicketMessage> = tables
            .messages
            .iter()
            .filter(|m| m.ticket_id == ticket_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_tool(&self, tool: Tool) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.tools.contains_key(&tool.id) {
            return Err(StoreError::Conflict(format!("tool {} already exists", tool.id)));
        }
        tables.tools.insert(tool.id, tool);
        Ok(())
    }

    async fn get_tool(&self, id: Uuid) -> Result<Option<Tool>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.tools.get(&id).cloned())
    }

    async fn update_tool(&self, tool: Tool) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.tools.contains_key(&tool.id) {
            return Err(StoreError::NotFound("tool"));
        }
        tables.tools.insert(tool.id, tool);
        Ok(())
    }

    async fn delete_tool(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables
            .tools
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("tool"))
    }

    async fn list_tools(&self, active_only: bool) -> Result<Vec<Tool>, StoreError> {
        let tables = self.tables.lock().await;
        let mut tools: Vec<Tool> = tables
            .tools
            .values()
            .filter(|t| !active_only || t.is_active)
            .cloned()
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tools)
    }

    async fn insert_category(&self, category: Category) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.categories.contains_key(&category.id) {
            return Err(StoreError::Conflict(format!(
                "category {} already exists",
                category.id
            )));
        }
        tables.categories.insert(category.id, category);
        Ok(())
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn update_category(&self, category: Category) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.categories.contains_key(&category.id) {
            return Err(StoreError::NotFound("category"));
        }
        tables.categories.insert(category.id, category);
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables
            .categories
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("category"))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let tables = self.tables.lock().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        categories.sort_by_key(|c| c.order_index);
        Ok(categories)
    }

    async fn record_access(&self, log: AccessLog) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables.access_logs.push(log);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketPriority;
    use chrono::TimeZone;

    fn ticket(status: TicketStatus, created_at: chrono::DateTime<Utc>) -> SupportTicket {
        SupportTicket {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            subject: "subject".to_string(),
            description: "description".to_string(),
            priority: TicketPriority::Medium,
            status,
            created_at,
            updated_at: created_at,
            resolved_at: None,
        }
    }

    fn message(ticket_id: Uuid) -> TicketMessage {
        TicketMessage {
            id: Uuid::new_v4(),
            ticket_id,
            user_id: Uuid::new_v4(),
            message: "hello".to_string(),
            is_admin_reply: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn expired_sessions_are_destroyed_on_lookup() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        store
            .register_credentials(user_id, "a@b.c", "secret")
            .await
            .unwrap();
        let session = store
            .sign_in("a@b.c", "secret", Duration::milliseconds(-1))
            .await
            .unwrap();

        assert!(store.get_session(&session.token).await.unwrap().is_none());
        // The token is gone, not just filtered.
        assert!(store.get_session(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_in_rejects_wrong_password() {
        let store = MemoryStore::new();
        store
            .register_credentials(Uuid::new_v4(), "a@b.c", "secret")
            .await
            .unwrap();
        let err = store
            .sign_in("a@b.c", "wrong", Duration::hours(1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        let profile = Profile::new("a@b.c".to_string(), "A".to_string());
        store.insert_profile(profile.clone()).await.unwrap();

        let mut dup = Profile::new("a@b.c".to_string(), "B".to_string());
        dup.id = Uuid::new_v4();
        let err = store.insert_profile(dup).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn tickets_list_newest_first() {
        let store = MemoryStore::new();
        let older = ticket(
            TicketStatus::Open,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let newer = ticket(
            TicketStatus::Open,
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        );
        store.insert_ticket(older.clone()).await.unwrap();
        store.insert_ticket(newer.clone()).await.unwrap();

        let listed = store.list_tickets(None, None).await.unwrap();
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }

    #[tokio::test]
    async fn append_applies_transition_only_from_expected_state() {
        let store = MemoryStore::new();
        let t = ticket(TicketStatus::Open, Utc::now());
        store.insert_ticket(t.clone()).await.unwrap();

        let transition = StatusTransition {
            from: TicketStatus::Open,
            to: TicketStatus::InProgress,
        };
        let after = store
            .append_message(message(t.id), Some(transition))
            .await
            .unwrap();
        assert_eq!(after.status, TicketStatus::InProgress);

        // Same guard again: the ticket is no longer open, so the status
        // stays put while the message still lands.
        let after = store
            .append_message(message(t.id), Some(transition))
            .await
            .unwrap();
        assert_eq!(after.status, TicketStatus::InProgress);
        assert_eq!(store.list_messages(t.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn append_to_unknown_ticket_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .append_message(message(Uuid::new_v4()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound("ticket")));
    }
}
