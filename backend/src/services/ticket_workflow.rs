//! The support-ticket workflow engine.
//!
//! Drives the lifecycle `open → in_progress → resolved → closed` and the
//! ticket's message thread. `closed` is terminal: no further status changes
//! or messages are accepted. The one piece of embedded business logic is the
//! first admin reply on an open ticket, which marks the ticket as picked up
//! by moving it to `in_progress` in the same atomic store operation as the
//! message append.

use std::sync::Arc;

use chrono::Utc;
use tooldeck_store::models::{
    Role, StatusTransition, SupportTicket, TicketMessage, TicketPriority, TicketStatus,
};
use tooldeck_store::TicketStore;
use uuid::Uuid;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct TicketWorkflow {
    tickets: Arc<dyn TicketStore>,
}

impl TicketWorkflow {
    pub fn new(tickets: Arc<dyn TicketStore>) -> Self {
        TicketWorkflow { tickets }
    }

    /// Opens a new ticket. Subject and description must be non-empty after
    /// trimming; the priority is always explicit at this level (the UI
    /// default, if any, is applied by the caller).
    pub async fn create_ticket(
        &self,
        user_id: Uuid,
        subject: &str,
        description: &str,
        priority: TicketPriority,
    ) -> Result<SupportTicket, ApiError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(ApiError::Validation {
                field: "subject",
                message: "must not be empty".to_string(),
            });
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(ApiError::Validation {
                field: "description",
                message: "must not be empty".to_string(),
            });
        }

        let now = Utc::now();
        let ticket = SupportTicket {
            id: Uuid::new_v4(),
            user_id,
            subject: subject.to_string(),
            description: description.to_string(),
            priority,
            status: TicketStatus::Open,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        };
        self.tickets.insert_ticket(ticket.clone()).await?;
        tracing::info!(ticket_id = %ticket.id, user_id = %user_id, "ticket created");
        Ok(ticket)
    }

    /// Appends a message to the thread. Fails with `TicketClosed` on a
    /// closed ticket regardless of the actor. An admin reply to an `open`
    /// ticket also moves it to `in_progress`; the append and that transition
    /// are a single atomic store operation, so a reader can never observe
    /// one without the other. Repeated admin replies do not re-trigger the
    /// transition.
    pub async fn post_message(
        &self,
        ticket_id: Uuid,
        author_id: Uuid,
        body: &str,
        is_admin_reply: bool,
    ) -> Result<(SupportTicket, TicketMessage), ApiError> {
        let ticket = self
            .tickets
            .get_ticket(ticket_id)
            .await?
            .ok_or(ApiError::NotFound("ticket"))?;
        if ticket.status == TicketStatus::Closed {
            return Err(ApiError::TicketClosed);
        }

        let body = body.trim();
        if body.is_empty() {
            return Err(ApiError::Validation {
                field: "message",
                message: "must not be empty".to_string(),
            });
        }

        let message = TicketMessage {
            id: Uuid::new_v4(),
            ticket_id,
            user_id: author_id,
            message: body.to_string(),
            is_admin_reply,
            created_at: Utc::now(),
        };
        // The first admin touch signals the ticket has been picked up. The
        // guard re-checks the source state inside the store's atomic unit.
        let transition = (is_admin_reply && ticket.status == TicketStatus::Open).then_some(
            StatusTransition {
                from: TicketStatus::Open,
                to: TicketStatus::InProgress,
            },
        );
        let ticket = self
            .tickets
            .append_message(message.clone(), transition)
            .await?;
        Ok((ticket, message))
    }

    /// Explicit status change by staff. Owners may not change status, only
    /// message. Tickets cannot be reopened by a simple status set, and
    /// `closed` is terminal. `resolved_at` is stamped only on a transition
    /// into `resolved`; a ticket that was resolved and later closed keeps
    /// its original resolution timestamp.
    pub async fn set_status(
        &self,
        ticket_id: Uuid,
        new_status: TicketStatus,
        acting_role: Role,
    ) -> Result<SupportTicket, ApiError> {
        if acting_role < Role::Moderator {
            return Err(ApiError::Forbidden);
        }
        let mut ticket = self
            .tickets
            .get_ticket(ticket_id)
            .await?
            .ok_or(ApiError::NotFound("ticket"))?;

        let current = ticket.status;
        if current == TicketStatus::Closed
            || (new_status == TicketStatus::Open && current != TicketStatus::Open)
        {
            return Err(ApiError::InvalidTransition {
                from: current,
                to: new_status,
            });
        }

        let now = Utc::now();
        ticket.status = new_status;
        ticket.updated_at = now;
        if new_status == TicketStatus::Resolved {
            ticket.resolved_at = Some(now);
        }
        self.tickets.update_ticket(ticket.clone()).await?;
        tracing::info!(
            ticket_id = %ticket.id,
            from = ?current,
            to = ?new_status,
            "ticket status changed"
        );
        Ok(ticket)
    }

    /// Tickets ordered by `created_at` descending; both filters are pure
    /// predicates.
    pub async fn list_tickets(
        &self,
        owner: Option<Uuid>,
        status: Option<TicketStatus>,
    ) -> Result<Vec<SupportTicket>, ApiError> {
        Ok(self.tickets.list_tickets(owner, status).await?)
    }

    /// A ticket together with its thread, creation-time ascending.
    pub async fn ticket_with_messages(
        &self,
        ticket_id: Uuid,
    ) -> Result<(SupportTicket, Vec<TicketMessage>), ApiError> {
        let ticket = self
            .tickets
            .get_ticket(ticket_id)
            .await?
            .ok_or(ApiError::NotFound("ticket"))?;
        let messages = self.tickets.list_messages(ticket_id).await?;
        Ok((ticket, messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tooldeck_store::memory::MemoryStore;

    fn workflow() -> TicketWorkflow {
        TicketWorkflow::new(Arc::new(MemoryStore::new()))
    }

    async fn open_ticket(workflow: &TicketWorkflow, user_id: Uuid) -> SupportTicket {
        workflow
            .create_ticket(user_id, "Cannot log in", "Login button does nothing", TicketPriority::High)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_rejects_empty_subject() {
        let workflow = workflow();
        let err = workflow
            .create_ticket(Uuid::new_v4(), "   ", "description", TicketPriority::Medium)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "subject", .. }));
    }

    #[tokio::test]
    async fn create_produces_an_open_unresolved_ticket() {
        let workflow = workflow();
        let ticket = open_ticket(&workflow, Uuid::new_v4()).await;
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::High);
        assert_eq!(ticket.created_at, ticket.updated_at);
        assert!(ticket.resolved_at.is_none());
    }

    #[tokio::test]
    async fn first_admin_reply_moves_open_to_in_progress_once() {
        let workflow = workflow();
        let ticket = open_ticket(&workflow, Uuid::new_v4()).await;
        let admin = Uuid::new_v4();

        let (after, _) = workflow
            .post_message(ticket.id, admin, "ack", true)
            .await
            .unwrap();
        assert_eq!(after.status, TicketStatus::InProgress);

        let (after, _) = workflow
            .post_message(ticket.id, admin, "still looking", true)
            .await
            .unwrap();
        assert_eq!(after.status, TicketStatus::InProgress);

        let (_, messages) = workflow.ticket_with_messages(ticket.id).await.unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[tokio::test]
    async fn user_replies_never_trigger_the_transition() {
        let workflow = workflow();
        let owner = Uuid::new_v4();
        let ticket = open_ticket(&workflow, owner).await;

        let (after, _) = workflow
            .post_message(ticket.id, owner, "any update?", false)
            .await
            .unwrap();
        assert_eq!(after.status, TicketStatus::Open);
    }

    #[tokio::test]
    async fn posting_to_a_closed_ticket_fails_for_everyone() {
        let workflow = workflow();
        let ticket = open_ticket(&workflow, Uuid::new_v4()).await;
        workflow
            .set_status(ticket.id, TicketStatus::Closed, Role::Admin)
            .await
            .unwrap();

        for is_admin in [false, true] {
            let err = workflow
                .post_message(ticket.id, Uuid::new_v4(), "hello?", is_admin)
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::TicketClosed));
        }
    }

    #[tokio::test]
    async fn owners_may_not_change_status() {
        let workflow = workflow();
        let ticket = open_ticket(&workflow, Uuid::new_v4()).await;
        let err = workflow
            .set_status(ticket.id, TicketStatus::Resolved, Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn resolve_stamps_resolved_at_and_close_preserves_it() {
        let workflow = workflow();
        let ticket = open_ticket(&workflow, Uuid::new_v4()).await;

        let resolved = workflow
            .set_status(ticket.id, TicketStatus::Resolved, Role::Admin)
            .await
            .unwrap();
        let stamp = resolved.resolved_at.expect("resolved_at must be set");

        let closed = workflow
            .set_status(ticket.id, TicketStatus::Closed, Role::Admin)
            .await
            .unwrap();
        assert_eq!(closed.status, TicketStatus::Closed);
        assert_eq!(closed.resolved_at, Some(stamp));
    }

    #[tokio::test]
    async fn resolved_tickets_cannot_be_reopened() {
        let workflow = workflow();
        let ticket = open_ticket(&workflow, Uuid::new_v4()).await;
        workflow
            .set_status(ticket.id, TicketStatus::Resolved, Role::Admin)
            .await
            .unwrap();

        let err = workflow
            .set_status(ticket.id, TicketStatus::Open, Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::InvalidTransition {
                from: TicketStatus::Resolved,
                to: TicketStatus::Open,
            }
        ));
    }

    #[tokio::test]
    async fn closed_is_terminal_for_status_changes() {
        let workflow = workflow();
        let ticket = open_ticket(&workflow, Uuid::new_v4()).await;
        workflow
            .set_status(ticket.id, TicketStatus::Closed, Role::Admin)
            .await
            .unwrap();

        let err = workflow
            .set_status(ticket.id, TicketStatus::InProgress, Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn moderators_may_change_status() {
        let workflow = workflow();
        let ticket = open_ticket(&workflow, Uuid::new_v4()).await;
        let resolved = workflow
            .set_status(ticket.id, TicketStatus::Resolved, Role::Moderator)
            .await
            .unwrap();
        assert_eq!(resolved.status, TicketStatus::Resolved);
    }

    #[tokio::test]
    async fn listing_filters_by_owner_and_status() {
        let workflow = workflow();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let a1 = open_ticket(&workflow, alice).await;
        let _b1 = open_ticket(&workflow, bob).await;
        workflow
            .set_status(a1.id, TicketStatus::Resolved, Role::Admin)
            .await
            .unwrap();

        let alices = workflow.list_tickets(Some(alice), None).await.unwrap();
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].id, a1.id);

        let resolved = workflow
            .list_tickets(None, Some(TicketStatus::Resolved))
            .await
            .unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, a1.id);
    }
}
