//! Shared application state handed to every request handler.
//!
//! Bundles the services and the gate around explicit store handles. No
//! per-request state lives here; every piece of domain state is re-fetched
//! from the backing store on each request.

use std::sync::Arc;

use chrono::Duration;
use tooldeck_store::{CatalogStore, ProfileStore, SessionStore, TicketStore};

use crate::auth::gate::Gate;
use crate::auth::service::AuthService;
use crate::services::catalog::CatalogService;
use crate::services::ticket_workflow::TicketWorkflow;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub gate: Gate,
    pub tickets: TicketWorkflow,
    pub catalog: CatalogService,
    pub profiles: Arc<dyn ProfileStore>,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        profiles: Arc<dyn ProfileStore>,
        tickets: Arc<dyn TicketStore>,
        catalog: Arc<dyn CatalogStore>,
        session_ttl: Duration,
    ) -> Self {
        AppState {
            auth: AuthService::new(sessions, profiles.clone(), session_ttl),
            gate: Gate::new(profiles.clone()),
            tickets: TicketWorkflow::new(tickets),
            catalog: CatalogService::new(catalog),
            profiles,
        }
    }
}
