use std::sync::Arc;

use crate::application::services::{AccountService, LinkService, SessionService};
use crate::domain::access_gate::CycleGate;
use crate::domain::repositories::SnapshotStore;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn SnapshotStore>>,
    pub account_service: Arc<AccountService<dyn SnapshotStore>>,
    pub session_service: Arc<SessionService>,
    pub store: Arc<dyn SnapshotStore>,
    pub public_base_url: Option<String>,
}

impl AppState {
    /// Wires every service to one store and one shared gate.
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        gate: CycleGate,
        session_service: SessionService,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(store.clone(), gate.clone())),
            account_service: Arc::new(AccountService::new(store.clone(), gate)),
            session_service: Arc::new(session_service),
            store,
            public_base_url,
        }
    }
}
