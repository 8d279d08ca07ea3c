//! Flow collection store
//!
//! Owns the flow list for one session. Every mutation is a single network
//! call followed by an unconditional refetch of the whole list; there is no
//! local merge. Concurrent mutations are not coordinated, so whichever
//! refetch lands last is what the store holds.

use crate::domain::{Flow, FlowDraft, FlowsPort};
use crate::error::StoreError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Snapshot of the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub flows: Vec<Flow>,
    pub is_loading: bool,
    /// Message of the last failed fetch, cleared by the next successful one
    pub error: Option<String>,
}

pub struct FlowStore {
    port: Arc<dyn FlowsPort>,
    state: RwLock<StoreState>,
}

impl FlowStore {
    pub fn new(port: Arc<dyn FlowsPort>) -> Self {
        Self {
            port,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Creates the store and performs the initial fetch
    pub async fn open(port: Arc<dyn FlowsPort>) -> Self {
        let store = Self::new(port);
        store.load().await;
        store
    }

    pub fn port(&self) -> &Arc<dyn FlowsPort> {
        &self.port
    }

    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    pub async fn flows(&self) -> Vec<Flow> {
        self.state.read().await.flows.clone()
    }

    pub async fn find(&self, id: i64) -> Option<Flow> {
        self.state.read().await.flows.iter().find(|f| f.id == id).cloned()
    }

    /// Initial fetch, flagged as loading while in flight
    pub async fn load(&self) {
        self.refresh(true).await;
    }

    /// Refetches the list. Failures are recorded in the state, never returned.
    pub async fn refresh(&self, show_loading: bool) {
        if show_loading {
            self.state.write().await.is_loading = true;
        }

        let result = self.port.list_flows().await;

        let mut state = self.state.write().await;
        match result {
            Ok(flows) => {
                state.flows = flows;
                state.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch flows");
                state.error = Some(StoreError::Load.to_string());
            }
        }
        if show_loading {
            state.is_loading = false;
        }
    }

    pub async fn create(&self, draft: &FlowDraft) -> Result<(), StoreError> {
        self.port.create_flow(draft).await.map_err(|e| {
            warn!(error = %e, name = %draft.name, "Failed to create flow");
            StoreError::Create
        })?;
        info!(name = %draft.name, "Flow created");
        self.refresh(false).await;
        Ok(())
    }

    pub async fn update(&self, id: i64, draft: &FlowDraft) -> Result<(), StoreError> {
        self.port.update_flow(id, draft).await.map_err(|e| {
            warn!(error = %e, id, "Failed to update flow");
            StoreError::Update
        })?;
        info!(id, "Flow updated");
        self.refresh(false).await;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.port.delete_flow(id).await.map_err(|e| {
            warn!(error = %e, id, "Failed to delete flow");
            StoreError::Delete
        })?;
        info!(id, "Flow deleted");
        self.refresh(false).await;
        Ok(())
    }
}
