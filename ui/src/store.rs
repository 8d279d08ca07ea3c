//! Flow list shared by every page
//!
//! Provided once at the app root. Mutations make one request and then
//! refetch the whole list; failures show a fixed message per operation.

use crate::api::ApiClient;
use flujos_core::{Flow, FlowDraft, StoreError};
use leptos::prelude::*;


#[derive(Clone, Copy)]
pub struct FlowStore {
    pub flows: RwSignal<Vec<Flow>>,
    pub is_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    client: StoredValue<ApiClient>,
}

impl FlowStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            flows: RwSignal::new(Vec::new()),
            is_loading: RwSignal::new(false),
            error: RwSignal::new(None),
            client: StoredValue::new(client),
        }
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    pub fn find(&self, id: i64) -> Option<Flow> {
        self.flows.with(|flows| flows.iter().find(|f| f.id == id).cloned())
    }

    /// Initial fetch with the loading flag raised
    pub fn load(self) {
        self.is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            self.refetch().await;
            self.is_loading.set(false);
        });
    }

    pub async fn refetch(self) {
        match self.client().list_flows().await {
            Ok(flows) => {
                self.flows.set(flows);
                self.error.set(None);
            }
            Err(e) => {
                log::warn!("Failed to fetch flows: {}", e);
                self.error.set(Some(StoreError::Load.to_string()));
            }
        }
    }

    pub async fn create(self, draft: FlowDraft) -> Result<(), String> {
        self.client().create_flow(&draft).await.map_err(|e| {
            log::warn!("Failed to create flow: {}", e);
            StoreError::Create.to_string()
        })?;
        self.refetch().await;
        Ok(())
    }

    pub async fn update(self, id: i64, draft: FlowDraft) -> Result<(), String> {
        self.client().update_flow(id, &draft).await.map_err(|e| {
            log::warn!("Failed to update flow {}: {}", id, e);
            StoreError::Update.to_string()
        })?;
        self.refetch().await;
        Ok(())
    }

    pub async fn delete(self, id: i64) -> Result<(), String> {
        self.client().delete_flow(id).await.map_err(|e| {
            log::warn!("Failed to delete flow {}: {}", id, e);
            StoreError::Delete.to_string()
        })?;
        self.refetch().await;
        Ok(())
    }
}
