//! HTTP client for the flow server
//!
//! Thin wrapper over `reqwest` that prefixes the configured base URL and
//! routes every 401 through an [`UnauthorizedHandler`] before surfacing it.

use crate::config::ApiSettings;
use crate::domain::{Flow, FlowDraft, FlowList, FlowsPort, Step, UnauthorizedHandler};
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default 401 reaction outside a browser: there is no page to redirect,
/// so the login URL is logged for the operator.
#[derive(Debug, Default)]
pub struct LogUnauthorized;

impl UnauthorizedHandler for LogUnauthorized {
    fn on_unauthorized(&self, login_url: &str) {
        warn!(login_url, "Flow server rejected the session; sign in again");
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    login_url: String,
    on_unauthorized: Arc<dyn UnauthorizedHandler>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            login_url: settings.login_url(),
            on_unauthorized: Arc::new(LogUnauthorized),
        })
    }

    pub fn with_unauthorized_handler(mut self, handler: Arc<dyn UnauthorizedHandler>) -> Self {
        self.on_unauthorized = handler;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "flow server response");

        if status == StatusCode::UNAUTHORIZED {
            self.on_unauthorized.on_unauthorized(&self.login_url);
            return Err(ApiError::Unauthorized {
                login_url: self.login_url.clone(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let bytes = self.send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // Mutation responses are informational; an unexpected body is not an error
    async fn fetch_optional_flow(&self, request: RequestBuilder) -> Result<Option<Flow>, ApiError> {
        let bytes = self.send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes).ok())
    }
}

#[async_trait]
impl FlowsPort for ApiClient {
    async fn list_flows(&self) -> Result<Vec<Flow>, ApiError> {
        let list: FlowList = self
            .fetch_json(self.client.get(self.url("/api/flujos")))
            .await?;
        Ok(list.flows)
    }

    async fn create_flow(&self, draft: &FlowDraft) -> Result<Option<Flow>, ApiError> {
        self.fetch_optional_flow(self.client.post(self.url("/api/flujos")).json(draft))
            .await
    }

    async fn update_flow(&self, id: i64, draft: &FlowDraft) -> Result<Option<Flow>, ApiError> {
        let url = self.url(&format!("/api/flujos/{}", id));
        self.fetch_optional_flow(self.client.put(url).json(draft)).await
    }

    async fn delete_flow(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/flujos/{}", id));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn get_steps(&self, flow_id: i64) -> Result<Vec<Step>, ApiError> {
        let url = self.url(&format!("/api/detalle_flujos/{}", flow_id));
        self.fetch_json(self.client.get(url)).await
    }

    async fn save_steps(&self, flow_id: i64, steps: &[Step]) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/detalle_flujos/{}", flow_id));
        self.send(self.client.post(url).json(steps)).await?;
        Ok(())
    }
}
