//! HTTP client for the flow server
//!
//! Every request goes through [`ApiClient::send`]: a 401 sends the browser
//! to the login page, any other non-2xx status becomes an `Err`.

use flujos_core::{login_url, Flow, FlowDraft, FlowList, Step, DEFAULT_LOGIN_PATH};
use gloo_net::http::{Request, Response};
use leptos::web_sys;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Served next to the bundle by `flujos serve`
const RUNTIME_CONFIG_URL: &str = "/config.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub login_path: String,
}

impl Default for RuntimeConfig {
    /// Same-origin API with the default login page
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

/// Reads `/config.json`, falling back to same-origin defaults
pub async fn load_runtime_config() -> RuntimeConfig {
    let result = async {
        Request::get(RUNTIME_CONFIG_URL)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .json::<RuntimeConfig>()
            .await
            .map_err(|e| e.to_string())
    }
    .await;

    match result {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using default runtime config: {}", e);
            RuntimeConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    login_url: String,
}

impl ApiClient {
    pub fn new(config: &RuntimeConfig) -> Self {
        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        let login_url = login_url(&base_url, &config.login_path);
        Self { base_url, login_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: Result<Request, gloo_net::Error>) -> Result<Response, String> {
        let response = request
            .map_err(|e| format!("Failed to build request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        match response.status() {
            401 => {
                redirect_to(&self.login_url);
                Err("Unauthorized".to_string())
            }
            _ if response.ok() => Ok(response),
            status => Err(format!("Server responded with status {}", status)),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: Result<Request, gloo_net::Error>) -> Result<T, String> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    pub async fn list_flows(&self) -> Result<Vec<Flow>, String> {
        let list: FlowList = self
            .fetch_json(Request::get(&self.url("/api/flujos")).build())
            .await?;
        Ok(list.flows)
    }

    pub async fn create_flow(&self, draft: &FlowDraft) -> Result<(), String> {
        self.send(Request::post(&self.url("/api/flujos")).json(draft)).await?;
        Ok(())
    }

    pub async fn update_flow(&self, id: i64, draft: &FlowDraft) -> Result<(), String> {
        let url = self.url(&format!("/api/flujos/{}", id));
        self.send(Request::put(&url).json(draft)).await?;
        Ok(())
    }

    pub async fn delete_flow(&self, id: i64) -> Result<(), String> {
        let url = self.url(&format!("/api/flujos/{}", id));
        self.send(Request::delete(&url).build()).await?;
        Ok(())
    }

    pub async fn get_steps(&self, flow_id: i64) -> Result<Vec<Step>, String> {
        let url = self.url(&format!("/api/detalle_flujos/{}", flow_id));
        self.fetch_json(Request::get(&url).build()).await
    }

    /// Replaces the whole stored tree
    pub async fn save_steps(&self, flow_id: i64, steps: &[Step]) -> Result<(), String> {
        let url = self.url(&format!("/api/detalle_flujos/{}", flow_id));
        self.send(Request::post(&url).json(steps)).await?;
        Ok(())
    }
}

fn redirect_to(url: &str) {
    log::warn!("Session expired, redirecting to {}", url);
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url_resolution() {
        let client = ApiClient::new(&RuntimeConfig {
            api_base_url: "https://flows.example.com/".to_string(),
            login_path: "/ingresar".to_string(),
        });
        assert_eq!(client.url("/api/flujos"), "https://flows.example.com/api/flujos");
        assert_eq!(client.login_url, "https://flows.example.com/ingresar");

        let same_origin = ApiClient::new(&RuntimeConfig::default());
        assert_eq!(same_origin.url("/api/flujos"), "/api/flujos");
        assert_eq!(same_origin.login_url, "/login");
    }
}
