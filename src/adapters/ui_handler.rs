//! Static server for the browser UI
//!
//! Serves the built bundle from `ui.dist_dir`. Unknown paths fall back to
//! `index.html` so client-side routes like `/flujo/3` survive a reload.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

use crate::adapters::health_handler::HealthHandler;
use crate::config::Settings;

/// Settings the browser app reads at startup from `/config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub login_path: String,
}

impl From<&Settings> for RuntimeConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            api_base_url: settings.api.base_url.trim_end_matches('/').to_string(),
            login_path: settings.api.login_path.clone(),
        }
    }
}

async fn runtime_config(State(settings): State<Arc<Settings>>) -> Json<RuntimeConfig> {
    Json(RuntimeConfig::from(settings.as_ref()))
}

pub fn ui_router(settings: Arc<Settings>) -> Router {
    let health_handler = Arc::new(HealthHandler::new(settings.clone()));
    let dist = settings.ui.dist_dir.clone();
    let assets = ServeDir::new(&dist).fallback(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/ready", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.ready().await }
            }
        }))
        .route("/config.json", get(runtime_config))
        .fallback_service(assets)
        .with_state(settings)
}
