use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Settings;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub ui_assets: String,
}

pub struct HealthHandler {
    settings: Arc<Settings>,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            start_time: std::time::Instant::now(),
        }
    }

    fn assets_present(&self) -> bool {
        self.settings.ui.dist_dir.join("index.html").is_file()
    }

    /// Basic health check - returns 200 if the server is running
    pub async fn health(&self) -> impl IntoResponse {
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            checks: HealthChecks {
                ui_assets: if self.assets_present() { "ok" } else { "missing" }.to_string(),
            },
        };

        (StatusCode::OK, Json(status))
    }

    /// Readiness check - the built UI must be present in `dist_dir`
    pub async fn ready(&self) -> impl IntoResponse {
        if self.assets_present() {
            (StatusCode::OK, Json(serde_json::json!({
                "status": "ready",
                "message": "UI assets available"
            })))
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({
                "status": "not_ready",
                "message": format!("index.html not found in {}", self.settings.ui.dist_dir.display())
            })))
        }
    }
}
