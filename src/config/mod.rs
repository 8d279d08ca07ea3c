use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "flujos.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Where the flow server lives and how to react to an expired session
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL prefixed to every `/api/...` path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Login page used when the server answers 401; absolute or relative to `base_url`
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Request timeout. Unset keeps the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            timeout_seconds: None,
        }
    }
}

impl ApiSettings {
    /// Absolute login URL
    pub fn login_url(&self) -> String {
        flujos_core::login_url(&self.base_url, &self.login_path)
    }
}

/// Static server for the browser UI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_ui_host")]
    pub host: String,
    #[serde(default = "default_ui_port")]
    pub port: u16,
    /// Directory holding the built UI (`index.html` plus wasm bundle)
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            host: default_ui_host(),
            port: default_ui_port(),
            dist_dir: default_dist_dir(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_login_path() -> String {
    flujos_core::DEFAULT_LOGIN_PATH.to_string()
}

fn default_ui_host() -> String {
    "127.0.0.1".to_string()
}

fn default_ui_port() -> u16 {
    8080
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("ui/dist")
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::from_file(&cli.config)?;
        settings.apply_cli_overrides(cli);
        Ok(settings)
    }

    /// Loads `path` (optional) layered under `FLUJOS__SECTION__KEY` variables
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("FLUJOS").separator("__"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        tracing::debug!(config = %path.display(), base_url = %settings.api.base_url, "settings loaded");
        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(url) = &cli.api_url {
            self.api.base_url = url.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.api.timeout_seconds = Some(timeout);
        }
    }

    pub fn to_toml(&self) -> Result<String, anyhow::Error> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings.api.login_url(), "http://localhost:8000/login");
        assert_eq!(settings.ui.port, 8080);
        assert!(settings.api.timeout_seconds.is_none());
    }

    #[test]
    fn test_login_url_variants() {
        let mut api = ApiSettings {
            base_url: "https://flows.example.com/".to_string(),
            login_path: "login".to_string(),
            timeout_seconds: None,
        };
        assert_eq!(api.login_url(), "https://flows.example.com/login");

        api.login_path = "https://sso.example.com/auth".to_string();
        assert_eq!(api.login_url(), "https://sso.example.com/auth");
    }
}
