//! Command handlers behind the `flujos` binary

pub mod flows;
pub mod serve;
pub mod steps;

use crate::adapters::api_client::ApiClient;
use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::domain::FlowsPort;
use anyhow::Result;
use dialoguer::Confirm;
use std::sync::Arc;

pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    match cli.command {
        Command::Flows(command) => {
            let port: Arc<dyn FlowsPort> = Arc::new(ApiClient::new(&settings.api)?);
            flows::handle(command, port).await
        }
        Command::Steps(command) => {
            let client = ApiClient::new(&settings.api)?;
            steps::handle(command, &client).await
        }
        Command::Serve { host, port, dist } => {
            let mut settings = settings;
            if let Some(host) = host {
                settings.ui.host = host;
            }
            if let Some(port) = port {
                settings.ui.port = port;
            }
            if let Some(dist) = dist {
                settings.ui.dist_dir = dist;
            }
            serve::run(settings).await
        }
        Command::Config => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
    }
}

/// Asks before a destructive change; `--yes` skips the prompt
pub(crate) fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
