use clap::Parser;
use flujos::cli::{Cli, Command};
use flujos::commands;
use flujos::config::Settings;
use tracing::{debug, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // the server logs its address and requests at info by default
    let base = u8::from(matches!(cli.command, Command::Serve { .. }));
    let level = match base.saturating_add(cli.verbose) {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new_with_cli(&cli)?;
    debug!(api = %settings.api.base_url, "configuration loaded");

    commands::run(cli, settings).await
}
