use crate::adapters::ui_handler::ui_router;
use crate::config::Settings;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn run(settings: Settings) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", settings.ui.host, settings.ui.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", settings.ui.host, settings.ui.port))?;

    if !settings.ui.dist_dir.join("index.html").exists() {
        warn!(dist = %settings.ui.dist_dir.display(), "UI bundle not found; build it with `trunk build` in ui/");
    }

    info!(
        %addr,
        api = %settings.api.base_url,
        dist = %settings.ui.dist_dir.display(),
        "Serving flujos UI"
    );

    let app = ui_router(Arc::new(settings));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
