//! Hosts the local rules engine over TCP for `MATCH_ENGINE_ADDR` clients.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use tui_match::adapter::{run_server, ServerConfig};
use tui_match::config::AppConfig;
use tui_match::engine::LocalEngine;
use tui_match::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let app = AppConfig::from_env();
    logging::init_stderr(&app.log_filter)?;

    let config = ServerConfig::from_env();
    info!(
        width = app.engine.width,
        height = app.engine.height,
        tile_kinds = app.engine.tile_kinds,
        seed = app.seed,
        "starting local engine"
    );
    let engine = Arc::new(LocalEngine::new(app.engine, app.seed));
    run_server(config, engine, None).await
}
