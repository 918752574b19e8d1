//! Serve command implementation

use anyhow::Result;
use tracing::info;

use ecoquest::config::Config;
use ecoquest::server::{AppState, HttpServer};

/// Run the HTTP API in the foreground
pub fn serve_command(config: &Config) -> Result<()> {
    let db = super::open_store(config)?;
    info!(
        "[ecoquest:serve] Using database {}",
        config.database_path().display()
    );

    let server = HttpServer::bind(&config.settings.server.bind_addr(), AppState::new(db))?;
    server.run();
    Ok(())
}
