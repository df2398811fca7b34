//! HTTP server command
//!
//! Opens the database (creating the schema if needed) and serves the API
//! until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use studentmatch_server::{create_pool, run_server, ServerConfig};

use crate::settings::Settings;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config/environment)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// SQLite database file (overrides config/environment)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Only accept browser requests from localhost origins
    #[arg(long)]
    pub cors_localhost: bool,
}

impl ServeArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(bind) = self.bind {
            settings.bind = bind;
        }
        if let Some(db_path) = &self.db_path {
            settings.db_path = db_path.clone();
        }
        if self.cors_localhost {
            settings.cors_permissive = false;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut settings: Settings) -> Result<()> {
    args.apply(&mut settings);

    tracing::info!(
        bind = %settings.bind,
        db = %settings.db_path.display(),
        "Starting studentmatch server"
    );

    let pool = create_pool(&settings.db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", settings.db_path.display()))?;

    let config = ServerConfig {
        bind_addr: settings.bind,
        cors_permissive: settings.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(pool.clone(), config).await.context("Server error")?;

    pool.close().await;
    Ok(())
}
