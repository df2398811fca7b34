//! Create or upgrade the database schema without starting the server

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use studentmatch_server::create_pool;

use crate::settings::Settings;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// SQLite database file (overrides config/environment)
    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

pub async fn run_migrate(args: MigrateArgs, settings: Settings) -> Result<()> {
    let db_path = args.db_path.unwrap_or(settings.db_path);

    let pool = create_pool(&db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    pool.close().await;

    println!("Schema ready at {}", db_path.display());
    Ok(())
}
