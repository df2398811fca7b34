//! studentmatch CLI - StudentMatch backend server and maintenance
//!
//! Subcommands:
//! - `serve`: run the HTTP API over a SQLite database
//! - `migrate`: create the database schema without serving
//! - `config`: inspect or bootstrap the TOML config file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod settings;
mod tracing_setup;

use settings::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "studentmatch",
    author,
    version,
    about = "CRUD backend for matching students into project groups",
    long_about = "Serve users, groups, tasks, posts, comments and ratings as JSON \
                  resources backed by a local SQLite database."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.studentmatch/config.toml)
    #[arg(long, global = true, env = "STUDENTMATCH_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema and exit
    Migrate(commands::migrate::MigrateArgs),
    /// Inspect or create the config file (path, show, init)
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, Settings::load(config)?).await?,
        Commands::Migrate(args) => commands::run_migrate(args, Settings::load(config)?).await?,
        Commands::Config(args) => commands::run_config(args, config)?,
    }
    Ok(())
}
