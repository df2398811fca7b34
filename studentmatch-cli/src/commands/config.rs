//! Config inspection and bootstrap

use std::path::Path;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::settings::Settings;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective settings (file + environment) as TOML
    Show,
    /// Write a config file with default settings
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::default_path);

    match args.command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let settings = Settings::load(explicit)?;
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init(init) => run_init(&path, init),
    }
}

fn run_init(path: &Path, args: InitArgs) -> Result<()> {
    if path.exists() && !args.force {
        bail!(
            "Config already exists at {}\n\nUse --force to overwrite",
            path.display()
        );
    }

    Settings::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
