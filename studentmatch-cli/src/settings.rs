//! Layered settings for the studentmatch binary
//!
//! Precedence, lowest first: built-in defaults, TOML config file,
//! `STUDENTMATCH_*` environment variables, command-line flags (applied by the
//! individual commands).

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const ENV_BIND: &str = "STUDENTMATCH_BIND";
pub const ENV_DB: &str = "STUDENTMATCH_DB";
pub const ENV_CORS_PERMISSIVE: &str = "STUDENTMATCH_CORS_PERMISSIVE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub bind: SocketAddr,
    /// SQLite database file, created on first start
    pub db_path: PathBuf,
    /// Accept requests from any origin
    pub cors_permissive: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            db_path: PathBuf::from("StudentMatch.db"),
            cors_permissive: true,
        }
    }
}

impl Settings {
    /// Default config file: ~/.studentmatch/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".studentmatch")
            .join("config.toml")
    }

    /// Load settings from file and environment.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        settings.apply_env()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(bind) = env::var(ENV_BIND) {
            self.bind = bind
                .parse()
                .with_context(|| format!("{ENV_BIND} is not a socket address: {bind}"))?;
        }
        if let Ok(db) = env::var(ENV_DB) {
            self.db_path = PathBuf::from(db);
        }
        if let Ok(cors) = env::var(ENV_CORS_PERMISSIVE) {
            self.cors_permissive = cors
                .parse()
                .with_context(|| format!("{ENV_CORS_PERMISSIVE} must be true or false: {cors}"))?;
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::from_toml("db_path = \"/tmp/sm.db\"").unwrap();
        assert_eq!(settings.db_path, PathBuf::from("/tmp/sm.db"));
        assert_eq!(settings.bind.port(), 8000);
        assert!(settings.cors_permissive);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml("port = 3000").is_err());
    }

    #[test]
    fn save_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");
        let settings = Settings {
            bind: "127.0.0.1:9000".parse().unwrap(),
            db_path: PathBuf::from("data/sm.db"),
            cors_permissive: false,
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
