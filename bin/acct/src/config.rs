//! Client-side configuration.
//!
//! Reads/writes `~/.acct/config.toml`. The session record lives in the
//! same directory (see [`account_client::FileStore`]); `ACCT_HOME`
//! overrides the directory for tests and multi-account setups.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Matches the development default of the account service.
pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// Client configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Account service base URL.
    #[serde(default = "default_server")]
    pub server: String,
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
        }
    }
}

impl ClientConfig {
    /// Configuration directory: `$ACCT_HOME`, or `~/.acct`.
    pub fn home_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("ACCT_HOME") {
            return PathBuf::from(dir);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Path::new(&home).join(".acct")
    }

    /// Default config file path: `~/.acct/config.toml`.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Load config from disk, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
