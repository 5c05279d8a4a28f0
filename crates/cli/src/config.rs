// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration.
//!
//! Configuration is read from `<config dir>/quill/config.toml` (or the file
//! given with `--config`). Every field has a default, so the file is
//! optional:
//!
//! ```toml
//! data_dir = "/home/me/.local/share/quill"
//!
//! [remote]
//! url = "http://localhost:7000/api/v1"
//! token = "..."
//! timeout_secs = 30
//!
//! [sync]
//! sync_on_mutation = true
//! probe_interval_ms = 5000
//! initial_delay_ms = 500
//! max_delay_secs = 30
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use quill_sync::{ProbeConfig, RemoteConfig, SyncConfig};
use serde::Deserialize;

use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "quill";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that overrides `remote.token`.
pub const TOKEN_ENV: &str = "QUILL_TOKEN";

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Where local notes and the pending queue are stored.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub remote: RemoteSection,
    #[serde(default)]
    pub sync: SyncSection,
}

/// `[remote]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSection {
    /// Base URL of the notes API.
    #[serde(default = "default_url")]
    pub url: String,
    /// Bearer token for the API.
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteSection {
    fn default() -> Self {
        RemoteSection {
            url: default_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[sync]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncSection {
    /// Sync after each change while online (default: true).
    #[serde(default = "default_true")]
    pub sync_on_mutation: bool,
    /// How often `watch` checks a reachable server, in milliseconds (default: 5000).
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
    /// First retry delay once the server is unreachable, in milliseconds (default: 500).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Longest retry delay, in seconds (default: 30).
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,
}

impl Default for SyncSection {
    fn default() -> Self {
        SyncSection {
            sync_on_mutation: true,
            probe_interval_ms: default_probe_interval_ms(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_secs: default_max_delay_secs(),
        }
    }
}

fn default_url() -> String {
    RemoteConfig::default().url
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_probe_interval_ms() -> u64 {
    5_000
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_secs() -> u64 {
    30
}

/// Default location of the config file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Config {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse config file contents.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject timings that would make the probe or retries spin.
    fn validate(&self) -> Result<()> {
        let durations = [
            ("remote.timeout_secs", self.remote.timeout_secs),
            ("sync.probe_interval_ms", self.sync.probe_interval_ms),
            ("sync.initial_delay_ms", self.sync.initial_delay_ms),
            ("sync.max_delay_secs", self.sync.max_delay_secs),
        ];
        for (name, value) in durations {
            if value == 0 {
                return Err(Error::Config(format!("{} must be greater than zero", name)));
            }
        }
        Ok(())
    }

    /// Load the config for this invocation.
    ///
    /// An explicit path must exist. The default file is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let Some(path) = default_config_path() else {
            return Ok(Config::default());
        };
        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(Error::Config(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Directory for local data: `--data-dir`, then `data_dir`, then
    /// `<data dir>/quill`.
    pub fn data_dir(&self, flag: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = flag {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .ok_or(Error::NoDataDir)
    }

    /// HTTP client settings, with the token taken from `QUILL_TOKEN` if set.
    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config_with_token(std::env::var(TOKEN_ENV).ok())
    }

    fn remote_config_with_token(&self, env_token: Option<String>) -> RemoteConfig {
        let token = env_token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.remote.token.clone());
        RemoteConfig {
            url: self.remote.url.clone(),
            token,
            timeout_secs: self.remote.timeout_secs,
        }
    }

    /// Engine options. The retry delays are shared with the probe.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            sync_on_mutation: self.sync.sync_on_mutation,
            retry_initial: Duration::from_millis(self.sync.initial_delay_ms),
            retry_max: Duration::from_secs(self.sync.max_delay_secs),
        }
    }

    /// Reachability probe timing for `watch`.
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            interval: Duration::from_millis(self.sync.probe_interval_ms),
            initial_delay: Duration::from_millis(self.sync.initial_delay_ms),
            max_delay: Duration::from_secs(self.sync.max_delay_secs),
            ..ProbeConfig::default()
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
