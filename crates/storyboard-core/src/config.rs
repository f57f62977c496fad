use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{BoardError, BoardResult};

pub const REMOTE_URL_ENV: &str = "STORYBOARD_REMOTE_URL";
pub const REMOTE_KEY_ENV: &str = "STORYBOARD_REMOTE_KEY";

const DEFAULT_REMOTE_TABLE: &str = "cards";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_METADATA_ENDPOINT: &str = "https://www.canva.com/_oembed";

/// How cards are ordered inside a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSort {
    /// Global collection order only.
    #[default]
    Position,
    /// Priority rank first, collection order for ties.
    Priority,
}

/// What happens when a remote load finishes after local state is already shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Union both sides by card id; the newer `updated_at` wins.
    #[default]
    LastWriteWins,
    /// A non-empty remote result replaces local state entirely.
    RemoteWins,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_remote_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    #[serde(default = "default_metadata_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: default_metadata_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MetadataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub merge_policy: MergePolicy,
    #[serde(default)]
    pub pull_on_start: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub column_sort: ColumnSort,
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

fn default_remote_table() -> String {
    DEFAULT_REMOTE_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_metadata_endpoint() -> String {
    DEFAULT_METADATA_ENDPOINT.to_string()
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/storyboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("storyboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("storyboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Directory holding the local board file when no explicit path is given.
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|data| data.join("storyboard"))
    }

    /// Load the user config, falling back to defaults when it is absent or
    /// unreadable, then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| match Self::from_file(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn from_file(path: &Path) -> BoardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> BoardResult<Self> {
        toml::from_str(content).map_err(|e| BoardError::Config(e.to_string()))
    }

    /// Environment variables take precedence over the config file. A URL and
    /// key in the environment are enough to enable the remote store.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(REMOTE_URL_ENV).filter(|v| !v.trim().is_empty());
        let key = lookup(REMOTE_KEY_ENV).filter(|v| !v.trim().is_empty());

        if let Some(remote) = self.remote.as_mut() {
            if let Some(url) = url {
                remote.url = url;
            }
            if let Some(key) = key {
                remote.api_key = key;
            }
        } else if let (Some(url), Some(api_key)) = (url, key) {
            self.remote = Some(RemoteConfig {
                url,
                api_key,
                table: default_remote_table(),
                timeout_secs: default_timeout_secs(),
            });
        }
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote
            .as_ref()
            .is_some_and(|r| !r.url.trim().is_empty() && !r.api_key.trim().is_empty())
    }
}
