//! Configuration module
//!
//! ```toml
//! [user]
//! name = "Ada"
//! email = "ada@example.com"
//!
//! [store]
//! file_name = "conversation-knowledge.yaml"
//! versioning = "internal"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::handover::Author;
use crate::core::knowledge::VersioningPreference;

/// Directory holding local and global config
pub const CONFIG_DIR: &str = ".continuity";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// Identity written into handover frontmatter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_name")]
    pub name: String,

    #[serde(default)]
    pub email: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_user_name(),
            email: String::new(),
        }
    }
}

fn default_user_name() -> String {
    "AI".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Default knowledge base file for `init`
    #[serde(default = "default_file_name")]
    pub file_name: PathBuf,

    #[serde(default)]
    pub versioning: VersioningPreference,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            versioning: VersioningPreference::default(),
        }
    }
}

fn default_file_name() -> PathBuf {
    PathBuf::from("conversation-knowledge.yaml")
}

impl Config {
    /// Load config with priority:
    /// 1. Explicit path (`--config` / `CONTINUITY_CONFIG`)
    /// 2. Local `.continuity/config.toml` (walking up from CWD)
    /// 3. Global `~/.continuity/config.toml`
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Find local .continuity/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get global config path (~/.continuity/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        directories::UserDirs::new().map(|u| u.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Handover author from `[user]`
    pub fn author(&self) -> Author {
        Author::new(&self.user.name, &self.user.email)
    }
}
