//! User-level configuration for gitcollab
//!
//! Supports loading the GitHub token from:
//! - Environment variables
//! - ~/.config/gitcollab/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fallback variable checked after the configured one
pub const FALLBACK_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub github: UserGitHubConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserGitHubConfig {
    /// Personal access token
    pub token: Option<String>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. `token_env` environment variable (highest)
    /// 2. `GITHUB_TOKEN`
    /// 3. User config (~/.config/gitcollab/config.toml)
    pub fn load(token_env: &str) -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(user_config) = Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|content| toml::from_str::<UserConfig>(&content).ok())
        {
            config.merge(user_config);
        }

        let from_env = [token_env, FALLBACK_TOKEN_ENV]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()));
        if let Some(token) = from_env {
            config.github.token = Some(token);
        }

        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gitcollab").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref()
    }

    pub fn has_token(&self) -> bool {
        self.github.token.is_some()
    }
}
