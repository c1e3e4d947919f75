//! Configuration module for gitcollab
//!
//! This module handles:
//! - Scan configuration (gitcollab.toml)
//! - Keyword catalog overrides
//! - Filter and rarity tunables
//! - GitHub token lookup

mod scan_config;
mod user_config;

pub use scan_config::{
    load_config_file, load_scan_config, DiscoveryConfig, GitHubConfig, KeywordSpec,
    KeywordsConfig, ScanConfig, CONFIG_FILE_NAME, DEFAULT_LANGUAGES, DEFAULT_TOKEN_ENV,
    EXAMPLE_CONFIG, JSON_CONFIG_FILE_NAME,
};
pub use user_config::{UserConfig, UserGitHubConfig, FALLBACK_TOKEN_ENV};
