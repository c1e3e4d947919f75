//! Scan configuration support
//!
//! Loads configuration from `gitcollab.toml` or `.gitcollabrc.json` in the
//! working directory, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # gitcollab.toml
//!
//! [filter]
//! min_pull_requests = 5
//! min_issues = 5
//!
//! [keywords]
//! replace_defaults = false
//! extra = ["wasm-bindgen", { literal = "uniffi", label = "UniFFI" }]
//! disabled = ["stub", "nan"]
//!
//! [rarity]
//! population_cap = 300
//!
//! [github]
//! max_pr_pages = 50
//! max_issue_pages = 10
//! request_delay_ms = 500
//!
//! [discovery]
//! min_stars = 3
//! max_repos_per_language = 150
//! collaboration_threshold = 0.4
//! languages = { Haskell = "Haskell", "C" = "C" }
//! ```

use crate::aggregate::RarityModel;
use crate::filter::RepositoryFilter;
use crate::keywords::{KeywordCatalog, KeywordEntry, MatchMode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "gitcollab.toml";
pub const JSON_CONFIG_FILE_NAME: &str = ".gitcollabrc.json";

/// Environment variable holding the GitHub token
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN_GITCOLLABCOLLECTOR";

/// Table language names mapped to GitHub linguist names
pub const DEFAULT_LANGUAGES: &[(&str, &str)] = &[
    ("Scheme", "Scheme"),
    ("ML", "ML"),
    ("Prolog", "Prolog"),
    ("Curry", "Curry"),
    ("Haskell", "Haskell"),
    ("OCaml", "OCaml"),
    ("Erlang", "Erlang"),
    ("C", "C"),
    ("Occam", "Occam"),
    ("Java", "Java"),
    ("CLU", "CLU"),
    ("E", "E"),
];

/// Full configuration for a scan run
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScanConfig {
    /// Minimum-signal thresholds
    #[serde(default)]
    pub filter: RepositoryFilter,

    /// Keyword catalog customization
    #[serde(default)]
    pub keywords: KeywordsConfig,

    /// Rarity normalization
    #[serde(default)]
    pub rarity: RarityModel,

    /// GitHub API access
    #[serde(default)]
    pub github: GitHubConfig,

    /// Repository discovery
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Keyword catalog overrides
#[derive(Debug, Clone, Deserialize, Default)]
pub struct KeywordsConfig {
    /// Start from an empty catalog instead of the built-in vocabulary
    #[serde(default)]
    pub replace_defaults: bool,

    /// Keywords appended after the base catalog
    #[serde(default)]
    pub extra: Vec<KeywordSpec>,

    /// Literals removed from the final catalog
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// A keyword given either as a bare literal or as a table
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum KeywordSpec {
    Literal(String),
    Detailed {
        literal: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        mode: MatchMode,
    },
}

impl KeywordSpec {
    pub fn to_entry(&self) -> KeywordEntry {
        match self {
            KeywordSpec::Literal(literal) => KeywordEntry::new(literal.clone()),
            KeywordSpec::Detailed {
                literal,
                label,
                mode,
            } => {
                let entry = KeywordEntry::new(literal.clone()).with_mode(*mode);
                match label {
                    Some(label) => entry.with_label(label.clone()),
                    None => entry,
                }
            }
        }
    }
}

impl KeywordsConfig {
    /// Build the effective catalog
    pub fn build_catalog(&self) -> KeywordCatalog {
        let mut catalog = if self.replace_defaults {
            KeywordCatalog::empty()
        } else {
            KeywordCatalog::with_defaults()
        };
        for spec in &self.extra {
            if !catalog.insert(spec.to_entry()) {
                debug!("Skipping duplicate or blank keyword {:?}", spec);
            }
        }
        if !self.disabled.is_empty() {
            catalog.remove_all(&self.disabled);
        }
        catalog
    }
}

/// GitHub REST API settings
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// Environment variable to read the token from
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// API base URL (override for GitHub Enterprise)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Items per page (GitHub maximum is 100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Page limit when listing pull requests
    #[serde(default = "default_max_pr_pages")]
    pub max_pr_pages: u32,

    /// Page limit when listing issues
    #[serde(default = "default_max_issue_pages")]
    pub max_issue_pages: u32,

    /// Pause between repositories, in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            api_url: default_api_url(),
            per_page: default_per_page(),
            max_pr_pages: default_max_pr_pages(),
            max_issue_pages: default_max_issue_pages(),
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}
fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_per_page() -> u32 {
    100
}
fn default_max_pr_pages() -> u32 {
    50
}
fn default_max_issue_pages() -> u32 {
    10
}
fn default_request_delay_ms() -> u64 {
    500
}
fn default_timeout_secs() -> u64 {
    30
}

/// Repository discovery settings
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Minimum stars for a repository to be considered
    #[serde(default = "default_min_stars")]
    pub min_stars: u32,

    /// Repositories fetched per language search
    #[serde(default = "default_max_repos_per_language")]
    pub max_repos_per_language: usize,

    /// Pairs with a collaboration score above this are skipped
    #[serde(default = "default_collaboration_threshold")]
    pub collaboration_threshold: f64,

    /// Table language name -> GitHub language name
    #[serde(default = "default_languages")]
    pub languages: BTreeMap<String, String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            min_stars: default_min_stars(),
            max_repos_per_language: default_max_repos_per_language(),
            collaboration_threshold: default_collaboration_threshold(),
            languages: default_languages(),
        }
    }
}

fn default_min_stars() -> u32 {
    3
}
fn default_max_repos_per_language() -> usize {
    150
}
fn default_collaboration_threshold() -> f64 {
    0.4
}
fn default_languages() -> BTreeMap<String, String> {
    DEFAULT_LANGUAGES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl DiscoveryConfig {
    /// GitHub name for a table language name, if it is tracked
    pub fn github_language(&self, name: &str) -> Option<&str> {
        self.languages.get(name.trim()).map(String::as_str)
    }
}

impl ScanConfig {
    /// Effective keyword catalog
    pub fn catalog(&self) -> KeywordCatalog {
        self.keywords.build_catalog()
    }
}

/// Load configuration from a directory.
///
/// Searches for `gitcollab.toml`, then `.gitcollabrc.json`. Returns the
/// default configuration if neither exists or both fail to parse.
pub fn load_scan_config(dir: &Path) -> ScanConfig {
    let toml_path = dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(JSON_CONFIG_FILE_NAME);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    ScanConfig::default()
}

/// Load an explicitly named config file; the format follows the extension.
pub fn load_config_file(path: &Path) -> anyhow::Result<ScanConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json_config(path),
        _ => load_toml_config(path),
    }
}

fn load_toml_config(path: &Path) -> anyhow::Result<ScanConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ScanConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ScanConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ScanConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Example file written by `gitcollab init`
pub const EXAMPLE_CONFIG: &str = r#"# gitcollab configuration

[filter]
# Repositories below either threshold are skipped
min_pull_requests = 5
min_issues = 5

[keywords]
# Set to true to use only the keywords listed in `extra`
replace_defaults = false
# extra = ["wasm-bindgen", { literal = "uniffi", label = "UniFFI", mode = "token" }]
# disabled = ["stub"]

[rarity]
# Upper bound on the population a pair is compared against (0 = no cap)
population_cap = 300

[github]
# Token is read from this environment variable (falls back to GITHUB_TOKEN)
token_env = "GITHUB_TOKEN_GITCOLLABCOLLECTOR"
per_page = 100
max_pr_pages = 50
max_issue_pages = 10
request_delay_ms = 500

[discovery]
min_stars = 3
max_repos_per_language = 150
collaboration_threshold = 0.4
"#;

#[cfg(test)]
mod tests;
