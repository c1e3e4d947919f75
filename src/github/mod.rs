//! GitHub collection
//!
//! Everything that talks to the network lives here. The scanning core only
//! sees [`RepoFetchResult`]s; the pipeline only sees the [`RepoSource`] and
//! [`LanguageSearch`] traits, so tests can substitute in-memory sources.
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN_GITCOLLABCOLLECTOR`: token (name configurable)
//! - `GITHUB_TOKEN`: fallback token

mod client;

pub use client::GitHubClient;

use crate::models::RepoFetchResult;
use thiserror::Error;

/// Errors that can occur while talking to GitHub
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Missing GitHub token: set {env_var} (or GITHUB_TOKEN), or add [github] token to the user config")]
    MissingToken { env_var: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("GitHub API error: {status} for {url} - {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    #[error("GitHub rate limit exceeded at {url}")]
    RateLimited { url: String },

    #[error("Failed to parse GitHub response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type GitHubResult<T> = Result<T, GitHubError>;

/// Source of per-repository artifacts and per-pair population counts
pub trait RepoSource: Sync {
    /// Fetch README, pull requests and issues for one repository
    fn fetch_repo(&self, full_name: &str) -> GitHubResult<RepoFetchResult>;

    /// Number of repositories on the platform using both languages
    fn total_repo_count(&self, lang1: &str, lang2: &str) -> GitHubResult<u64>;
}

/// Repository search used by discovery
pub trait LanguageSearch {
    /// Repository full names using `language`, most recently updated first
    fn search_repos(&self, language: &str) -> GitHubResult<Vec<String>>;

    /// Languages GitHub reports for a repository
    fn repo_languages(&self, full_name: &str) -> GitHubResult<Vec<String>>;
}
