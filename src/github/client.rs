//! GitHub REST API client
//!
//! Uses ureq (sync HTTP), no async runtime. Pagination stops at the
//! first empty or short page, at the configured page limit, or at the first
//! HTTP error (keeping what was collected so far). Rate limiting and
//! transport failures abort the current repository instead.

use super::{GitHubError, GitHubResult, LanguageSearch, RepoSource};
use crate::config::{DiscoveryConfig, GitHubConfig, ScanConfig, UserConfig};
use crate::models::{ArtifactText, RepoFetchResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// GitHub client over sync ureq HTTP
pub struct GitHubClient {
    github: GitHubConfig,
    min_stars: u32,
    max_repos_per_language: usize,
    token: String,
    agent: ureq::Agent,
}

fn make_agent(timeout_secs: u64) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // Status codes are mapped to GitHubError below
        .timeout_global(Some(Duration::from_secs(timeout_secs)))
        .build()
        .new_agent()
}

impl GitHubClient {
    pub fn new(github: GitHubConfig, discovery: &DiscoveryConfig, token: impl Into<String>) -> Self {
        let agent = make_agent(github.timeout_secs);
        Self {
            github,
            min_stars: discovery.min_stars,
            max_repos_per_language: discovery.max_repos_per_language,
            token: token.into(),
            agent,
        }
    }

    /// Build a client from scan config, reading the token from the
    /// environment or the user config file.
    pub fn from_config(config: &ScanConfig) -> GitHubResult<Self> {
        let user = UserConfig::load(&config.github.token_env)
            .map_err(|e| GitHubError::Config(e.to_string()))?;
        let token = user
            .github_token()
            .ok_or_else(|| GitHubError::MissingToken {
                env_var: config.github.token_env.clone(),
            })?
            .to_string();
        Ok(Self::new(config.github.clone(), &config.discovery, token))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.github.api_url.trim_end_matches('/'), path)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> GitHubResult<T> {
        let mut req = self
            .agent
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", &format!("token {}", self.token));
        for (key, value) in query {
            req = req.query(*key, value);
        }

        let response = req.call().map_err(|e| GitHubError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let headers = response.headers();
            let remaining = headers
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let retry_after = headers.contains_key("retry-after");
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(status_error(
                url,
                status,
                remaining.as_deref(),
                retry_after,
                message,
            ));
        }

        response
            .into_body()
            .read_json()
            .map_err(|e| GitHubError::Parse {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    /// List issues or pull requests page by page
    fn fetch_paginated(
        &self,
        full_name: &str,
        endpoint: &str,
        max_pages: u32,
        skip_pull_requests: bool,
    ) -> GitHubResult<Vec<ArtifactText>> {
        let url = self.url(&format!("repos/{}/{}", full_name, endpoint));
        let per_page = self.github.per_page.clamp(1, 100);
        let mut collected = Vec::new();

        for page in 1..=max_pages {
            let query = [
                ("state", "all".to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ];
            let items: Vec<RawArtifact> = match self.get_json(&url, &query) {
                Ok(items) => items,
                Err(e @ (GitHubError::RateLimited { .. } | GitHubError::Transport { .. })) => {
                    return Err(e)
                }
                Err(e) => {
                    error!("Error fetching {} for {}, page {}: {}", endpoint, full_name, page, e);
                    break;
                }
            };

            if items.is_empty() {
                debug!("No more {} for {} at page {}", endpoint, full_name, page);
                break;
            }
            let short_page = items.len() < per_page as usize;
            collected.extend(keep_artifacts(items, skip_pull_requests));
            if short_page {
                debug!("Fetched last page ({}) of {} for {}", page, endpoint, full_name);
                break;
            }
        }

        info!("Fetched {} {} for {}", collected.len(), endpoint, full_name);
        Ok(collected)
    }

    pub fn fetch_pull_requests(&self, full_name: &str) -> GitHubResult<Vec<ArtifactText>> {
        self.fetch_paginated(full_name, "pulls", self.github.max_pr_pages, false)
    }

    /// Issues only; the issues endpoint also returns pull requests
    pub fn fetch_issues(&self, full_name: &str) -> GitHubResult<Vec<ArtifactText>> {
        self.fetch_paginated(full_name, "issues", self.github.max_issue_pages, true)
    }

    /// Decoded README, or `None` when missing or undecodable
    pub fn fetch_readme(&self, full_name: &str) -> Option<String> {
        let url = self.url(&format!("repos/{}/readme", full_name));
        match self.get_json::<ReadmePayload>(&url, &[]) {
            Ok(payload) => {
                let decoded = decode_readme(&payload);
                if decoded.is_none() {
                    warn!("Failed to decode README for {}", full_name);
                }
                decoded
            }
            Err(e) => {
                warn!("Error fetching README for {}: {}", full_name, e);
                None
            }
        }
    }

    fn throttle(&self) {
        if self.github.request_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.github.request_delay_ms));
        }
    }
}

impl RepoSource for GitHubClient {
    fn fetch_repo(&self, full_name: &str) -> GitHubResult<RepoFetchResult> {
        self.throttle();
        let pull_requests = self.fetch_pull_requests(full_name)?;
        let issues = self.fetch_issues(full_name)?;
        let readme = self.fetch_readme(full_name);
        Ok(RepoFetchResult {
            full_name: full_name.to_string(),
            readme,
            pull_requests,
            issues,
        })
    }

    fn total_repo_count(&self, lang1: &str, lang2: &str) -> GitHubResult<u64> {
        let url = self.url("search/repositories");
        let query = [("q", pair_query(lang1, lang2, self.min_stars))];
        let result: SearchResponse = self.get_json(&url, &query)?;
        Ok(result.total_count)
    }
}

impl LanguageSearch for GitHubClient {
    fn search_repos(&self, language: &str) -> GitHubResult<Vec<String>> {
        let url = self.url("search/repositories");
        let wanted = self.max_repos_per_language;
        let per_page = wanted.clamp(1, 100);
        let mut names = Vec::new();

        let mut page = 1;
        while names.len() < wanted {
            let query = [
                ("q", language_query(language, self.min_stars)),
                ("sort", "updated".to_string()),
                ("order", "desc".to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ];
            let result: SearchResponse = self.get_json(&url, &query)?;
            let got = result.items.len();
            names.extend(result.items.into_iter().map(|item| item.full_name));
            if got < per_page {
                break;
            }
            page += 1;
        }

        names.truncate(wanted);
        debug!("Search for {} returned {} repositories", language, names.len());
        Ok(names)
    }

    fn repo_languages(&self, full_name: &str) -> GitHubResult<Vec<String>> {
        self.throttle();
        let url = self.url(&format!("repos/{}/languages", full_name));
        let languages: BTreeMap<String, u64> = self.get_json(&url, &[])?;
        Ok(languages.into_keys().collect())
    }
}

/// Map an error response to a typed error.
///
/// 429 is always a rate limit. A 403 is one when the primary quota is
/// exhausted, when a secondary limit sends `retry-after`, or when the body
/// says so; any other 403 is a plain permission error.
fn status_error(
    url: &str,
    status: u16,
    remaining: Option<&str>,
    retry_after: bool,
    message: String,
) -> GitHubError {
    let rate_limited = status == 429
        || (status == 403
            && (remaining.is_some_and(|v| v.trim() == "0")
                || retry_after
                || message.to_ascii_lowercase().contains("rate limit")));
    if rate_limited {
        GitHubError::RateLimited {
            url: url.to_string(),
        }
    } else {
        GitHubError::Status {
            status,
            url: url.to_string(),
            message,
        }
    }
}

/// Issue or pull request as returned by the list endpoints
#[derive(Debug, Deserialize)]
struct RawArtifact {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    /// Present on issues-endpoint items that are really pull requests
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

fn keep_artifacts(items: Vec<RawArtifact>, skip_pull_requests: bool) -> Vec<ArtifactText> {
    items
        .into_iter()
        .filter(|item| !(skip_pull_requests && item.pull_request.is_some()))
        .map(|item| ArtifactText {
            title: item.title,
            body: item.body,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ReadmePayload {
    #[serde(default)]
    content: String,
    #[serde(default = "default_encoding")]
    encoding: String,
}

fn default_encoding() -> String {
    "base64".to_string()
}

fn decode_readme(payload: &ReadmePayload) -> Option<String> {
    if payload.encoding != "base64" {
        return None;
    }
    // GitHub wraps base64 content at 60 columns
    let compact: String = payload
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    full_name: String,
}

fn pair_query(lang1: &str, lang2: &str, min_stars: u32) -> String {
    format!("language:{} language:{} stars:>={}", lang1, lang2, min_stars)
}

fn language_query(language: &str, min_stars: u32) -> String {
    format!("language:{} stars:>={}", language, min_stars)
}
