//! Core data models for gitcollab
//!
//! These models flow between the collector, the scanning core and the
//! reporters. Records are built once and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Kind of text artifact attached to a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Readme,
    PullRequest,
    Issue,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Readme => write!(f, "readme"),
            ArtifactKind::PullRequest => write!(f, "pull_request"),
            ArtifactKind::Issue => write!(f, "issue"),
        }
    }
}

/// One unit of text to scan, tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactBlob {
    pub kind: ArtifactKind,
    pub text: String,
}

/// Title and body of a pull request or issue, as returned by the collector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactText {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl ArtifactText {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }

    /// Artifact with only a body
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: Some(body.into()),
        }
    }
}

/// Everything the collector managed to fetch for one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoFetchResult {
    pub full_name: String,
    /// `None` when the README is missing or could not be fetched
    pub readme: Option<String>,
    pub pull_requests: Vec<ArtifactText>,
    pub issues: Vec<ArtifactText>,
}

/// Unordered pair of language names, stored in canonical order.
///
/// Canonical order compares the case-folded names first and the raw names
/// second, so `("Rust", "Go")` and `("Go", "Rust")` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LangPairFields")]
pub struct LangPair {
    lang1: String,
    lang2: String,
}

/// Deserialized names, reordered through [`LangPair::new`]
#[derive(Deserialize)]
struct LangPairFields {
    lang1: String,
    lang2: String,
}

impl From<LangPairFields> for LangPair {
    fn from(fields: LangPairFields) -> Self {
        LangPair::new(fields.lang1, fields.lang2)
    }
}

impl LangPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if canonical_cmp(&a, &b) == Ordering::Greater {
            Self { lang1: b, lang2: a }
        } else {
            Self { lang1: a, lang2: b }
        }
    }

    pub fn lang1(&self) -> &str {
        &self.lang1
    }

    pub fn lang2(&self) -> &str {
        &self.lang2
    }
}

fn canonical_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl Ord for LangPair {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(&self.lang1, &other.lang1)
            .then_with(|| canonical_cmp(&self.lang2, &other.lang2))
    }
}

impl PartialOrd for LangPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LangPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lang1, self.lang2)
    }
}

/// A row of the collaboration-score table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCandidate {
    pub lang1: String,
    pub lang2: String,
    pub collaboration_score: f64,
}

/// A repository found to use both languages of a pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCandidate {
    pub full_name: String,
    pub lang1: String,
    pub lang2: String,
}

impl RepoCandidate {
    pub fn pair(&self) -> LangPair {
        LangPair::new(self.lang1.clone(), self.lang2.clone())
    }
}

/// Difficulty measurements for one analyzed repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoDifficultyRecord {
    pub lang1: String,
    pub lang2: String,
    pub full_name: String,
    pub artifacts_analyzed: usize,
    pub keywords_found: usize,
    pub difficulty_density: f64,
    pub has_difficulty: bool,
    /// Unique keyword literals found, in catalog order
    pub keywords_detected: Vec<String>,
    /// Occurrences per detected keyword, same order as `keywords_detected`
    #[serde(default)]
    pub keyword_counts: Vec<usize>,
    #[serde(default)]
    pub pull_requests: usize,
    #[serde(default)]
    pub issues: usize,
}

impl RepoDifficultyRecord {
    pub fn pair(&self) -> LangPair {
        LangPair::new(self.lang1.clone(), self.lang2.clone())
    }
}

/// Aggregate difficulty statistics for one language pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangPairSummary {
    pub lang1: String,
    pub lang2: String,
    pub total_repos: usize,
    pub repos_with_difficulty: usize,
    pub avg_difficulty_density: f64,
    pub avg_artifacts_analyzed: f64,
    pub difficulty_rate: f64,
    /// Number of repositories with this pair on the platform, if known
    pub true_total_available: Option<u64>,
    /// `None` when the population size is unknown or zero
    pub rarity_score: Option<f64>,
}
