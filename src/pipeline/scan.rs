//! Parallel repository scanning
//!
//! Each rayon worker folds its share of candidates into a private
//! [`ScanPartial`]; partials are merged pairwise at the end, so no locks
//! are taken on the hot path. Detail records keep the input order.

use crate::aggregate::{PairAggregates, RarityModel};
use crate::config::ScanConfig;
use crate::extract::extract_fetched;
use crate::filter::RepositoryFilter;
use crate::github::RepoSource;
use crate::keywords::KeywordCatalog;
use crate::models::{LangPairSummary, RepoCandidate, RepoDifficultyRecord};
use crate::scoring::DifficultyScorer;
use anyhow::Result;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

pub const DEFAULT_WORKERS: usize = 4;
pub const MAX_WORKERS: usize = 64;

/// Called after each repository with (full name, done, total)
pub type ProgressCallback = Box<dyn Fn(&str, usize, usize) + Send + Sync>;

/// Result of a scan run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// One record per accepted repository, in input order
    pub records: Vec<RepoDifficultyRecord>,
    /// One summary per pair with at least one accepted repository, in pair order
    pub summaries: Vec<LangPairSummary>,
    /// Repositories rejected by the filter
    pub skipped: usize,
    /// Repositories that could not be fetched
    pub failed: usize,
}

enum RepoOutcome {
    Scored(RepoDifficultyRecord),
    Skipped,
    Failed,
}

struct ScanPartial {
    records: Vec<RepoDifficultyRecord>,
    aggregates: PairAggregates,
    skipped: usize,
    failed: usize,
}

impl ScanPartial {
    fn new(rarity: RarityModel) -> Self {
        Self {
            records: Vec::new(),
            aggregates: PairAggregates::new(rarity),
            skipped: 0,
            failed: 0,
        }
    }

    fn absorb(&mut self, outcome: RepoOutcome) {
        match outcome {
            RepoOutcome::Scored(record) => {
                self.aggregates.accumulate(&record);
                self.records.push(record);
            }
            RepoOutcome::Skipped => self.skipped += 1,
            RepoOutcome::Failed => self.failed += 1,
        }
    }

    fn merge(mut self, other: ScanPartial) -> Self {
        self.records.extend(other.records);
        self.aggregates.merge(other.aggregates);
        self.skipped += other.skipped;
        self.failed += other.failed;
        self
    }
}

/// Scans candidate repositories against a keyword catalog
pub struct Scanner {
    catalog: KeywordCatalog,
    filter: RepositoryFilter,
    rarity: RarityModel,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Scanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            catalog: config.catalog(),
            filter: config.filter,
            rarity: config.rarity,
            workers: DEFAULT_WORKERS,
            progress_callback: None,
        }
    }

    /// Number of parallel workers, clamped to 1..=64
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, MAX_WORKERS);
        self
    }

    pub fn with_filter(mut self, filter: RepositoryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_catalog(mut self, catalog: KeywordCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn catalog(&self) -> &KeywordCatalog {
        &self.catalog
    }

    /// Fetch, filter and score every candidate, then summarize per pair.
    ///
    /// Per-repository failures are logged and counted, never propagated;
    /// the only error is failing to build the worker pool.
    pub fn scan(&self, candidates: &[RepoCandidate], source: &dyn RepoSource) -> Result<ScanReport> {
        info!(
            "Scanning {} repositories with {} workers ({} keywords)",
            candidates.len(),
            self.workers,
            self.catalog.len()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;

        let completed = AtomicUsize::new(0);
        let total = candidates.len();
        let rarity = self.rarity;

        let partial = pool.install(|| {
            candidates
                .par_iter()
                .fold(
                    || ScanPartial::new(rarity),
                    |mut acc, candidate| {
                        acc.absorb(self.scan_one(candidate, source));
                        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                        if let Some(ref callback) = self.progress_callback {
                            callback(&candidate.full_name, done, total);
                        }
                        acc
                    },
                )
                .reduce(|| ScanPartial::new(rarity), ScanPartial::merge)
        });

        // One population lookup per pair, outside the worker pool
        let summaries = partial.aggregates.finalize_with(|pair| {
            match source.total_repo_count(pair.lang1(), pair.lang2()) {
                Ok(total) => Some(total),
                Err(e) => {
                    warn!("Could not count repositories for {}: {}", pair, e);
                    None
                }
            }
        });

        info!(
            "Scanned {} repositories: {} analyzed, {} skipped, {} failed, {} pairs",
            total,
            partial.records.len(),
            partial.skipped,
            partial.failed,
            summaries.len()
        );

        Ok(ScanReport {
            records: partial.records,
            summaries,
            skipped: partial.skipped,
            failed: partial.failed,
        })
    }

    fn scan_one(&self, candidate: &RepoCandidate, source: &dyn RepoSource) -> RepoOutcome {
        let fetched = match source.fetch_repo(&candidate.full_name) {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Skipping {}: {}", candidate.full_name, e);
                return RepoOutcome::Failed;
            }
        };

        let decision = self
            .filter
            .evaluate_counts(fetched.pull_requests.len(), fetched.issues.len());
        if !decision.is_accepted() {
            debug!("Filtered out {}: {}", candidate.full_name, decision);
            return RepoOutcome::Skipped;
        }

        let blobs = extract_fetched(&fetched);
        let record = DifficultyScorer::new(&self.catalog).score(
            &candidate.pair(),
            &candidate.full_name,
            &blobs,
        );
        debug!(
            "{}: {} artifacts, {} keyword hits",
            record.full_name, record.artifacts_analyzed, record.keywords_found
        );
        RepoOutcome::Scored(record)
    }
}

/// Scan with the thresholds and catalog from `config`
pub fn scan(
    candidates: &[RepoCandidate],
    config: &ScanConfig,
    source: &dyn RepoSource,
    workers: usize,
) -> Result<ScanReport> {
    Scanner::new(config).with_workers(workers).scan(candidates, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{GitHubError, GitHubResult};
    use crate::models::{ArtifactText, RepoFetchResult};
    use std::collections::HashMap;

    struct MemorySource {
        repos: HashMap<String, RepoFetchResult>,
        totals: HashMap<(String, String), u64>,
    }

    impl RepoSource for MemorySource {
        fn fetch_repo(&self, full_name: &str) -> GitHubResult<RepoFetchResult> {
            self.repos
                .get(full_name)
                .cloned()
                .ok_or_else(|| GitHubError::Transport {
                    url: full_name.to_string(),
                    message: "connection reset".to_string(),
                })
        }

        fn total_repo_count(&self, lang1: &str, lang2: &str) -> GitHubResult<u64> {
            self.totals
                .get(&(lang1.to_string(), lang2.to_string()))
                .copied()
                .ok_or_else(|| GitHubError::RateLimited {
                    url: "search".to_string(),
                })
        }
    }

    fn fetched(name: &str, prs: usize, issues: usize, body: &str) -> RepoFetchResult {
        RepoFetchResult {
            full_name: name.to_string(),
            readme: None,
            pull_requests: (0..prs).map(|_| ArtifactText::body(body)).collect(),
            issues: (0..issues).map(|_| ArtifactText::body("")).collect(),
        }
    }

    fn candidate(name: &str, a: &str, b: &str) -> RepoCandidate {
        RepoCandidate {
            full_name: name.to_string(),
            lang1: a.to_string(),
            lang2: b.to_string(),
        }
    }

    fn source() -> MemorySource {
        let mut repos = HashMap::new();
        for r in [
            fetched("a/one", 5, 5, "JNI wrapper"),
            fetched("a/two", 6, 5, "plain"),
            fetched("a/small", 4, 6, "JNI"),
            fetched("b/nif", 5, 5, "NIF"),
        ] {
            repos.insert(r.full_name.clone(), r);
        }
        let mut totals = HashMap::new();
        totals.insert(("C".to_string(), "Java".to_string()), 100);
        MemorySource { repos, totals }
    }

    #[test]
    fn test_scan_filters_and_aggregates() {
        let candidates = [
            candidate("a/one", "Java", "C"),
            candidate("a/small", "C", "Java"),
            candidate("a/missing", "C", "Java"),
            candidate("a/two", "C", "Java"),
            candidate("b/nif", "C", "Erlang"),
        ];
        let report = scan(&candidates, &ScanConfig::default(), &source(), 3).expect("scan");

        let names: Vec<_> = report.records.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["a/one", "a/two", "b/nif"]);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);

        assert_eq!(report.summaries.len(), 2);
        let c_erlang = &report.summaries[0];
        assert_eq!((c_erlang.lang1.as_str(), c_erlang.lang2.as_str()), ("C", "Erlang"));
        assert_eq!(c_erlang.true_total_available, None);
        assert_eq!(c_erlang.rarity_score, None);

        let c_java = &report.summaries[1];
        assert_eq!(c_java.total_repos, 2);
        assert_eq!(c_java.repos_with_difficulty, 1);
        assert_eq!(c_java.true_total_available, Some(100));
        assert_eq!(c_java.rarity_score, Some(0.98));
    }

    #[test]
    fn test_scan_is_independent_of_worker_count() {
        let candidates: Vec<_> = ["a/one", "a/two", "a/small", "b/nif"]
            .iter()
            .map(|n| candidate(n, "C", "Java"))
            .collect();
        let single = scan(&candidates, &ScanConfig::default(), &source(), 1).expect("scan");
        let many = scan(&candidates, &ScanConfig::default(), &source(), 8).expect("scan");
        assert_eq!(single, many);
    }

    #[test]
    fn test_scan_reports_progress() {
        let seen = std::sync::Arc::new(AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&seen);
        let scanner = Scanner::new(&ScanConfig::default()).with_progress(Box::new(
            move |_: &str, _: usize, total: usize| {
                assert_eq!(total, 2);
                counter.fetch_add(1, Ordering::SeqCst);
            },
        ));
        let candidates = [candidate("a/one", "C", "Java"), candidate("a/two", "C", "Java")];
        scanner.scan(&candidates, &source()).expect("scan");
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_scan_lower_thresholds() {
        let scanner = Scanner::new(&ScanConfig::default()).with_filter(RepositoryFilter::new(0, 0));
        let report = scanner
            .scan(&[candidate("a/small", "C", "Java")], &source())
            .expect("scan");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_workers_clamped() {
        let scanner = Scanner::new(&ScanConfig::default()).with_workers(0);
        assert_eq!(scanner.workers, 1);
        let scanner = Scanner::new(&ScanConfig::default()).with_workers(1000);
        assert_eq!(scanner.workers, MAX_WORKERS);
    }
}
