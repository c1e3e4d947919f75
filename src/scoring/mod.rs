//! Difficulty scoring
//!
//! Turns the extracted blobs of one repository into a
//! [`RepoDifficultyRecord`]. Pure: no I/O, no retries, order-independent.

use crate::keywords::KeywordCatalog;
use crate::models::{ArtifactBlob, ArtifactKind, LangPair, RepoDifficultyRecord};

/// Keyword-density scorer over a fixed catalog
pub struct DifficultyScorer<'a> {
    catalog: &'a KeywordCatalog,
}

impl<'a> DifficultyScorer<'a> {
    pub fn new(catalog: &'a KeywordCatalog) -> Self {
        Self { catalog }
    }

    /// Score one repository.
    ///
    /// Zero blobs still yields a record (all zeros, no difficulty); the
    /// repository filter decides whether it is aggregated.
    pub fn score(
        &self,
        pair: &LangPair,
        full_name: &str,
        blobs: &[ArtifactBlob],
    ) -> RepoDifficultyRecord {
        let mut per_keyword = vec![0usize; self.catalog.len()];
        let mut pull_requests = 0;
        let mut issues = 0;

        for blob in blobs {
            match blob.kind {
                ArtifactKind::PullRequest => pull_requests += 1,
                ArtifactKind::Issue => issues += 1,
                ArtifactKind::Readme => {}
            }
            for (idx, n) in self.catalog.matches(&blob.text).iter() {
                per_keyword[idx] += n;
            }
        }

        let mut keywords_detected = Vec::new();
        let mut keyword_counts = Vec::new();
        for (idx, &n) in per_keyword.iter().enumerate() {
            if n == 0 {
                continue;
            }
            if let Some(entry) = self.catalog.get(idx) {
                keywords_detected.push(entry.literal.clone());
                keyword_counts.push(n);
            }
        }

        let artifacts_analyzed = blobs.len();
        let keywords_found: usize = keyword_counts.iter().sum();

        RepoDifficultyRecord {
            lang1: pair.lang1().to_string(),
            lang2: pair.lang2().to_string(),
            full_name: full_name.to_string(),
            artifacts_analyzed,
            keywords_found,
            difficulty_density: density(keywords_found, artifacts_analyzed),
            has_difficulty: keywords_found > 0,
            keywords_detected,
            keyword_counts,
            pull_requests,
            issues,
        }
    }
}

/// Occurrences per artifact; 0 when nothing was analyzed
pub fn density(keywords_found: usize, artifacts_analyzed: usize) -> f64 {
    if artifacts_analyzed == 0 {
        0.0
    } else {
        keywords_found as f64 / artifacts_analyzed as f64
    }
}
