//! Language-pair aggregation
//!
//! One [`PairAggregator`] per unordered language pair folds accepted
//! repository records into running sums. [`PairAggregates`] is the explicit
//! pair-keyed map the orchestrator owns; partial maps built by separate
//! workers merge with a field-wise sum.

mod rarity;

pub use rarity::{RarityModel, DEFAULT_POPULATION_CAP};

use crate::models::{LangPair, LangPairSummary, RepoDifficultyRecord};
use std::collections::BTreeMap;

/// Running sums for one language pair.
///
/// Not synchronized; give each worker its own instance and [`merge`](Self::merge).
#[derive(Debug, Clone, PartialEq)]
pub struct PairAggregator {
    pair: LangPair,
    rarity: RarityModel,
    total_repos: usize,
    repos_with_difficulty: usize,
    density_sum: f64,
    artifacts_sum: u64,
}

impl PairAggregator {
    pub fn new(pair: LangPair) -> Self {
        Self {
            pair,
            rarity: RarityModel::default(),
            total_repos: 0,
            repos_with_difficulty: 0,
            density_sum: 0.0,
            artifacts_sum: 0,
        }
    }

    pub fn with_rarity(mut self, rarity: RarityModel) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn pair(&self) -> &LangPair {
        &self.pair
    }

    pub fn total_repos(&self) -> usize {
        self.total_repos
    }

    /// Fold in one record that passed the repository filter
    pub fn accumulate(&mut self, record: &RepoDifficultyRecord) {
        self.total_repos += 1;
        if record.has_difficulty {
            self.repos_with_difficulty += 1;
        }
        self.density_sum += record.difficulty_density;
        self.artifacts_sum += record.artifacts_analyzed as u64;
    }

    /// Field-wise sum with another partial aggregate of the same pair
    pub fn merge(&mut self, other: &PairAggregator) {
        debug_assert_eq!(self.pair, other.pair, "merging different pairs");
        self.total_repos += other.total_repos;
        self.repos_with_difficulty += other.repos_with_difficulty;
        self.density_sum += other.density_sum;
        self.artifacts_sum += other.artifacts_sum;
    }

    /// Build the summary. `None` when no record was accumulated; a pair
    /// without qualifying repositories produces no row.
    pub fn finalize(&self, true_total_available: Option<u64>) -> Option<LangPairSummary> {
        if self.total_repos == 0 {
            return None;
        }
        let n = self.total_repos as f64;
        Some(LangPairSummary {
            lang1: self.pair.lang1().to_string(),
            lang2: self.pair.lang2().to_string(),
            total_repos: self.total_repos,
            repos_with_difficulty: self.repos_with_difficulty,
            avg_difficulty_density: self.density_sum / n,
            avg_artifacts_analyzed: self.artifacts_sum as f64 / n,
            difficulty_rate: self.repos_with_difficulty as f64 / n,
            true_total_available,
            rarity_score: self.rarity.score(self.total_repos, true_total_available),
        })
    }
}

/// Aggregators keyed by canonical language pair, in pair order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairAggregates {
    rarity: RarityModel,
    pairs: BTreeMap<LangPair, PairAggregator>,
}

impl PairAggregates {
    pub fn new(rarity: RarityModel) -> Self {
        Self {
            rarity,
            pairs: BTreeMap::new(),
        }
    }

    /// Fold a record into the aggregator for its pair
    pub fn accumulate(&mut self, record: &RepoDifficultyRecord) {
        let pair = record.pair();
        let rarity = self.rarity;
        self.pairs
            .entry(pair.clone())
            .or_insert_with(|| PairAggregator::new(pair).with_rarity(rarity))
            .accumulate(record);
    }

    /// Absorb another partial map (fan-in)
    pub fn merge(&mut self, other: PairAggregates) {
        for (pair, agg) in other.pairs {
            match self.pairs.get_mut(&pair) {
                Some(existing) => existing.merge(&agg),
                None => {
                    self.pairs.insert(pair, agg.with_rarity(self.rarity));
                }
            }
        }
    }

    pub fn get(&self, pair: &LangPair) -> Option<&PairAggregator> {
        self.pairs.get(pair)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &LangPair> {
        self.pairs.keys()
    }

    /// Finalize every pair, looking up each population size once
    pub fn finalize_with<F>(&self, mut true_total: F) -> Vec<LangPairSummary>
    where
        F: FnMut(&LangPair) -> Option<u64>,
    {
        self.pairs
            .iter()
            .filter_map(|(pair, agg)| agg.finalize(true_total(pair)))
            .collect()
    }
}
