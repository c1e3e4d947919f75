//! Rarity score: how under-sampled a pair's repository population is.
//!
//! `rarity = 1 - sampled / min(population, cap)`, clamped to `[0, 1]`.
//! The cap bounds the population to what a sampling run could have reached
//! (two languages times the per-language search limit); a cap of 0 means
//! no cap. Unknown or zero populations give `None`.

use serde::{Deserialize, Serialize};

/// Twice the default per-language search limit of 150 repositories
pub const DEFAULT_POPULATION_CAP: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityModel {
    #[serde(default = "default_cap")]
    pub population_cap: u64,
}

fn default_cap() -> u64 {
    DEFAULT_POPULATION_CAP
}

impl Default for RarityModel {
    fn default() -> Self {
        Self {
            population_cap: DEFAULT_POPULATION_CAP,
        }
    }
}

impl RarityModel {
    pub fn with_cap(population_cap: u64) -> Self {
        Self { population_cap }
    }

    pub fn uncapped() -> Self {
        Self { population_cap: 0 }
    }

    /// Population the sample is compared against
    fn reference_population(&self, true_total: u64) -> u64 {
        if self.population_cap == 0 {
            true_total
        } else {
            true_total.min(self.population_cap)
        }
    }

    pub fn score(&self, sampled: usize, true_total_available: Option<u64>) -> Option<f64> {
        let total = true_total_available.filter(|&t| t > 0)?;
        let reference = self.reference_population(total) as f64;
        let ratio = sampled as f64 / reference;
        Some((1.0 - ratio).clamp(0.0, 1.0))
    }
}
