//! Minimum-signal repository filter
//!
//! Repositories with too few pull requests or issues are skipped before
//! scoring and never reach a pair summary.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MIN_PULL_REQUESTS: i64 = 5;
pub const DEFAULT_MIN_ISSUES: i64 = 5;

/// Outcome of evaluating a repository against the thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Accepted,
    TooFewPullRequests { found: Option<i64>, required: i64 },
    TooFewIssues { found: Option<i64>, required: i64 },
}

impl FilterDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FilterDecision::Accepted)
    }
}

impl fmt::Display for FilterDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show(v: &Option<i64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_else(|| "unknown".to_string())
        }
        match self {
            FilterDecision::Accepted => write!(f, "accepted"),
            FilterDecision::TooFewPullRequests { found, required } => {
                write!(f, "{} pull requests, need {}", show(found), required)
            }
            FilterDecision::TooFewIssues { found, required } => {
                write!(f, "{} issues, need {}", show(found), required)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryFilter {
    #[serde(default = "default_min_pull_requests")]
    pub min_pull_requests: i64,
    #[serde(default = "default_min_issues")]
    pub min_issues: i64,
}

fn default_min_pull_requests() -> i64 {
    DEFAULT_MIN_PULL_REQUESTS
}

fn default_min_issues() -> i64 {
    DEFAULT_MIN_ISSUES
}

impl Default for RepositoryFilter {
    fn default() -> Self {
        Self {
            min_pull_requests: DEFAULT_MIN_PULL_REQUESTS,
            min_issues: DEFAULT_MIN_ISSUES,
        }
    }
}

impl RepositoryFilter {
    pub fn new(min_pull_requests: i64, min_issues: i64) -> Self {
        Self {
            min_pull_requests,
            min_issues,
        }
    }

    /// True iff both counts are known, non-negative and at or above threshold
    pub fn accept(&self, pull_requests: Option<i64>, issues: Option<i64>) -> bool {
        self.evaluate(pull_requests, issues).is_accepted()
    }

    /// Like [`accept`](Self::accept) but reports which threshold failed
    pub fn evaluate(&self, pull_requests: Option<i64>, issues: Option<i64>) -> FilterDecision {
        if !meets(pull_requests, self.min_pull_requests) {
            return FilterDecision::TooFewPullRequests {
                found: pull_requests,
                required: self.min_pull_requests,
            };
        }
        if !meets(issues, self.min_issues) {
            return FilterDecision::TooFewIssues {
                found: issues,
                required: self.min_issues,
            };
        }
        FilterDecision::Accepted
    }

    /// Evaluate fetched collection sizes
    pub fn evaluate_counts(&self, pull_requests: usize, issues: usize) -> FilterDecision {
        self.evaluate(
            i64::try_from(pull_requests).ok(),
            i64::try_from(issues).ok(),
        )
    }
}

fn meets(count: Option<i64>, required: i64) -> bool {
    matches!(count, Some(n) if n >= 0 && n >= required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gate() {
        let filter = RepositoryFilter::default();
        assert!(filter.accept(Some(5), Some(5)));
        assert!(filter.accept(Some(100), Some(7)));
        assert!(!filter.accept(Some(4), Some(6)));
        assert!(!filter.accept(Some(6), Some(4)));
    }

    #[test]
    fn test_scenario_b_too_few_prs() {
        let decision = RepositoryFilter::default().evaluate(Some(4), Some(6));
        assert_eq!(
            decision,
            FilterDecision::TooFewPullRequests {
                found: Some(4),
                required: 5
            }
        );
        assert_eq!(decision.to_string(), "4 pull requests, need 5");
    }

    #[test]
    fn test_malformed_counts_rejected() {
        let filter = RepositoryFilter::default();
        assert!(!filter.accept(None, Some(10)));
        assert!(!filter.accept(Some(10), None));
        assert!(!filter.accept(Some(-1), Some(10)));
        assert!(!filter.accept(Some(10), Some(-7)));
    }

    #[test]
    fn test_negative_never_accepted_even_with_negative_threshold() {
        let filter = RepositoryFilter::new(-3, -3);
        assert!(!filter.accept(Some(-1), Some(0)));
        assert!(filter.accept(Some(0), Some(0)));
    }

    #[test]
    fn test_custom_thresholds() {
        let filter = RepositoryFilter::new(1, 0);
        assert!(filter.accept(Some(1), Some(0)));
        assert!(!filter.accept(Some(0), Some(0)));
    }

    #[test]
    fn test_evaluate_counts() {
        let filter = RepositoryFilter::default();
        assert!(filter.evaluate_counts(5, 5).is_accepted());
        assert_eq!(
            filter.evaluate_counts(5, 2),
            FilterDecision::TooFewIssues {
                found: Some(2),
                required: 5
            }
        );
    }
}
