//! Candidate repository discovery

use crate::config::ScanConfig;
use crate::github::LanguageSearch;
use crate::models::{LangPair, PairCandidate, RepoCandidate};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Find repositories that use both languages of each low-collaboration pair.
///
/// Table names are mapped to GitHub language names through
/// `[discovery].languages`; pairs with an unknown name or a score above
/// the threshold are dropped. Search and language lookups are cached for
/// the duration of the call. Lookup failures are logged and treated as
/// "no match".
pub fn discover(
    pairs: &[PairCandidate],
    config: &ScanConfig,
    search: &dyn LanguageSearch,
) -> Vec<RepoCandidate> {
    let discovery = &config.discovery;
    // A symmetric table lists each pair twice; keep the first row's order
    let mut seen: BTreeSet<LangPair> = BTreeSet::new();
    let retained: Vec<(String, String)> = pairs
        .iter()
        .filter_map(|p| {
            let lang1 = discovery.github_language(&p.lang1);
            let lang2 = discovery.github_language(&p.lang2);
            match (lang1, lang2) {
                (Some(a), Some(b)) if p.collaboration_score <= discovery.collaboration_threshold => {
                    Some((a.to_string(), b.to_string()))
                }
                (Some(_), Some(_)) => {
                    debug!(
                        "Dropping {}-{}: score {} above {}",
                        p.lang1, p.lang2, p.collaboration_score, discovery.collaboration_threshold
                    );
                    None
                }
                _ => {
                    debug!("Dropping {}-{}: language not tracked", p.lang1, p.lang2);
                    None
                }
            }
        })
        .filter(|(a, b)| {
            let fresh = seen.insert(LangPair::new(a.as_str(), b.as_str()));
            if !fresh {
                debug!("Dropping {}-{}: pair already retained", a, b);
            }
            fresh
        })
        .collect();
    info!(
        "{} pairs retained with a score <= {}",
        retained.len(),
        discovery.collaboration_threshold
    );

    let mut searches: HashMap<String, Vec<String>> = HashMap::new();
    let mut languages: HashMap<String, Vec<String>> = HashMap::new();
    let mut candidates = Vec::new();

    for (lang1, lang2) in &retained {
        info!("Searching repositories for language pair {}-{}", lang1, lang2);

        let mut names = BTreeSet::new();
        for lang in [lang1, lang2] {
            let found = searches
                .entry(lang.clone())
                .or_insert_with(|| match search.search_repos(lang) {
                    Ok(found) => found,
                    Err(e) => {
                        warn!("Repository search for {} failed: {}", lang, e);
                        Vec::new()
                    }
                });
            names.extend(found.iter().cloned());
        }

        for full_name in names {
            let repo_langs = languages
                .entry(full_name.clone())
                .or_insert_with(|| match search.repo_languages(&full_name) {
                    Ok(langs) => langs,
                    Err(e) => {
                        warn!("Language lookup for {} failed: {}", full_name, e);
                        Vec::new()
                    }
                });
            if repo_langs.contains(lang1) && repo_langs.contains(lang2) {
                debug!("{} uses both {} and {}", full_name, lang1, lang2);
                candidates.push(RepoCandidate {
                    full_name,
                    lang1: lang1.clone(),
                    lang2: lang2.clone(),
                });
            }
        }
    }

    if candidates.is_empty() {
        warn!("No repositories retained after language check");
    } else {
        info!("{} candidate repositories found", candidates.len());
    }
    candidates
}
