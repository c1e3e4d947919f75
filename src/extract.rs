//! Artifact text extraction
//!
//! Flattens what the collector fetched for a repository into the blobs the
//! scorer consumes: README first, then pull requests, then issues, each in
//! the order supplied.

use crate::models::{ArtifactBlob, ArtifactKind, ArtifactText, RepoFetchResult};

/// Build the blob sequence for one repository.
///
/// A README that is absent or blank contributes nothing. Every pull
/// request and issue contributes exactly one blob, even when its title and
/// body are both empty, so "fetched but empty" still counts as analyzed.
pub fn extract(
    readme: Option<&str>,
    pull_requests: &[ArtifactText],
    issues: &[ArtifactText],
) -> Vec<ArtifactBlob> {
    let mut blobs = Vec::with_capacity(pull_requests.len() + issues.len() + 1);

    if let Some(text) = readme.filter(|t| !t.trim().is_empty()) {
        blobs.push(ArtifactBlob {
            kind: ArtifactKind::Readme,
            text: text.to_string(),
        });
    }

    blobs.extend(pull_requests.iter().map(|pr| ArtifactBlob {
        kind: ArtifactKind::PullRequest,
        text: join_title_body(pr),
    }));
    blobs.extend(issues.iter().map(|issue| ArtifactBlob {
        kind: ArtifactKind::Issue,
        text: join_title_body(issue),
    }));

    blobs
}

/// Convenience wrapper over [`extract`] for a full fetch result
pub fn extract_fetched(fetched: &RepoFetchResult) -> Vec<ArtifactBlob> {
    extract(
        fetched.readme.as_deref(),
        &fetched.pull_requests,
        &fetched.issues,
    )
}

fn join_title_body(artifact: &ArtifactText) -> String {
    let title = artifact.title.as_deref().unwrap_or("");
    let body = artifact.body.as_deref().unwrap_or("");
    format!("{} {}", title, body).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_readme_prs_issues() {
        let prs = vec![ArtifactText::new("pr1", "a"), ArtifactText::new("pr2", "b")];
        let issues = vec![ArtifactText::new("issue1", "c")];
        let blobs = extract(Some("# Readme"), &prs, &issues);

        let kinds: Vec<_> = blobs.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ArtifactKind::Readme,
                ArtifactKind::PullRequest,
                ArtifactKind::PullRequest,
                ArtifactKind::Issue
            ]
        );
        assert_eq!(blobs[1].text, "pr1 a");
        assert_eq!(blobs[3].text, "issue1 c");
    }

    #[test]
    fn test_missing_readme_contributes_nothing() {
        let prs = vec![ArtifactText::body("x")];
        assert_eq!(extract(None, &prs, &[]).len(), 1);
        assert_eq!(extract(Some(""), &prs, &[]).len(), 1);
        assert_eq!(extract(Some("  \n"), &prs, &[]).len(), 1);
    }

    #[test]
    fn test_empty_artifacts_still_counted() {
        let prs = vec![ArtifactText::default()];
        let issues = vec![ArtifactText {
            title: Some(String::new()),
            body: None,
        }];
        let blobs = extract(None, &prs, &issues);
        assert_eq!(blobs.len(), 2);
        assert!(blobs.iter().all(|b| b.text.is_empty()));
    }

    #[test]
    fn test_title_only_and_body_only() {
        let prs = vec![
            ArtifactText {
                title: Some("Add JNI".to_string()),
                body: None,
            },
            ArtifactText::body("uses FFI"),
        ];
        let blobs = extract(None, &prs, &[]);
        assert_eq!(blobs[0].text, "Add JNI");
        assert_eq!(blobs[1].text, "uses FFI");
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let fetched = RepoFetchResult {
            full_name: "o/r".to_string(),
            readme: Some("readme".to_string()),
            pull_requests: vec![ArtifactText::new("t", "b")],
            issues: vec![],
        };
        assert_eq!(extract_fetched(&fetched), extract_fetched(&fetched));
    }
}
