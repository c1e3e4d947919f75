use super::*;

#[test]
fn test_default_config() {
    let config = ScanConfig::default();

    assert_eq!(config.filter.min_pull_requests, 5);
    assert_eq!(config.filter.min_issues, 5);
    assert_eq!(config.rarity.population_cap, 300);
    assert_eq!(config.github.token_env, "GITHUB_TOKEN_GITCOLLABCOLLECTOR");
    assert_eq!(config.github.max_pr_pages, 50);
    assert_eq!(config.github.max_issue_pages, 10);
    assert_eq!(config.discovery.min_stars, 3);
    assert_eq!(config.discovery.max_repos_per_language, 150);
    assert!((config.discovery.collaboration_threshold - 0.4).abs() < 0.001);
    assert_eq!(config.discovery.github_language("Haskell"), Some("Haskell"));
    assert_eq!(config.discovery.github_language("Cobol"), None);

    let catalog = config.catalog();
    assert_eq!(catalog.len(), crate::keywords::DEFAULT_KEYWORDS.len());
}

#[test]
fn test_parse_toml_config() {
    let toml_content = r#"
[filter]
min_pull_requests = 10
min_issues = 2

[keywords]
extra = ["wasm-bindgen", { literal = "uniffi", label = "UniFFI", mode = "token" }]
disabled = ["stub", "NAN"]

[rarity]
population_cap = 0

[github]
max_pr_pages = 3
api_url = "https://ghe.example.com/api/v3"

[discovery]
collaboration_threshold = 0.25
languages = { Rust = "Rust", Golang = "Go" }
"#;

    let config: ScanConfig = toml::from_str(toml_content).expect("parse scan config");

    assert_eq!(config.filter, RepositoryFilter::new(10, 2));
    assert_eq!(config.rarity, RarityModel::uncapped());
    assert_eq!(config.github.max_pr_pages, 3);
    assert_eq!(config.github.max_issue_pages, 10);
    assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
    assert_eq!(config.discovery.github_language("Golang"), Some("Go"));
    assert_eq!(config.discovery.github_language("Haskell"), None);
    assert_eq!(config.discovery.min_stars, 3);

    assert_eq!(
        config.keywords.extra[1],
        KeywordSpec::Detailed {
            literal: "uniffi".to_string(),
            label: Some("UniFFI".to_string()),
            mode: MatchMode::Token,
        }
    );

    let catalog = config.catalog();
    let literals: Vec<_> = catalog.iter().map(|e| e.literal.as_str()).collect();
    assert!(literals.contains(&"wasm-bindgen"));
    assert!(literals.contains(&"uniffi"));
    assert!(!literals.contains(&"stub"));
    assert!(!literals.contains(&"NAN"));
    assert_eq!(literals.last(), Some(&"uniffi"));
}

#[test]
fn test_replace_defaults() {
    let config: ScanConfig = toml::from_str(
        r#"
[keywords]
replace_defaults = true
extra = ["FFI", "JNI", "ffi"]
"#,
    )
    .expect("parse scan config");
    let catalog = config.catalog();
    let literals: Vec<_> = catalog.iter().map(|e| e.literal.as_str()).collect();
    assert_eq!(literals, vec!["FFI", "JNI"]);
}

#[test]
fn test_parse_json_config() {
    let json = r#"{ "filter": { "min_issues": 1 }, "keywords": { "extra": ["pyo3"] } }"#;
    let config: ScanConfig = serde_json::from_str(json).expect("parse json config");
    assert_eq!(config.filter.min_pull_requests, 5);
    assert_eq!(config.filter.min_issues, 1);
    assert!(config.catalog().iter().any(|e| e.literal == "pyo3"));
}

#[test]
fn test_example_config_parses() {
    let config: ScanConfig = toml::from_str(EXAMPLE_CONFIG).expect("parse example config");
    assert_eq!(config.filter, RepositoryFilter::default());
    assert_eq!(config.rarity, RarityModel::default());
}

#[test]
fn test_load_scan_config_prefers_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[filter]\nmin_pull_requests = 7\n",
    )
    .expect("write toml");
    std::fs::write(
        dir.path().join(JSON_CONFIG_FILE_NAME),
        r#"{ "filter": { "min_pull_requests": 9 } }"#,
    )
    .expect("write json");

    let config = load_scan_config(dir.path());
    assert_eq!(config.filter.min_pull_requests, 7);
}

#[test]
fn test_load_scan_config_falls_back_on_bad_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "not [[ valid").expect("write toml");
    std::fs::write(
        dir.path().join(JSON_CONFIG_FILE_NAME),
        r#"{ "filter": { "min_pull_requests": 9 } }"#,
    )
    .expect("write json");

    let config = load_scan_config(dir.path());
    assert_eq!(config.filter.min_pull_requests, 9);
}

#[test]
fn test_load_scan_config_defaults_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = load_scan_config(dir.path());
    assert_eq!(config.filter, RepositoryFilter::default());
}

#[test]
fn test_load_config_file_surfaces_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "this is [[ not valid toml").expect("write");
    assert!(load_config_file(&path).is_err());
    assert!(load_config_file(&dir.path().join("missing.toml")).is_err());
}
