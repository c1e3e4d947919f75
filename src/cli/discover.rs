//! Discover command - build the candidate repository list

use anyhow::{Context, Result};
use console::style;
use gitcollab::config::ScanConfig;
use gitcollab::github::GitHubClient;
use gitcollab::inputs::{read_pairs_csv, write_candidates_csv};
use gitcollab::models::RepoCandidate;
use gitcollab::pipeline;
use std::path::Path;

/// Run discovery and write the candidate list to `output`
pub fn run(config: &ScanConfig, pairs_path: &Path, output: &Path) -> Result<Vec<RepoCandidate>> {
    let pairs = read_pairs_csv(pairs_path)?;
    let client = GitHubClient::from_config(config).context("Cannot create GitHub client")?;

    println!(
        "\n{} Discovering repositories for {} language pairs\n",
        style("🔎").bold(),
        pairs.len()
    );
    let candidates = pipeline::discover(&pairs, config, &client);

    write_candidates_csv(output, &candidates)?;
    println!(
        "{} {} candidate repositories written to {}",
        style("✓").green(),
        style(candidates.len()).bold(),
        style(output.display()).cyan()
    );
    Ok(candidates)
}
